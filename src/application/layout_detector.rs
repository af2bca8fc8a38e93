use crate::domain::layout::Breakpoints;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::debug;

/// Tracks the viewport width and publishes the derived breakpoints.
///
/// Resize events only count while the detector is attached, mirroring a
/// listener registered on mount and removed on unmount. Every accepted
/// event recomputes synchronously.
pub struct LayoutDetector {
    attached: AtomicBool,
    state: watch::Sender<Breakpoints>,
}

impl LayoutDetector {
    pub fn new(initial_width: u32) -> Self {
        let (state, _) = watch::channel(Breakpoints::from_width(initial_width));
        Self {
            attached: AtomicBool::new(false),
            state,
        }
    }

    pub fn attach(&self) {
        self.attached.store(true, Ordering::SeqCst);
        debug!("Layout detector attached");
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
        debug!("Layout detector detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Handles a resize event. Returns `false` if the detector is detached.
    pub fn on_resize(&self, width: u32) -> bool {
        if !self.is_attached() {
            return false;
        }

        let next = Breakpoints::from_width(width);
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        true
    }

    pub fn breakpoints(&self) -> Breakpoints {
        *self.state.borrow()
    }

    pub fn width(&self) -> u32 {
        self.state.borrow().width
    }

    pub fn subscribe(&self) -> watch::Receiver<Breakpoints> {
        self.state.subscribe()
    }
}
