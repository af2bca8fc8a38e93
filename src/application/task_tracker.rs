//! Progress tracking for long-running background work (backtests, exports).
//!
//! The caller drives progress; the tracker only records it. Finished tasks
//! stay visible for a short while and are then dropped by a timer. Timers
//! are keyed by task id and aborted when the task is removed by hand, so a
//! stale timer never fires against a later task.

use crate::config::TaskTrackerConfig;
use crate::domain::task::{Task, TaskId, TaskKind, TaskStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Shared handle to the task list. Clones see the same tasks.
#[derive(Clone)]
pub struct TaskTracker {
    inner: Arc<Inner>,
}

struct Inner {
    tasks: watch::Sender<Vec<Task>>,
    timers: Mutex<HashMap<TaskId, AbortHandle>>,
    config: TaskTrackerConfig,
}

impl Default for TaskTracker {
    fn default() -> Self {
        Self::new(TaskTrackerConfig::default())
    }
}

impl TaskTracker {
    pub fn new(config: TaskTrackerConfig) -> Self {
        let (tasks, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                tasks,
                timers: Mutex::new(HashMap::new()),
                config,
            }),
        }
    }

    /// Appends a running task at 0% and returns its id.
    pub fn add_task(&self, title: impl Into<String>, kind: TaskKind) -> TaskId {
        let task = Task::new(title, kind);
        let id = task.id;
        info!("Task started: {} [{}] {}", task.title, kind, id);
        self.inner.tasks.send_modify(|tasks| tasks.push(task));
        id
    }

    /// Records progress for a running task. Unknown and finished tasks are
    /// left alone. Reaching 100 completes the task and schedules removal.
    pub fn update_progress(&self, id: TaskId, progress: u8) {
        let progress = progress.min(100);
        let mut completed = false;

        self.inner.tasks.send_if_modified(|tasks| {
            let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
                debug!("Progress update for unknown task {}", id);
                return false;
            };
            if task.status.is_terminal() {
                warn!(
                    "Ignoring progress {} for task {} already {}",
                    progress, id, task.status
                );
                return false;
            }

            task.progress = progress;
            if progress >= 100 {
                task.status = TaskStatus::Completed;
                completed = true;
                info!("Task completed: {} {}", task.title, id);
            }
            true
        });

        if completed {
            self.schedule_removal(id, self.inner.config.completed_ttl);
        }
    }

    /// Marks a running task as failed and schedules removal.
    pub fn fail_task(&self, id: TaskId) {
        let mut failed = false;

        self.inner.tasks.send_if_modified(|tasks| {
            let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
                debug!("Failure report for unknown task {}", id);
                return false;
            };
            if task.status.is_terminal() {
                warn!("Ignoring failure for task {} already {}", id, task.status);
                return false;
            }

            task.status = TaskStatus::Error;
            failed = true;
            warn!("Task failed: {} {}", task.title, id);
            true
        });

        if failed {
            self.schedule_removal(id, self.inner.config.failed_ttl);
        }
    }

    /// Settles a task from the outcome of its work: `Ok` completes it,
    /// `Err` fails it. The result is handed back unchanged.
    pub fn finish<T, E>(&self, id: TaskId, result: Result<T, E>) -> Result<T, E> {
        match &result {
            Ok(_) => self.update_progress(id, 100),
            Err(_) => self.fail_task(id),
        }
        result
    }

    /// Drops the task regardless of status and cancels its pending timer.
    pub fn remove_task(&self, id: TaskId) {
        if let Some(timer) = self.inner.lock_timers().remove(&id) {
            timer.abort();
        }
        self.inner.remove(id);
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.inner.tasks.borrow().clone()
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.inner.tasks.borrow().iter().find(|t| t.id == id).cloned()
    }

    pub fn running_count(&self) -> usize {
        self.inner
            .tasks
            .borrow()
            .iter()
            .filter(|t| t.status == TaskStatus::Running)
            .count()
    }

    /// Change feed of the task list for renderers.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.inner.tasks.subscribe()
    }

    fn schedule_removal(&self, id: TaskId, delay: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; task {} will stay until removed by hand", id);
            return;
        };

        // Held across spawn and insert: the timer takes the same lock before
        // expiring, so it always finds its own entry to clear.
        let mut timers = self.inner.lock_timers();

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.lock_timers().remove(&id);
                inner.remove(id);
                debug!("Expired task {}", id);
            }
        });

        if let Some(previous) = timers.insert(id, handle.abort_handle()) {
            previous.abort();
        }
    }
}

impl Inner {
    fn remove(&self, id: TaskId) {
        self.tasks.send_if_modified(|tasks| {
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            tasks.len() != before
        });
    }

    fn lock_timers(&self) -> std::sync::MutexGuard<'_, HashMap<TaskId, AbortHandle>> {
        self.timers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
