pub mod design_system;
pub mod document;

pub use design_system::ThemePalette;
pub use document::{LogAlertSink, RecordingAlertSink, RootStyle};
