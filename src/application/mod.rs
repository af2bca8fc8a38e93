pub mod layout_detector;
pub mod pdf_export;
pub mod portfolio_store;
pub mod task_tracker;
pub mod terminal_store;
pub mod theme_store;

pub use layout_detector::LayoutDetector;
pub use pdf_export::{PdfExportStore, ReportSection, SectionRegistry};
pub use portfolio_store::PortfolioStore;
pub use task_tracker::TaskTracker;
pub use terminal_store::TerminalStore;
pub use theme_store::ThemeStore;
