//! Report export to PDF.
//!
//! Views register printable sections under an id; the export action looks
//! the section up and writes it to the export directory. Failures here are
//! shown to the user through the alert sink and never returned.

use crate::domain::ports::AlertSink;
use crate::infrastructure::pdf::render_text_document;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// Printable sections currently on screen, keyed by element id.
#[derive(Default)]
pub struct SectionRegistry {
    sections: Mutex<HashMap<String, ReportSection>>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: impl Into<String>, section: ReportSection) {
        self.lock().insert(id.into(), section);
    }

    pub fn unregister(&self, id: &str) {
        self.lock().remove(id);
    }

    pub fn get(&self, id: &str) -> Option<ReportSection> {
        self.lock().get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ReportSection>> {
        self.sections.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct PdfExportStore {
    registry: Arc<SectionRegistry>,
    alerts: Arc<dyn AlertSink>,
    output_dir: PathBuf,
    // Exports in flight; overlapping exports each hold one count.
    exporting: AtomicUsize,
}

impl PdfExportStore {
    pub fn new(
        registry: Arc<SectionRegistry>,
        alerts: Arc<dyn AlertSink>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            alerts,
            output_dir: output_dir.into(),
            exporting: AtomicUsize::new(0),
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst) > 0
    }

    /// Writes section `section_id` to `<output_dir>/<filename>` and returns
    /// the path. On failure the user is alerted and `None` is returned.
    pub fn export(&self, section_id: &str, filename: &str) -> Option<PathBuf> {
        let result = {
            let _busy = self.begin_export();
            self.try_export(section_id, filename)
        };

        match result {
            Ok(path) => {
                info!("Exported '{}' to {:?}", section_id, path);
                Some(path)
            }
            Err(e) => {
                error!("PDF export of '{}' failed: {:#}", section_id, e);
                self.alerts.alert(&format!("Failed to export PDF: {}", e));
                None
            }
        }
    }

    fn try_export(&self, section_id: &str, filename: &str) -> Result<PathBuf> {
        let section = self
            .registry
            .get(section_id)
            .with_context(|| format!("Section '{}' not found", section_id))?;

        // Only the final component is kept so the file stays in output_dir.
        let filename = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Invalid export filename '{}'", filename))?;

        let filename = if filename.to_lowercase().ends_with(".pdf") {
            filename.to_string()
        } else {
            format!("{}.pdf", filename)
        };

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {:?}", self.output_dir))?;

        let path = self.output_dir.join(filename);
        let bytes = render_text_document(&section.title, &section.lines);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(path)
    }

    fn begin_export(&self) -> ExportGuard<'_> {
        self.exporting.fetch_add(1, Ordering::SeqCst);
        ExportGuard {
            exporting: &self.exporting,
        }
    }
}

struct ExportGuard<'a> {
    exporting: &'a AtomicUsize,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.exporting.fetch_sub(1, Ordering::SeqCst);
    }
}
