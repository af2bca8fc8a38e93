use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a tracked background task.
///
/// Backed by a UUIDv7, so ids sort by creation time and two tasks created
/// in the same millisecond still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Completed,
    Error,
}

impl TaskStatus {
    /// Completed and failed tasks never go back to running.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Running)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Error => write!(f, "error"),
        }
    }
}

/// What kind of work a task represents; drives the icon in the task panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Backtest,
    Valuation,
    Export,
    Import,
    Sync,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::Backtest => "backtest",
            TaskKind::Valuation => "valuation",
            TaskKind::Export => "export",
            TaskKind::Import => "import",
            TaskKind::Sync => "sync",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Percent complete, 0..=100.
    pub progress: u8,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: TaskKind,
}

impl Task {
    pub fn new(title: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            progress: 0,
            status: TaskStatus::Running,
            kind,
        }
    }
}
