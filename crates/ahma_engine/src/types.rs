use bytes::Bytes;
use serde::Deserialize;

pub type TaskId = u64;

/// A calendar entry as the backend reports it. `start` is either an RFC 3339
/// datetime or a bare `YYYY-MM-DD` date for all-day events; interpretation is
/// left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: String,
}

/// A task as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub created_at: String,
}

fn default_priority() -> u8 {
    1
}

/// One entry of the PDF listing, in either category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    #[serde(default)]
    pub size: u64,
}

/// Both PDF lists from one listing call. A listing the server marks as
/// unsuccessful comes back with both lists empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PdfInventory {
    pub uploaded: Vec<FileRecord>,
    pub processed: Vec<FileRecord>,
}

/// Well-formed upload response, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadReply {
    /// Stored under the server-reported name.
    Accepted { filename: String },
    /// Refused, with the server-reported reason.
    Rejected { error: String },
}

/// Well-formed fill response, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessReply {
    /// Filled form stored under the server-reported name.
    Completed { processed_filename: String },
    /// Refused, with the server-reported reason.
    Rejected { error: String },
}

/// Transport and parse failures. Application-level refusals are not errors;
/// they come back as `Rejected` replies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("http status {0}")]
    Status(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Completion report for one submitted command. Every command produces
/// exactly one event.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    ChatFinished {
        result: Result<Option<String>, BackendError>,
    },
    CalendarLoaded {
        result: Result<Vec<EventRecord>, BackendError>,
    },
    TasksLoaded {
        result: Result<Vec<TaskRecord>, BackendError>,
    },
    TaskCompletionFinished {
        task_id: TaskId,
        result: Result<bool, BackendError>,
    },
    PdfListLoaded {
        result: Result<PdfInventory, BackendError>,
    },
    UploadFinished {
        result: Result<UploadReply, BackendError>,
    },
    ProcessFinished {
        result: Result<ProcessReply, BackendError>,
    },
    DownloadFinished {
        filename: String,
        result: Result<Bytes, BackendError>,
    },
}
