use crate::state::{CalendarEvent, PdfFile, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session view came up; greet and load the sidebar resources.
    SessionStarted,
    /// User edited the chat input box.
    InputChanged(String),
    /// User pressed Enter or clicked send.
    SendClicked,
    /// Chat backend round-trip finished.
    ChatExchangeFinished(ChatOutcome),
    /// User picked a local file for upload.
    FileChosen {
        filename: String,
        media_type: String,
        bytes: Vec<u8>,
    },
    /// Upload request finished.
    UploadFinished(UploadOutcome),
    /// User asked for a form to be filled.
    ProcessClicked { filename: String },
    /// Fill request finished.
    ProcessFinished(ProcessOutcome),
    /// User asked for a processed file.
    DownloadClicked { filename: String },
    /// Download request finished.
    DownloadFinished(DownloadOutcome),
    /// User ticked off a task.
    CompleteTaskClicked { task_id: TaskId },
    /// Completion request finished.
    CompleteTaskFinished { success: bool },
    /// User opened the insurance helper.
    InsuranceChatClicked,
    /// Calendar reload finished; empty on any failure.
    CalendarLoaded(Vec<CalendarEvent>),
    /// Task reload finished; empty on any failure.
    TasksLoaded(Vec<Task>),
    /// PDF list reload finished; both lists empty on any failure.
    PdfListLoaded {
        uploaded: Vec<PdfFile>,
        processed: Vec<PdfFile>,
    },
    /// Periodic sidebar refresh.
    RefreshTick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of one chat exchange, as seen by the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Backend answered with a reply text.
    Reply(String),
    /// Backend answered but the reply field was absent.
    MissingReply,
    /// Transport or parse failure.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Server accepted the file under the reported name.
    Accepted { filename: String },
    /// Server refused the file and said why.
    Rejected { error: String },
    /// Transport or parse failure.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Filled form stored under the reported name.
    Processed { filename: String },
    /// Server refused to process and said why.
    Rejected { error: String },
    /// Transport or parse failure.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Raw file body, ready to hand to the environment.
    Fetched { filename: String, bytes: Vec<u8> },
    /// Server answered with a non-success status.
    Missing,
    /// Transport failure.
    Failed,
}
