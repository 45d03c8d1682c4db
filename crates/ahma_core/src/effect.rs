use crate::state::TaskId;

/// IO requested by [`crate::update`]; executed outside the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendChat { message: String },
    LoadCalendarEvents,
    LoadTasks,
    LoadPdfList,
    UploadPdf { filename: String, bytes: Vec<u8> },
    ProcessPdf { filename: String, form_type: String },
    DownloadPdf { filename: String },
    CompleteTask { task_id: TaskId },
    /// Hand a downloaded file to the environment as a user-initiated save.
    SaveFile { filename: String, bytes: Vec<u8> },
}
