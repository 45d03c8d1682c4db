//! AHMA core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{ChatOutcome, DownloadOutcome, Msg, ProcessOutcome, UploadOutcome};
pub use state::{
    AppState, CalendarEvent, Message, MessageId, PdfFile, Sender, Task, TaskId,
};
pub use update::{
    update, CHAT_FAILED_REPLY, CHAT_FALLBACK_REPLY, DEFAULT_FORM_TYPE, DOWNLOAD_FAILED_NOTICE,
    DOWNLOAD_MISSING_NOTICE, INSURANCE_GREETING, INVALID_FILE_NOTICE, PDF_MEDIA_TYPE,
    PROCESS_FAILED_NOTICE, TASK_COMPLETED_NOTICE, UPLOAD_FAILED_NOTICE, WELCOME_NOTICE,
};
pub use view_model::{priority_label, AppViewModel, EventRowView, PdfRowView, TaskRowView};
