//! AHMA engine: backend IO and download persistence.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{Backend, BackendSettings, ReqwestBackend};
pub use engine::{CommandSender, EngineHandle};
pub use persist::{ensure_download_dir, save_download, PersistError};
pub use types::{
    BackendError, BackendEvent, EventRecord, FileRecord, PdfInventory, ProcessReply, TaskId,
    TaskRecord, UploadReply,
};
