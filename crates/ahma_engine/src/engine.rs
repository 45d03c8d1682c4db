use std::sync::{mpsc, Arc};
use std::thread;

use session_logging::session_debug;

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::types::{BackendError, BackendEvent, TaskId};

enum EngineCommand {
    SendChat { message: String },
    LoadCalendarEvents,
    LoadTasks,
    CompleteTask { task_id: TaskId },
    LoadPdfList,
    UploadPdf { filename: String, bytes: Vec<u8> },
    ProcessPdf { filename: String, form_type: String },
    DownloadPdf { filename: String },
}

/// Clonable submission half of the engine. Commands are fire-and-forget;
/// completion arrives on the owning [`EngineHandle`]'s event side.
#[derive(Clone)]
pub struct CommandSender {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl CommandSender {
    pub fn send_chat(&self, message: impl Into<String>) {
        self.submit(EngineCommand::SendChat {
            message: message.into(),
        });
    }

    pub fn load_calendar_events(&self) {
        self.submit(EngineCommand::LoadCalendarEvents);
    }

    pub fn load_tasks(&self) {
        self.submit(EngineCommand::LoadTasks);
    }

    pub fn complete_task(&self, task_id: TaskId) {
        self.submit(EngineCommand::CompleteTask { task_id });
    }

    pub fn load_pdf_list(&self) {
        self.submit(EngineCommand::LoadPdfList);
    }

    pub fn upload_pdf(&self, filename: impl Into<String>, bytes: Vec<u8>) {
        self.submit(EngineCommand::UploadPdf {
            filename: filename.into(),
            bytes,
        });
    }

    pub fn process_pdf(&self, filename: impl Into<String>, form_type: impl Into<String>) {
        self.submit(EngineCommand::ProcessPdf {
            filename: filename.into(),
            form_type: form_type.into(),
        });
    }

    pub fn download_pdf(&self, filename: impl Into<String>) {
        self.submit(EngineCommand::DownloadPdf {
            filename: filename.into(),
        });
    }

    fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

/// Runs backend commands on a dedicated thread with its own runtime.
///
/// Commands run concurrently; serializing the single-flight operations is the
/// caller's state machine's job. Every command eventually produces exactly
/// one [`BackendEvent`], whatever the outcome.
pub struct EngineHandle {
    commands: CommandSender,
    event_rx: mpsc::Receiver<BackendEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let backend = Arc::new(ReqwestBackend::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    run_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            commands: CommandSender { cmd_tx },
            event_rx,
        })
    }

    pub fn commands(&self) -> CommandSender {
        self.commands.clone()
    }

    /// Blocks until the next completion event; `None` once the engine thread
    /// has shut down and drained.
    pub fn recv(&self) -> Option<BackendEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<BackendEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<BackendEvent>,
) {
    let event = match command {
        EngineCommand::SendChat { message } => {
            session_debug!("chat exchange ({} chars)", message.len());
            BackendEvent::ChatFinished {
                result: backend.send_chat(&message).await,
            }
        }
        EngineCommand::LoadCalendarEvents => BackendEvent::CalendarLoaded {
            result: backend.calendar_events().await,
        },
        EngineCommand::LoadTasks => BackendEvent::TasksLoaded {
            result: backend.tasks().await,
        },
        EngineCommand::CompleteTask { task_id } => BackendEvent::TaskCompletionFinished {
            task_id,
            result: backend.complete_task(task_id).await,
        },
        EngineCommand::LoadPdfList => BackendEvent::PdfListLoaded {
            result: backend.pdf_inventory().await,
        },
        EngineCommand::UploadPdf { filename, bytes } => {
            session_debug!("uploading {} ({} bytes)", filename, bytes.len());
            BackendEvent::UploadFinished {
                result: backend.upload_pdf(&filename, bytes).await,
            }
        }
        EngineCommand::ProcessPdf {
            filename,
            form_type,
        } => BackendEvent::ProcessFinished {
            result: backend.process_pdf(&filename, &form_type).await,
        },
        EngineCommand::DownloadPdf { filename } => {
            let result = backend.download_pdf(&filename).await;
            BackendEvent::DownloadFinished { filename, result }
        }
    };
    let _ = event_tx.send(event);
}
