use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use ahma_core::{
    CalendarEvent, ChatOutcome, DownloadOutcome, Effect, Msg, PdfFile, ProcessOutcome, Task,
    UploadOutcome,
};
use ahma_engine::{
    BackendError, BackendEvent, BackendSettings, CommandSender, EngineHandle, EventRecord,
    FileRecord, PdfInventory, ProcessReply, TaskRecord, UploadReply,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use session_logging::{session_error, session_info, session_warn};

use super::ShellEvent;

pub struct EffectRunner {
    commands: CommandSender,
    download_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(
        settings: BackendSettings,
        download_dir: PathBuf,
        event_tx: mpsc::Sender<ShellEvent>,
    ) -> Result<Self, BackendError> {
        let engine = EngineHandle::new(settings)?;
        let commands = engine.commands();
        spawn_event_pump(engine, event_tx);
        Ok(Self {
            commands,
            download_dir,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendChat { message } => self.commands.send_chat(message),
                Effect::LoadCalendarEvents => self.commands.load_calendar_events(),
                Effect::LoadTasks => self.commands.load_tasks(),
                Effect::LoadPdfList => self.commands.load_pdf_list(),
                Effect::UploadPdf { filename, bytes } => {
                    session_info!("uploading {} ({} bytes)", filename, bytes.len());
                    self.commands.upload_pdf(filename, bytes);
                }
                Effect::ProcessPdf {
                    filename,
                    form_type,
                } => {
                    session_info!("processing {} as {}", filename, form_type);
                    self.commands.process_pdf(filename, form_type);
                }
                Effect::DownloadPdf { filename } => self.commands.download_pdf(filename),
                Effect::CompleteTask { task_id } => self.commands.complete_task(task_id),
                Effect::SaveFile { filename, bytes } => self.save_file(&filename, &bytes),
            }
        }
    }

    fn save_file(&self, filename: &str, bytes: &[u8]) {
        match ahma_engine::save_download(&self.download_dir, filename, bytes) {
            Ok(path) => session_info!("saved download to {}", path.display()),
            Err(err) => session_error!("failed to save {}: {}", filename, err),
        }
    }
}

fn spawn_event_pump(engine: EngineHandle, event_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        while let Some(event) = engine.recv() {
            if event_tx.send(ShellEvent::Core(into_msg(event))).is_err() {
                break;
            }
        }
    });
}

/// Collapses backend completions into core messages. Failed loads become
/// empty lists; the stale list is never kept.
fn into_msg(event: BackendEvent) -> Msg {
    match event {
        BackendEvent::ChatFinished { result } => Msg::ChatExchangeFinished(match result {
            Ok(Some(text)) => ChatOutcome::Reply(text),
            Ok(None) => ChatOutcome::MissingReply,
            Err(err) => {
                session_warn!("chat exchange failed: {err}");
                ChatOutcome::Failed
            }
        }),
        BackendEvent::CalendarLoaded { result } => Msg::CalendarLoaded(calendar_events(result)),
        BackendEvent::TasksLoaded { result } => Msg::TasksLoaded(tasks(result)),
        BackendEvent::TaskCompletionFinished { task_id, result } => {
            let success = match result {
                Ok(success) => success,
                Err(err) => {
                    session_warn!("completing task {task_id} failed: {err}");
                    false
                }
            };
            Msg::CompleteTaskFinished { success }
        }
        BackendEvent::PdfListLoaded { result } => {
            let (uploaded, processed) = pdf_lists(result);
            Msg::PdfListLoaded {
                uploaded,
                processed,
            }
        }
        BackendEvent::UploadFinished { result } => Msg::UploadFinished(match result {
            Ok(UploadReply::Accepted { filename }) => UploadOutcome::Accepted { filename },
            Ok(UploadReply::Rejected { error }) => UploadOutcome::Rejected { error },
            Err(err) => {
                session_warn!("upload failed: {err}");
                UploadOutcome::Failed
            }
        }),
        BackendEvent::ProcessFinished { result } => Msg::ProcessFinished(match result {
            Ok(ProcessReply::Completed { processed_filename }) => ProcessOutcome::Processed {
                filename: processed_filename,
            },
            Ok(ProcessReply::Rejected { error }) => ProcessOutcome::Rejected { error },
            Err(err) => {
                session_warn!("processing failed: {err}");
                ProcessOutcome::Failed
            }
        }),
        BackendEvent::DownloadFinished { filename, result } => {
            Msg::DownloadFinished(match result {
                Ok(bytes) => DownloadOutcome::Fetched {
                    filename,
                    bytes: bytes.to_vec(),
                },
                Err(BackendError::Status(code)) => {
                    session_warn!("download of {filename} answered status {code}");
                    DownloadOutcome::Missing
                }
                Err(err) => {
                    session_warn!("download of {filename} failed: {err}");
                    DownloadOutcome::Failed
                }
            })
        }
    }
}

fn calendar_events(result: Result<Vec<EventRecord>, BackendError>) -> Vec<CalendarEvent> {
    let records = match result {
        Ok(records) => records,
        Err(err) => {
            session_warn!("loading calendar events failed: {err}");
            return Vec::new();
        }
    };
    let mut events = Vec::with_capacity(records.len());
    for record in records {
        match convert_event(record) {
            Ok(event) => events.push(event),
            Err(reason) => {
                session_warn!("discarding calendar reload: {reason}");
                return Vec::new();
            }
        }
    }
    events
}

fn tasks(result: Result<Vec<TaskRecord>, BackendError>) -> Vec<Task> {
    let records = match result {
        Ok(records) => records,
        Err(err) => {
            session_warn!("loading tasks failed: {err}");
            return Vec::new();
        }
    };
    let mut tasks = Vec::with_capacity(records.len());
    for record in records {
        match convert_task(record) {
            Ok(task) => tasks.push(task),
            Err(reason) => {
                session_warn!("discarding task reload: {reason}");
                return Vec::new();
            }
        }
    }
    tasks
}

fn pdf_lists(result: Result<PdfInventory, BackendError>) -> (Vec<PdfFile>, Vec<PdfFile>) {
    match result {
        Ok(inventory) => (files(inventory.uploaded), files(inventory.processed)),
        Err(err) => {
            session_warn!("loading PDF lists failed: {err}");
            (Vec::new(), Vec::new())
        }
    }
}

fn files(records: Vec<FileRecord>) -> Vec<PdfFile> {
    records
        .into_iter()
        .map(|record| PdfFile {
            filename: record.filename,
            size: record.size,
        })
        .collect()
}

fn convert_event(record: EventRecord) -> Result<CalendarEvent, String> {
    let start = parse_point_in_time(&record.start)
        .ok_or_else(|| format!("unparseable event start {:?}", record.start))?;
    Ok(CalendarEvent {
        id: record.id,
        summary: record.summary,
        start,
    })
}

fn convert_task(record: TaskRecord) -> Result<Task, String> {
    let created_at = parse_point_in_time(&record.created_at)
        .ok_or_else(|| format!("unparseable task created_at {:?}", record.created_at))?;
    Ok(Task {
        id: record.id,
        content: record.content,
        completed: record.completed,
        priority: record.priority,
        created_at,
    })
}

/// RFC 3339 datetimes, with a bare-date fallback for all-day calendar
/// entries.
fn parse_point_in_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
