use crate::msg::{ChatOutcome, DownloadOutcome, ProcessOutcome, UploadOutcome};
use crate::state::Sender;
use crate::{AppState, Effect, Msg};

pub const WELCOME_NOTICE: &str =
    "Hello Hazel! I'm AHMA, your Advanced Healthcare Management Assistant. How can I assist you today?";
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I encountered an error.";
pub const CHAT_FAILED_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const INVALID_FILE_NOTICE: &str = "❌ Please select a valid PDF file.";
pub const UPLOAD_FAILED_NOTICE: &str = "❌ Error uploading PDF. Please try again.";
pub const PROCESS_FAILED_NOTICE: &str = "❌ Error processing PDF. Please try again.";
pub const DOWNLOAD_MISSING_NOTICE: &str = "❌ Error downloading PDF. File may not exist.";
pub const DOWNLOAD_FAILED_NOTICE: &str = "❌ Error downloading PDF. Please try again.";
pub const TASK_COMPLETED_NOTICE: &str = "Task completed successfully!";
pub const INSURANCE_GREETING: &str =
    "Insurance Assistant: Hello! I can help you with insurance claims, policy questions, and coverage information. What would you like to know?";

/// Media type accepted for uploads, checked before any network call.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
/// Form type sent with fill requests until the UI grows a selector.
pub const DEFAULT_FORM_TYPE: &str = "auto";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            state.push_notice(WELCOME_NOTICE);
            vec![
                Effect::LoadCalendarEvents,
                Effect::LoadTasks,
                Effect::LoadPdfList,
            ]
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendClicked => {
            // One exchange at a time; the buffer is kept verbatim until the
            // request is actually dispatched.
            if state.input().trim().is_empty() || state.is_awaiting_reply() {
                return (state, Vec::new());
            }
            let message = state.take_input();
            state.push_message(Sender::User, message.clone());
            state.begin_exchange();
            vec![Effect::SendChat { message }]
        }
        Msg::ChatExchangeFinished(outcome) => {
            let reply = match outcome {
                ChatOutcome::Reply(text) => text,
                ChatOutcome::MissingReply => CHAT_FALLBACK_REPLY.to_string(),
                ChatOutcome::Failed => CHAT_FAILED_REPLY.to_string(),
            };
            state.push_message(Sender::Assistant, reply);
            state.end_exchange();
            Vec::new()
        }
        Msg::FileChosen {
            filename,
            media_type,
            bytes,
        } => {
            if media_type != PDF_MEDIA_TYPE {
                state.push_notice(INVALID_FILE_NOTICE);
                return (state, Vec::new());
            }
            vec![Effect::UploadPdf { filename, bytes }]
        }
        Msg::UploadFinished(outcome) => match outcome {
            UploadOutcome::Accepted { filename } => {
                state.push_notice(format!("✅ PDF uploaded successfully: {filename}"));
                vec![Effect::LoadPdfList]
            }
            UploadOutcome::Rejected { error } => {
                state.push_notice(format!("❌ Upload failed: {error}"));
                Vec::new()
            }
            UploadOutcome::Failed => {
                state.push_notice(UPLOAD_FAILED_NOTICE);
                Vec::new()
            }
        },
        Msg::ProcessClicked { filename } => {
            // Single-flight: the fill service handles one request at a time,
            // whichever file it is for.
            if state.is_processing_pdf() {
                return (state, Vec::new());
            }
            state.begin_processing();
            vec![Effect::ProcessPdf {
                filename,
                form_type: DEFAULT_FORM_TYPE.to_string(),
            }]
        }
        Msg::ProcessFinished(outcome) => {
            let effects = match outcome {
                ProcessOutcome::Processed { filename } => {
                    state.push_notice(format!(
                        "✅ PDF processed successfully! Filled form saved as: {filename}"
                    ));
                    vec![Effect::LoadPdfList]
                }
                ProcessOutcome::Rejected { error } => {
                    state.push_notice(format!("❌ Processing failed: {error}"));
                    Vec::new()
                }
                ProcessOutcome::Failed => {
                    state.push_notice(PROCESS_FAILED_NOTICE);
                    Vec::new()
                }
            };
            state.end_processing();
            effects
        }
        Msg::DownloadClicked { filename } => vec![Effect::DownloadPdf { filename }],
        Msg::DownloadFinished(outcome) => match outcome {
            DownloadOutcome::Fetched { filename, bytes } => {
                // Download never mutates server state; no list reload.
                vec![Effect::SaveFile { filename, bytes }]
            }
            DownloadOutcome::Missing => {
                state.push_notice(DOWNLOAD_MISSING_NOTICE);
                Vec::new()
            }
            DownloadOutcome::Failed => {
                state.push_notice(DOWNLOAD_FAILED_NOTICE);
                Vec::new()
            }
        },
        Msg::CompleteTaskClicked { task_id } => vec![Effect::CompleteTask { task_id }],
        Msg::CompleteTaskFinished { success } => {
            if success {
                state.push_notice(TASK_COMPLETED_NOTICE);
                vec![Effect::LoadTasks]
            } else {
                // Completion failures are logged by the shell; the timeline
                // stays quiet, unlike every other action.
                Vec::new()
            }
        }
        Msg::InsuranceChatClicked => {
            state.push_notice(INSURANCE_GREETING);
            Vec::new()
        }
        Msg::CalendarLoaded(events) => {
            state.replace_calendar_events(events);
            Vec::new()
        }
        Msg::TasksLoaded(tasks) => {
            state.replace_tasks(tasks);
            Vec::new()
        }
        Msg::PdfListLoaded {
            uploaded,
            processed,
        } => {
            state.replace_pdf_lists(uploaded, processed);
            Vec::new()
        }
        Msg::RefreshTick => vec![Effect::LoadTasks],
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
