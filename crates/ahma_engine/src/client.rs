use std::time::Duration;

use bytes::Bytes;
use serde::Deserialize;

use crate::types::{
    BackendError, EventRecord, FileRecord, PdfInventory, ProcessReply, TaskId, TaskRecord,
    UploadReply,
};

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// `max_results` sent with calendar listing calls.
    pub calendar_window: usize,
    /// `limit` sent with task listing calls.
    pub task_window: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            calendar_window: 5,
            task_window: 10,
        }
    }
}

/// One method per backend capability. The production implementation is
/// [`ReqwestBackend`]; tests substitute their own.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn send_chat(&self, message: &str) -> Result<Option<String>, BackendError>;
    async fn calendar_events(&self) -> Result<Vec<EventRecord>, BackendError>;
    async fn tasks(&self) -> Result<Vec<TaskRecord>, BackendError>;
    async fn complete_task(&self, task_id: TaskId) -> Result<bool, BackendError>;
    async fn pdf_inventory(&self) -> Result<PdfInventory, BackendError>;
    async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReply, BackendError>;
    async fn process_pdf(
        &self,
        filename: &str,
        form_type: &str,
    ) -> Result<ProcessReply, BackendError>;
    async fn download_pdf(&self, filename: &str) -> Result<Bytes, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

// Error replies from the backend are JSON envelopes carried on non-2xx
// statuses, so JSON endpoints parse the body whatever the status says.
// Only the raw download checks the status line.
#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn send_chat(&self, message: &str) -> Result<Option<String>, BackendError> {
        let envelope: ChatEnvelope = self
            .client
            .post(self.endpoint("/api/ahma/chat"))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(envelope.response)
    }

    async fn calendar_events(&self) -> Result<Vec<EventRecord>, BackendError> {
        let envelope: EventsEnvelope = self
            .client
            .get(self.endpoint("/api/google-calendar/events"))
            .query(&[("max_results", self.settings.calendar_window)])
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(envelope.events)
    }

    async fn tasks(&self) -> Result<Vec<TaskRecord>, BackendError> {
        let envelope: TasksEnvelope = self
            .client
            .get(self.endpoint("/api/todoist/tasks"))
            .query(&[("limit", self.settings.task_window)])
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(envelope.tasks)
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<bool, BackendError> {
        let envelope: AckEnvelope = self
            .client
            .post(self.endpoint(&format!("/api/todoist/tasks/{task_id}/complete")))
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(envelope.success)
    }

    async fn pdf_inventory(&self) -> Result<PdfInventory, BackendError> {
        let envelope: PdfListEnvelope = self
            .client
            .get(self.endpoint("/api/pdf/list"))
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        if !envelope.success {
            return Ok(PdfInventory::default());
        }
        Ok(PdfInventory {
            uploaded: envelope.uploaded_files,
            processed: envelope.processed_files,
        })
    }

    async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReply, BackendError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(|err| BackendError::Network(err.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let envelope: UploadEnvelope = self
            .client
            .post(self.endpoint("/api/pdf/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        if envelope.success {
            Ok(UploadReply::Accepted {
                filename: envelope.filename.unwrap_or_default(),
            })
        } else {
            Ok(UploadReply::Rejected {
                error: envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }

    async fn process_pdf(
        &self,
        filename: &str,
        form_type: &str,
    ) -> Result<ProcessReply, BackendError> {
        let envelope: ProcessEnvelope = self
            .client
            .post(self.endpoint("/api/pdf/process"))
            .json(&serde_json::json!({ "filename": filename, "form_type": form_type }))
            .send()
            .await
            .map_err(map_reqwest_error)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        if envelope.success {
            Ok(ProcessReply::Completed {
                processed_filename: envelope.processed_filename.unwrap_or_default(),
            })
        } else {
            Ok(ProcessReply::Rejected {
                error: envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }

    async fn download_pdf(&self, filename: &str) -> Result<Bytes, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/pdf/download/{filename}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        response.bytes().await.map_err(map_reqwest_error)
    }
}

#[derive(Debug, Deserialize)]
struct ChatEnvelope {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct TasksEnvelope {
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct PdfListEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    uploaded_files: Vec<FileRecord>,
    #[serde(default)]
    processed_files: Vec<FileRecord>,
}

#[derive(Debug, Deserialize)]
struct UploadEnvelope {
    #[serde(default)]
    success: bool,
    filename: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProcessEnvelope {
    #[serde(default)]
    success: bool,
    processed_filename: Option<String>,
    error: Option<String>,
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::Timeout;
    }
    if err.is_decode() {
        return BackendError::Malformed(err.to_string());
    }
    BackendError::Network(err.to_string())
}
