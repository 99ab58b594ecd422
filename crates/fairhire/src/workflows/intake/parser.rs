use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::document::ParsedDocument;
use crate::config::ParserConfig;

/// A CV file as received from the uploader.
#[derive(Debug, Clone)]
pub struct CvUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Forwarded to the parser as the owning user.
    pub user_id: Option<String>,
}

/// Opaque collaborator turning an uploaded CV into a structured document.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, upload: CvUpload) -> Result<ParsedDocument, ParserError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("parser request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("parser rejected the upload ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("parse task {task_id} failed: {message}")]
    TaskFailed { task_id: String, message: String },
    #[error("parse task {task_id} still pending after {attempts} polls")]
    PollTimeout { task_id: String, attempts: u32 },
    #[error("invalid parser response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct TaskAccepted {
    task_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
    /// Any other label the service reports while work is still in flight.
    #[serde(other)]
    InProgress,
}

#[derive(Debug, Deserialize)]
struct TaskPoll {
    status: TaskStatus,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// [`DocumentParser`] talking to the parsing service over HTTP.
///
/// Uploads are submitted as background tasks; a synchronous `200` answer is
/// accepted too.
#[derive(Debug, Clone)]
pub struct HttpDocumentParser {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl HttpDocumentParser {
    pub fn new(config: &ParserConfig) -> Result<Self, ParserError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poll_interval: config.poll_interval,
            max_polls: config.max_polls,
        })
    }

    async fn submit(&self, upload: CvUpload) -> Result<(StatusCode, String), ParserError> {
        let url = format!("{}/parse/upload", self.base_url);
        let size = upload.bytes.len();

        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(user_id) = upload.user_id {
            form = form.text("user_id", user_id);
        }

        info!(url = %url, file = %upload.file_name, bytes = size, "submitting CV to parser");

        let response = self
            .client
            .post(&url)
            .query(&[("background", "true")])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn wait_for(&self, task_id: &str) -> Result<ParsedDocument, ParserError> {
        let url = format!("{}/parse/tasks/{}", self.base_url, task_id);

        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(ParserError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }

            let poll: TaskPoll = serde_json::from_str(&body)?;
            debug!(task_id, attempt, status = ?poll.status, "polled parse task");

            match poll.status {
                TaskStatus::Pending | TaskStatus::Running | TaskStatus::InProgress => continue,
                TaskStatus::Completed => {
                    let result = poll.result.unwrap_or(Value::Null);
                    return Ok(serde_json::from_value(result)?);
                }
                TaskStatus::Failed => {
                    return Err(ParserError::TaskFailed {
                        task_id: task_id.to_string(),
                        message: poll.error.unwrap_or_else(|| "unknown error".to_string()),
                    });
                }
            }
        }

        Err(ParserError::PollTimeout {
            task_id: task_id.to_string(),
            attempts: self.max_polls,
        })
    }
}

/// A synchronous answer is either `{"parsed": doc, ...}` or the bare document.
fn decode_document(body: &str) -> Result<ParsedDocument, ParserError> {
    let value: Value = serde_json::from_str(body)?;
    let document = match value {
        Value::Object(mut map) if map.contains_key("parsed") => {
            map.remove("parsed").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(document)?)
}

#[async_trait]
impl DocumentParser for HttpDocumentParser {
    async fn parse(&self, upload: CvUpload) -> Result<ParsedDocument, ParserError> {
        let (status, body) = self.submit(upload).await?;

        match status {
            StatusCode::OK => decode_document(&body),
            StatusCode::ACCEPTED => {
                let accepted: TaskAccepted = serde_json::from_str(&body)?;
                info!(task_id = %accepted.task_id, "parse task accepted");
                self.wait_for(&accepted.task_id).await
            }
            other => Err(ParserError::Rejected {
                status: other.as_u16(),
                body,
            }),
        }
    }
}
