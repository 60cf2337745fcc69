use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{AskRequest, AskResponse, CHAT_ENDPOINT};
use crate::utils::url::construct_api_url;

/// Failure talking to the answering service.
#[derive(Debug)]
pub enum AnswerError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The body was not the expected `{"answer": ...}` document.
    Decode(String),
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerError::Transport(err) => write!(f, "Request failed: {err}"),
            AnswerError::Status { status, body } => match summarize_error_body(body) {
                Some(summary) => write!(f, "Service returned {status}: {summary}"),
                None => write!(f, "Service returned {status}"),
            },
            AnswerError::Decode(reason) => write!(f, "Unexpected response body: {reason}"),
        }
    }
}

impl StdError for AnswerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AnswerError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

fn summarize_error_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let summary = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("detail")
            .or_else(|| value.pointer("/error/message"))
            .or_else(|| value.get("error"))
            .or_else(|| value.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_owned),
        Err(_) => Some(trimmed.to_string()),
    };

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// The upstream that turns a question into one text answer.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, question: &str, conversation_id: &str) -> Result<String, AnswerError>;
}

/// [`AnswerService`] backed by the HTTP chat endpoint.
#[derive(Clone)]
pub struct HttpAnswerService {
    client: reqwest::Client,
    chat_url: String,
}

impl HttpAnswerService {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, AnswerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AnswerError::Transport)?;
        Ok(Self {
            client,
            chat_url: construct_api_url(api_url, CHAT_ENDPOINT),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str, conversation_id: &str) -> Result<String, AnswerError> {
        let request = AskRequest {
            question: question.to_string(),
            conversation_id: conversation_id.to_string(),
        };

        debug!(url = %self.chat_url, conversation_id, "sending question");
        let response = self
            .client
            .post(&self.chat_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(AnswerError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(AnswerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(AnswerError::Transport)?;
        let parsed: AskResponse =
            serde_json::from_str(&body).map_err(|err| AnswerError::Decode(err.to_string()))?;
        Ok(parsed.answer)
    }
}

/// Conversation id sent with each question: the current Unix time in ms.
pub fn new_conversation_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerEvent {
    Answer(String),
    Failed(String),
}

pub struct RequestParams {
    pub service: Arc<dyn AnswerService>,
    pub question: String,
    pub conversation_id: String,
    pub cancel_token: CancellationToken,
    pub request_id: u64,
}

/// Runs questions on background tasks and reports fully received answers
/// back over a channel, tagged with the request id.
#[derive(Clone)]
pub struct RequestDispatcher {
    tx: mpsc::UnboundedSender<(AnswerEvent, u64)>,
}

impl RequestDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(AnswerEvent, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_request(&self, params: RequestParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RequestParams {
                service,
                question,
                conversation_id,
                cancel_token,
                request_id,
            } = params;

            tokio::select! {
                result = service.ask(&question, &conversation_id) => {
                    if cancel_token.is_cancelled() {
                        return;
                    }
                    let event = match result {
                        Ok(answer) => AnswerEvent::Answer(answer),
                        Err(err) => {
                            warn!(request_id, error = %err, "question failed");
                            AnswerEvent::Failed(err.to_string())
                        }
                    };
                    let _ = tx.send((event, request_id));
                }
                _ = cancel_token.cancelled() => {
                    debug!(request_id, "request cancelled");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAnswer(&'static str);

    #[async_trait]
    impl AnswerService for FixedAnswer {
        async fn ask(&self, _question: &str, _conversation_id: &str) -> Result<String, AnswerError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingService;

    #[async_trait]
    impl AnswerService for FailingService {
        async fn ask(&self, _question: &str, _conversation_id: &str) -> Result<String, AnswerError> {
            Err(AnswerError::Status {
                status: 500,
                body: r#"{"detail":"index   unavailable"}"#.to_string(),
            })
        }
    }

    struct NeverAnswers;

    #[async_trait]
    impl AnswerService for NeverAnswers {
        async fn ask(&self, _question: &str, _conversation_id: &str) -> Result<String, AnswerError> {
            std::future::pending().await
        }
    }

    fn params(service: Arc<dyn AnswerService>, request_id: u64) -> (RequestParams, CancellationToken) {
        let cancel_token = CancellationToken::new();
        (
            RequestParams {
                service,
                question: "How are sales?".to_string(),
                conversation_id: new_conversation_id(),
                cancel_token: cancel_token.clone(),
                request_id,
            },
            cancel_token,
        )
    }

    #[tokio::test]
    async fn delivers_answer_tagged_with_request_id() {
        let (dispatcher, mut rx) = RequestDispatcher::new();
        let (request, _token) = params(Arc::new(FixedAnswer("All good.")), 7);
        dispatcher.spawn_request(request);

        let (event, id) = rx.recv().await.expect("event");
        assert_eq!(id, 7);
        assert_eq!(event, AnswerEvent::Answer("All good.".to_string()));
    }

    #[tokio::test]
    async fn reports_failures_with_summary() {
        let (dispatcher, mut rx) = RequestDispatcher::new();
        let (request, _token) = params(Arc::new(FailingService), 1);
        dispatcher.spawn_request(request);

        let (event, _) = rx.recv().await.expect("event");
        assert_eq!(
            event,
            AnswerEvent::Failed("Service returned 500: index unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn cancelled_request_delivers_nothing() {
        let (dispatcher, mut rx) = RequestDispatcher::new();
        let (request, token) = params(Arc::new(NeverAnswers), 2);
        dispatcher.spawn_request(request);
        token.cancel();

        let received = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(received.is_err());
    }

    #[test]
    fn status_error_display_falls_back_to_plain_body() {
        let err = AnswerError::Status {
            status: 502,
            body: "Bad gateway\n".to_string(),
        };
        assert_eq!(err.to_string(), "Service returned 502: Bad gateway");

        let empty = AnswerError::Status {
            status: 404,
            body: "  ".to_string(),
        };
        assert_eq!(empty.to_string(), "Service returned 404");
    }

    #[test]
    fn chat_url_is_built_from_api_url() {
        let service =
            HttpAnswerService::new("http://localhost:8000/", Duration::from_secs(5)).expect("client");
        assert_eq!(service.chat_url(), "http://localhost:8000/api/v1/chat");
    }

    #[test]
    fn conversation_ids_are_numeric() {
        let id = new_conversation_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
