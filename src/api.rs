use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::{Value, json};

use crate::errors::{CliError, with_debug_hint};
use crate::parse::response::extract_reply;

/// Anything that can answer a question for the session controller.
pub trait ChatBackend {
    fn ask(&self, question: &str) -> impl Future<Output = Result<ChatReply, CliError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub elapsed_ms: u128,
}

impl ApiClient {
    /// `timeout_ms == 0` leaves the request unbounded.
    pub fn new(base_url: String, timeout_ms: u64, debug: bool) -> Result<Self, CliError> {
        let mut builder = Client::builder();
        if timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url,
            debug,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, CliError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "POST");

        let resp = self.client.post(url).json(body).send().await.map_err(|err| {
            let message = if err.is_timeout() {
                "Request timed out.".to_string()
            } else {
                format!("Network request failed: {err}")
            };
            CliError::Network(with_debug_hint(&message, self.debug))
        })?;

        // The status line is deliberately ignored; only the body shape matters.
        let status = resp.status();
        let text = resp.text().await?;
        serde_json::from_str::<Value>(&text).map_err(|err| {
            tracing::warn!(status = status.as_u16(), "non-JSON body from {path}: {err}");
            CliError::Server(with_debug_hint(
                &format!("Response from {path} was not JSON (status {})", status.as_u16()),
                self.debug,
            ))
        })
    }
}

impl ChatBackend for ApiClient {
    async fn ask(&self, question: &str) -> Result<ChatReply, CliError> {
        let started = Instant::now();
        let payload = self
            .post_json("/chat", &json!({ "question": question }))
            .await?;
        let elapsed_ms = started.elapsed().as_millis();

        let text = extract_reply(&payload).unwrap_or_else(|| {
            tracing::warn!("chat response has no usable `response` field");
            String::new()
        });
        tracing::info!(elapsed_ms, chars = text.len(), "chat reply received");
        Ok(ChatReply { text, elapsed_ms })
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://h:8000/", "/chat"), "http://h:8000/chat");
        assert_eq!(join_url("http://h:8000", "chat"), "http://h:8000/chat");
        assert_eq!(join_url("http://h", "https://o/chat"), "https://o/chat");
    }

    #[tokio::test]
    async fn ask_posts_question_and_reads_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "question": "  where is ECSS?" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "Building ECSS." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), 0, true).unwrap();
        let reply = client.ask("  where is ECSS?").await.unwrap();
        assert_eq!(reply.text, "Building ECSS.");
    }

    #[tokio::test]
    async fn status_code_is_not_inspected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "response": "still here" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), 0, true).unwrap();
        let reply = client.ask("hi").await.unwrap();
        assert_eq!(reply.text, "still here");
    }

    #[tokio::test]
    async fn missing_response_field_is_blank() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "x" })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), 0, true).unwrap();
        let reply = client.ask("hi").await.unwrap();
        assert_eq!(reply.text, "");
    }

    #[tokio::test]
    async fn numeric_response_is_shown_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": 42 })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), 0, true).unwrap();
        let reply = client.ask("how many?").await.unwrap();
        assert_eq!(reply.text, "42");
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), 0, true).unwrap();
        let err = client.ask("hi").await.unwrap_err();
        assert!(matches!(err, CliError::Server(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Port 9 (discard) is closed on test machines.
        let client = ApiClient::new("http://127.0.0.1:9".to_string(), 2_000, false).unwrap();
        let err = client.ask("hi").await.unwrap_err();
        assert!(matches!(err, CliError::Network(_)));
        assert!(err.to_string().contains("--debug"));
    }
}
