//! Transport abstraction for JSON-RPC.
//!
//! A transport posts one JSON payload and returns the decoded JSON response.
//! It does not interpret the response: a node-reported `error` field comes
//! back as a normal value and is handled by [`RpcNode`](crate::RpcNode).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::error::{NodeError, Result};

/// Transport trait for posting JSON-RPC payloads.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Post `payload` and return the response body.
    async fn post(&self, payload: &Value) -> Result<Value>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Box<T> {
    async fn post(&self, payload: &Value) -> Result<Value> {
        (**self).post(payload).await
    }
}

/// Connection options for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Node RPC endpoint.
    pub url: String,

    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,

    /// Whole-request timeout. No timeout when `None`.
    pub timeout: Option<Duration>,
}

impl HttpOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// JSON over HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Transport with default options.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_options(HttpOptions::new(url))
    }

    pub fn with_options(options: HttpOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| NodeError::Transport(format!("invalid header name {name:?}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| NodeError::Transport(format!("invalid value for header {name}: {e}")))?;
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: options.url,
        })
    }

    /// The endpoint this transport posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(&self, payload: &Value) -> Result<Value> {
        let response = self.client.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::Transport(format!(
                "request to {} failed with status {status}",
                self.url
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| NodeError::InvalidResponse(e.to_string()))
    }
}

/// Tries each transport in order until one answers.
///
/// Only transport-level failures move on to the next endpoint; an answer
/// carrying a node `error` is an answer.
pub struct FailoverTransport {
    transports: Vec<Box<dyn RpcTransport>>,
}

impl FailoverTransport {
    /// Requires at least two transports.
    pub fn new(transports: Vec<Box<dyn RpcTransport>>) -> Result<Self> {
        if transports.len() < 2 {
            return Err(NodeError::Transport(format!(
                "failover needs at least two transports, got {}",
                transports.len()
            )));
        }
        Ok(Self { transports })
    }

    /// One [`HttpTransport`] per URL, all sharing the same timeout.
    pub fn http(urls: &[&str], timeout: Duration) -> Result<Self> {
        let transports = urls
            .iter()
            .map(|url| {
                HttpTransport::with_options(HttpOptions::new(*url).timeout(timeout))
                    .map(|t| Box::new(t) as Box<dyn RpcTransport>)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(transports)
    }

    pub fn len(&self) -> usize {
        self.transports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }
}

#[async_trait]
impl RpcTransport for FailoverTransport {
    async fn post(&self, payload: &Value) -> Result<Value> {
        let mut last_error = NodeError::Transport("no transport attempted".into());

        for (attempt, transport) in self.transports.iter().enumerate() {
            match transport.post(payload).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(attempt, error = %e, "rpc transport failed");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct Fixed {
        response: Option<Value>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RpcTransport for Fixed {
        async fn post(&self, _payload: &Value) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or_else(|| NodeError::Transport("down".into()))
        }
    }

    fn fixed(response: Option<Value>, calls: &Arc<AtomicUsize>) -> Box<dyn RpcTransport> {
        Box::new(Fixed {
            response,
            calls: Arc::clone(calls),
        })
    }

    /// Serve one HTTP response on a local port and return the URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_failover_requires_two() {
        let calls = Arc::new(AtomicUsize::new(0));
        assert!(FailoverTransport::new(vec![fixed(None, &calls)]).is_err());
        assert!(FailoverTransport::new(vec![]).is_err());
    }

    #[tokio::test]
    async fn test_failover_uses_first_answer() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let failover = FailoverTransport::new(vec![
            fixed(Some(json!({"ok": 1})), &first),
            fixed(Some(json!({"ok": 2})), &second),
        ])
        .unwrap();

        assert_eq!(failover.post(&json!({})).await.unwrap(), json!({"ok": 1}));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failover_skips_failed_transport() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let failover = FailoverTransport::new(vec![
            fixed(None, &first),
            fixed(Some(json!({"error": "Account not found"})), &second),
        ])
        .unwrap();

        // a node error is still an answer
        let response = failover.post(&json!({})).await.unwrap();
        assert_eq!(response["error"], "Account not found");
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failover_all_failed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let failover =
            FailoverTransport::new(vec![fixed(None, &calls), fixed(None, &calls)]).unwrap();
        assert!(matches!(
            failover.post(&json!({})).await,
            Err(NodeError::Transport(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_roundtrip() {
        let url = serve_once("200 OK", r#"{"count":"42"}"#).await;
        let transport = HttpTransport::with_options(
            HttpOptions::new(url).header("Authorization", "secret"),
        )
        .unwrap();
        let response = transport
            .post(&json!({"action": "block_count"}))
            .await
            .unwrap();
        assert_eq!(response, json!({"count": "42"}));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let transport = HttpTransport::new(url).unwrap();
        assert!(matches!(
            transport.post(&json!({})).await,
            Err(NodeError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_http_non_json_body() {
        let url = serve_once("200 OK", "not json").await;
        let transport = HttpTransport::new(url).unwrap();
        assert!(matches!(
            transport.post(&json!({})).await,
            Err(NodeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let options = HttpOptions::new("http://127.0.0.1:1").header("bad header", "x");
        assert!(HttpTransport::with_options(options).is_err());
    }
}
