//! Labeling backend client
//!
//! `Backend` is the seam between the controller and the network. The HTTP
//! implementation talks to the session API; tests swap in an in-memory fake.

use crate::constants::*;
use crate::label::Label;
use crate::types::*;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

/// Every way a backend call can fail. Callers treat them uniformly.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("unexpected response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("invalid base64 image: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid image data: {0}")]
    Image(#[from] image::ImageError),
}

/// Remote labeling session. Session state (which image is current) lives
/// entirely on the other side.
pub trait Backend: Send + Sync + 'static {
    fn current_image(&self) -> impl Future<Output = Result<CurrentImageResponse, ApiError>> + Send;

    fn submit_label(
        &self,
        label: Label,
    ) -> impl Future<Output = Result<SubmitLabelResponse, ApiError>> + Send;

    fn history(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, ApiError>> + Send;

    fn accuracy_scores(&self) -> impl Future<Output = Result<Vec<f64>, ApiError>> + Send;
}

/// reqwest-backed client. No timeouts and no retries: a hung call stays pending.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, ApiError> {
        debug!(endpoint = path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::Network)?;
        read_json(path, response).await
    }
}

/// Any non-2xx status is a failure. The backend's `{"error": ...}` body, when
/// present, only feeds the error detail.
async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let detail = serde_json::from_slice::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown status").to_string());
        return Err(ApiError::Status { status: status.as_u16(), detail });
    }

    let body = response.bytes().await.map_err(ApiError::Network)?;
    debug!(endpoint, bytes = body.len(), "Response received");
    Ok(serde_json::from_slice(&body)?)
}

impl Backend for HttpBackend {
    fn current_image(&self) -> impl Future<Output = Result<CurrentImageResponse, ApiError>> + Send {
        self.get_json(CURRENT_IMAGE_PATH)
    }

    fn submit_label(
        &self,
        label: Label,
    ) -> impl Future<Output = Result<SubmitLabelResponse, ApiError>> + Send {
        async move {
            debug!(endpoint = SUBMIT_LABEL_PATH, label = %label, value = label.value(), "POST");
            let response = self
                .client
                .post(self.url(SUBMIT_LABEL_PATH))
                .json(&SubmitLabelRequest { label: label.as_str() })
                .send()
                .await
                .map_err(ApiError::Network)?;
            read_json(SUBMIT_LABEL_PATH, response).await
        }
    }

    fn history(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, ApiError>> + Send {
        self.get_json(HISTORY_PATH)
    }

    fn accuracy_scores(&self) -> impl Future<Output = Result<Vec<f64>, ApiError>> + Send {
        self.get_json(ACCURACY_SCORES_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve a single canned response; the raw request comes back on the channel.
    fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let _ = stream.write_all(response.as_bytes());
                let _ = tx.send(request);
            }
        });
        (format!("http://{}", addr), rx)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap_or(0);
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    #[tokio::test]
    async fn current_image_reads_payload() {
        let (url, rx) = serve_once("200 OK", r#"{"image": "iVBORw0KGgo="}"#);
        let backend = HttpBackend::new(&url);
        let resp = backend.current_image().await.unwrap();
        assert_eq!(resp.image, "iVBORw0KGgo=");
        let request = rx.recv().unwrap();
        assert!(request.starts_with("GET /api/current-image HTTP/1.1"));
    }

    #[tokio::test]
    async fn submit_label_posts_string_label_as_json() {
        let (url, rx) = serve_once("200 OK", r#"{"success": true, "message": "ok"}"#);
        let backend = HttpBackend::new(&url);
        let label = Label::parse(" 7 ").unwrap();
        let resp = backend.submit_label(label).await.unwrap();
        assert_eq!(resp.message, "ok");

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /api/submit-label HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"label":"7"}"#));
    }

    #[tokio::test]
    async fn history_and_scores_parse_sequences() {
        let (url, _rx) = serve_once("200 OK", r#"[{"image": "AA==", "label": 4}]"#);
        let history = HttpBackend::new(&url).history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].label, 4);

        let (url, _rx) = serve_once("200 OK", "[0.5, 0.75, 0.8]");
        let scores = HttpBackend::new(&url).accuracy_scores().await.unwrap();
        assert_eq!(scores, vec![0.5, 0.75, 0.8]);
    }

    #[tokio::test]
    async fn non_success_status_carries_backend_error_text() {
        let (url, _rx) = serve_once("404 Not Found", r#"{"error": "No accuracy scores available."}"#);
        let err = HttpBackend::new(&url).accuracy_scores().await.unwrap_err();
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "No accuracy scores available.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_without_json_uses_reason() {
        let (url, _rx) = serve_once("500 Internal Server Error", "<html>boom</html>");
        let err = HttpBackend::new(&url).current_image().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, ref detail } if detail == "Internal Server Error"));
    }

    #[tokio::test]
    async fn wrong_shape_is_a_body_error() {
        let (url, _rx) = serve_once("200 OK", r#"{"img": "nope"}"#);
        let err = HttpBackend::new(&url).current_image().await.unwrap_err();
        assert!(matches!(err, ApiError::Body(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = HttpBackend::new(&format!("http://{addr}")).history().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let backend = HttpBackend::new(" http://localhost:5000/ ");
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url(HISTORY_PATH), "http://localhost:5000/api/history");
    }
}
