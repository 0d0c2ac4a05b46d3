//! HTTP transport backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use url::Url;

use inkwell_core::ports::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};

use crate::error::InfraError;

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Origin the `/api/v1` paths are resolved against.
    pub base_url: String,
    pub timeout: Duration,
    /// Raw `Cookie` header value for an existing login session.
    pub session_cookie: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
            session_cookie: None,
        }
    }
}

impl HttpConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("INKWELL_BASE_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("INKWELL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            session_cookie: std::env::var("INKWELL_SESSION_COOKIE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Credentialed JSON transport.
///
/// Keeps a cookie jar so a session established by the backend sticks across
/// requests. Does not retry and does not look at status codes.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Url,
    session_cookie: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, InfraError> {
        let base = Url::parse(&config.base_url).map_err(|e| InfraError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| InfraError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base,
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|e| TransportError::Encode(format!("bad path '{}': {}", path, e)))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let url = self.resolve(&request.path)?;

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes =
                    serde_json::to_vec(&value).map_err(|e| TransportError::Encode(e.to_string()))?;
                builder.header(CONTENT_TYPE, "application/json").body(bytes)
            }
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::Encode(e.to_string()))?;
                builder.multipart(reqwest::multipart::Form::new().part(field, part))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
            .to_vec();

        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            status,
            "Response received"
        );
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Accept one connection, hand the raw request to the caller, reply with `response`.
    fn serve_once(response: &'static str) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .expect("set_read_timeout");

            let mut buf = Vec::new();
            let mut tmp = [0u8; 4096];
            loop {
                let n = match stream.read(&mut tmp) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&tmp[..n]);
                if request_complete(&buf) {
                    break;
                }
            }

            stream.write_all(response.as_bytes()).expect("write response");
            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= head_end + 4 + length
    }

    #[test]
    fn default_config_builds_client() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = HttpConfig {
            base_url: "not a url".to_string(),
            ..HttpConfig::default()
        };
        assert!(matches!(
            ReqwestTransport::new(&config),
            Err(InfraError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn sends_json_with_credentials_and_returns_raw_status() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 409 Conflict\r\nContent-Type: application/json\r\nContent-Length: 18\r\nConnection: close\r\n\r\n{\"error\":\"stale\"}\n",
        );
        let transport = ReqwestTransport::new(&HttpConfig {
            base_url,
            session_cookie: Some("session=abc123".to_string()),
            ..HttpConfig::default()
        })
        .expect("transport");

        let request = ApiRequest::new(Method::Patch, "/api/v1/post/42")
            .json(&serde_json::json!({"title": "Hello", "updated_on": "T1"}))
            .expect("json body");
        let response = transport.send(request).await.expect("response");

        assert_eq!(response.status, 409);
        assert!(!response.is_success());

        let raw = server.join().expect("server thread").to_lowercase();
        assert!(raw.starts_with("patch /api/v1/post/42 "), "request line: {raw:?}");
        assert!(raw.contains("content-type: application/json"));
        assert!(raw.contains("cookie: session=abc123"));
        assert!(raw.contains("\"updated_on\":\"t1\""));
    }

    #[tokio::test]
    async fn network_failure_is_a_transport_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("local addr")
        };
        let transport = ReqwestTransport::new(&HttpConfig {
            base_url: format!("http://{}", addr),
            timeout: Duration::from_secs(2),
            session_cookie: None,
        })
        .expect("transport");

        let err = transport
            .send(ApiRequest::new(Method::Get, "/api/v1/post/1"))
            .await
            .expect_err("nothing is listening");
        assert!(matches!(err, TransportError::Network(_)));
    }
}
