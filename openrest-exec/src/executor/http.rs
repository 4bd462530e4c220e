use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use openrest_core::HttpVerb;

use super::cancel::CancelSignal;
use super::request::RestRequest;
use super::response::body_text;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("request cancelled")]
    Cancelled,
    #[error("http error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestResponse {
    pub status: u16,
    pub status_description: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Server-provided error text for unsuccessful responses.
    pub error_message: Option<String>,
}

impl RestResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_description: canonical_reason(status).to_string(),
            headers: BTreeMap::new(),
            body: body.into(),
            error_message: None,
        }
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A client bound to one server base URL.
#[async_trait]
pub trait HttpClient: Send + Sync {
    fn base_url(&self) -> &str;

    async fn execute(
        &self,
        request: RestRequest,
        cancel: &CancelSignal,
    ) -> Result<RestResponse, HttpError>;
}

pub trait HttpClientFactory: Send + Sync {
    fn create_client(&self, base_url: &str) -> Arc<dyn HttpClient>;
}

/// Hands out clients that share one connection pool.
#[derive(Clone)]
pub struct ReqwestClientFactory {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for ReqwestClientFactory {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("openrest/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to a default HTTP client");
                reqwest::Client::new()
            });
        Self {
            client,
            timeout: Duration::from_secs(100),
        }
    }
}

impl ReqwestClientFactory {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl HttpClientFactory for ReqwestClientFactory {
    fn create_client(&self, base_url: &str) -> Arc<dyn HttpClient> {
        Arc::new(ReqwestHttpClient {
            client: self.client.clone(),
            base_url: base_url.to_string(),
            timeout: self.timeout,
        })
    }
}

pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(
        &self,
        request: RestRequest,
        cancel: &CancelSignal,
    ) -> Result<RestResponse, HttpError> {
        let url = request.url(&self.base_url).map_err(HttpError::InvalidRequest)?;
        let mut rb = self
            .client
            .request(method(request.method), url)
            .timeout(self.timeout);
        for (name, value) in request.headers() {
            rb = rb.header(name, value);
        }
        if let Some(body) = &request.body {
            rb = rb.json(body);
        }

        let send = async {
            let resp = rb.send().await.map_err(map_reqwest_error)?;
            let status = resp.status();
            let mut headers = BTreeMap::new();
            for (k, v) in resp.headers().iter() {
                if let Ok(s) = v.to_str() {
                    headers.insert(k.to_string(), s.to_string());
                }
            }
            let body = resp.bytes().await.map_err(map_reqwest_error)?.to_vec();
            let error_message = (!status.is_success()).then(|| body_text(&body));
            Ok::<_, HttpError>(RestResponse {
                status: status.as_u16(),
                status_description: status.canonical_reason().unwrap_or("").to_string(),
                headers,
                body,
                error_message,
            })
        };

        tokio::select! {
            result = send => result,
            _ = cancel.cancelled() => Err(HttpError::Cancelled),
        }
    }
}

fn method(verb: HttpVerb) -> reqwest::Method {
    match verb {
        HttpVerb::Get => reqwest::Method::GET,
        HttpVerb::Put => reqwest::Method::PUT,
        HttpVerb::Post => reqwest::Method::POST,
        HttpVerb::Delete => reqwest::Method::DELETE,
        HttpVerb::Options => reqwest::Method::OPTIONS,
        HttpVerb::Head => reqwest::Method::HEAD,
        HttpVerb::Patch => reqwest::Method::PATCH,
        HttpVerb::Trace => reqwest::Method::TRACE,
    }
}

fn canonical_reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    HttpError::Other(e.to_string())
}
