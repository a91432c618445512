use std::future::Future;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    ///
    /// `body` is the raw response text, left unparsed so callers can classify it.
    #[error("{status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A success response arrived but its body isn't JSON.
    #[error("invalid response body: {0}")]
    Body(reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("decode error: {0}")]
    Decode(#[from] api_types::DecodeError),
}

impl ClientError {
    /// HTTP status of the failure, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Raw JSON access to the REST backend.
///
/// Paths are relative to the backend's base URL (`entries`, `categories/3`).
pub trait Transport {
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn post(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    /// The response body of a `PUT` is never read.
    fn put(&self, path: &str, body: &Value) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        // `Url::join` drops the last segment unless the base ends with a slash.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|err| ClientError::InvalidUrl(format!("invalid base_url: {err}")))?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::InvalidUrl(format!("invalid path {path}: {err}")))
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let res = req.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }
}

impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "GET");
        let res = self.send(self.http.get(endpoint)).await?;
        res.json::<Value>().await.map_err(ClientError::Body)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "POST");
        let res = self.send(self.http.post(endpoint).json(body)).await?;
        res.json::<Value>().await.map_err(ClientError::Body)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "PUT");
        self.send(self.http.put(endpoint).json(body)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "DELETE");
        self.send(self.http.delete(endpoint)).await?;
        Ok(())
    }
}
