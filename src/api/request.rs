use reqwest::{Method, StatusCode};
use std::path::PathBuf;
use tracing::debug;

use crate::api::transport::Transport;
use crate::error::IgError;
use crate::types::{ApiResponse, ResponseStatus};

/// File attached to a multipart POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub field: String,
    pub path: PathBuf,
    pub file_name: String,
}

/// Fully assembled request, handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
    pub posts: Vec<(String, String)>,
    pub files: Vec<FileUpload>,
    pub signed_get: bool,
    pub needs_auth: bool,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            posts: Vec::new(),
            files: Vec::new(),
            signed_get: false,
            needs_auth: true,
        }
    }

    /// POST as soon as there is a form field or a file, GET otherwise.
    pub fn method(&self) -> Method {
        if self.posts.is_empty() && self.files.is_empty() {
            Method::GET
        } else {
            Method::POST
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        lookup(&self.params, key)
    }

    pub fn post(&self, key: &str) -> Option<&str> {
        lookup(&self.posts, key)
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Raw reply as seen by the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Accumulates the parts of one endpoint call, then dispatches it.
#[must_use]
pub struct Request<'t, T: Transport> {
    transport: &'t T,
    inner: ApiRequest,
}

impl<'t, T: Transport> Request<'t, T> {
    pub fn new(transport: &'t T, path: impl Into<String>) -> Self {
        Self {
            transport,
            inner: ApiRequest::new(path),
        }
    }

    pub fn add_param(mut self, key: &str, value: impl ToString) -> Self {
        self.inner.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn add_post(mut self, key: &str, value: impl ToString) -> Self {
        self.inner.posts.push((key.to_string(), value.to_string()));
        self
    }

    pub fn add_file(
        mut self,
        field: &str,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        self.inner.files.push(FileUpload {
            field: field.to_string(),
            path: path.into(),
            file_name: file_name.into(),
        });
        self
    }

    pub fn set_signed_get(mut self, signed: bool) -> Self {
        self.inner.signed_get = signed;
        self
    }

    pub fn set_needs_auth(mut self, needs_auth: bool) -> Self {
        self.inner.needs_auth = needs_auth;
        self
    }

    /// Send the request and parse the reply into `R`.
    pub async fn get_response<R: ApiResponse>(self) -> Result<R, IgError> {
        let method = self.inner.method();
        debug!(path = %self.inner.path, %method, "dispatching request");
        let raw = self.transport.execute(self.inner).await?;
        parse_response(raw)
    }
}

/// Map a raw reply onto `R`, turning error statuses into [`IgError`].
pub fn parse_response<R: ApiResponse>(raw: RawResponse) -> Result<R, IgError> {
    if !raw.status.is_success() {
        let message = serde_json::from_slice::<ResponseStatus>(&raw.body)
            .ok()
            .and_then(|s| s.message)
            .unwrap_or_else(|| {
                raw.status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        return Err(IgError::UpstreamStatus {
            status: raw.status,
            message,
        });
    }

    let resp: R = serde_json::from_slice(&raw.body)?;
    let envelope = resp.envelope();
    if !envelope.is_ok() {
        return Err(IgError::Endpoint {
            message: envelope
                .message
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(resp)
}
