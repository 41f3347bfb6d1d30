use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::api::request::{ApiRequest, RawResponse};
use crate::config::Config;
use crate::error::IgError;

/// Sends assembled requests to the platform.
///
/// Transport faults and statuses are reported as they are; nothing here
/// retries.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, IgError>> + Send;
}

/// [`Transport`] backed by a cookie-keeping `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(cfg: &Config) -> Result<Self, IgError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let client = builder.build()?;
        let base_url = Url::parse(&cfg.api_url)?;

        Ok(Self {
            client,
            base_url,
            auth_token: None,
        })
    }

    /// Token sent as `Authorization` on requests that need auth.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn endpoint_url(&self, request: &ApiRequest) -> Result<Url, IgError> {
        let mut url = self.base_url.join(&request.path)?;
        if request.signed_get {
            let body = signed_body(&request.params)?;
            url.query_pairs_mut().append_pair("signed_body", &body);
        } else if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.iter());
        }
        Ok(url)
    }
}

/// Unsigned `signed_body` form: `SIGNATURE.<json>`.
fn signed_body(params: &[(String, String)]) -> Result<String, IgError> {
    let map: Map<String, Value> = params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Ok(format!("SIGNATURE.{}", serde_json::to_string(&map)?))
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, IgError> {
        let url = self.endpoint_url(&request)?;
        let mut builder = self.client.request(request.method(), url);

        if request.needs_auth
            && let Some(token) = self.auth_token.as_deref()
        {
            builder = builder.header(AUTHORIZATION, format!("Bearer IGT:2:{token}"));
        }

        if !request.files.is_empty() {
            let mut form = Form::new();
            for (key, value) in &request.posts {
                form = form.text(key.clone(), value.clone());
            }
            for file in &request.files {
                let bytes = tokio::fs::read(&file.path).await?;
                form = form.part(
                    file.field.clone(),
                    Part::bytes(bytes).file_name(file.file_name.clone()),
                );
            }
            builder = builder.multipart(form);
        } else if !request.posts.is_empty() {
            builder = builder.form(&request.posts);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}
