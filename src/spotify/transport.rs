use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result, spotify::auth::{AuthSession, TokenProvider}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fails with [`Error::Remote`] unless the status is 2xx.
    ///
    /// The message is taken from the `{"error": {"message": ...}}` envelope
    /// when the body has one, otherwise the raw body is used.
    pub fn error_for_status(self, context: &str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let message = serde_json::from_str::<ErrorEnvelope>(&self.body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| self.body.trim().to_string());

        Err(Error::Remote {
            context: context.to_string(),
            status: self.status,
            message,
        })
    }

    /// Checks the status and decodes the body as `T`.
    pub fn json<T: DeserializeOwned>(self, context: &str) -> Result<T> {
        let response = self.error_for_status(context)?;
        serde_json::from_str(&response.body).map_err(|e| Error::decode(context, e))
    }
}

/// Issues requests against the Web API.
///
/// Implementations attach whatever authorization the service needs. Any
/// status code is returned as a response; only failures to talk to the
/// service at all are errors here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// The reqwest transport. Every request carries a bearer token from the
/// session, which refreshes it first when it is stale.
pub struct HttpTransport<P: TokenProvider> {
    client: Client,
    session: AuthSession<P>,
}

impl<P: TokenProvider> HttpTransport<P> {
    pub fn new(session: AuthSession<P>) -> Self {
        Self {
            client: Client::new(),
            session,
        }
    }
}

#[async_trait]
impl<P: TokenProvider> Transport for HttpTransport<P> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let token = self.session.access_token().await?;

        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        log::debug!("{:?} {}", request.method, request.url);
        let response = builder.bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::trace!("{} {} -> {}", request.url, status, body);

        Ok(ApiResponse { status, body })
    }
}
