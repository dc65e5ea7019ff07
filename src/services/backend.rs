//! HTTP transport shared by the downstream service clients
//!
//! Transport failures are classified here, once: a timeout becomes
//! `UpstreamTimeout`, a refused or failed connection `UpstreamUnavailable`, and
//! anything else `Internal`. Nothing is retried.

use axum::{
    body::Bytes,
    http::{header::AUTHORIZATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Raw answer from a downstream service
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: StatusCode, body: Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Detail to show the client for an error answer: the `detail` field of a
    /// JSON body when there is one, the raw text otherwise. Never fails.
    pub fn detail(&self) -> Value {
        match serde_json::from_slice::<Value>(&self.body) {
            Ok(Value::Object(mut map)) => match map.remove("detail") {
                Some(detail) => detail,
                None => Value::String(self.text()),
            },
            _ => Value::String(self.text()),
        }
    }

    /// Rejection carrying this response's status and extracted detail
    pub fn rejected(&self) -> AppError {
        AppError::UpstreamRejected {
            status: self.status,
            detail: self.detail(),
        }
    }

    /// Decode a JSON body
    pub fn json_body(&self, service: &str) -> AppResult<Value> {
        serde_json::from_slice(&self.body).map_err(|e| {
            AppError::UpstreamContractViolation(format!(
                "{} service returned a non-JSON body: {}",
                service, e
            ))
        })
    }

    /// Relay a response as-is: success keeps status and body, anything else
    /// becomes an `UpstreamRejected` with the backend's status. An empty
    /// success body is relayed as no body.
    pub fn into_forwarded(self, service: &str) -> AppResult<Forwarded> {
        if !self.status.is_success() {
            tracing::warn!("{} service answered {}", service, self.status);
            return Err(self.rejected());
        }

        let body = if self.body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            self.json_body(service)?
        };
        Ok(Forwarded {
            status: self.status,
            body,
        })
    }
}

/// A successful downstream answer relayed to the client.
///
/// `Value::Null` stands for a backend answer without a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Forwarded {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for Forwarded {
    fn into_response(self) -> Response {
        if self.body.is_null() {
            return self.status.into_response();
        }
        (self.status, Json(self.body)).into_response()
    }
}

/// Base address plus shared client for one downstream service
#[derive(Clone)]
pub struct HttpBackend {
    name: &'static str,
    base_url: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(name: &'static str, base_url: Option<String>, client: reqwest::Client) -> Self {
        Self {
            name,
            base_url,
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Build the client every backend shares; the timeout bounds each whole call.
    pub fn client(timeout: Duration) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
    }

    fn url(&self, path: &str) -> AppResult<String> {
        let base = self.base_url.as_deref().ok_or_else(|| {
            AppError::Configuration(format!("{}_SERVICE_URL not set", self.name.to_uppercase()))
        })?;
        Ok(format!("{}{}", base, path))
    }

    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        authorization: Option<&str>,
    ) -> AppResult<BackendResponse> {
        let url = self.url(path)?;
        tracing::debug!("GET {} ({} service)", url, self.name);

        let mut request = self.client.get(&url).query(query);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        self.send(request).await
    }

    pub async fn post_json<T>(
        &self,
        path: &str,
        body: &T,
        authorization: Option<&str>,
    ) -> AppResult<BackendResponse>
    where
        T: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        tracing::debug!("POST {} ({} service)", url, self.name);

        let mut request = self.client.post(&url).json(body);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<BackendResponse> {
        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!("{} service responded with {}", self.name, status);
        Ok(BackendResponse { status, body })
    }

    fn classify(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            tracing::warn!("{} service timed out: {}", self.name, error);
            AppError::UpstreamTimeout(self.name)
        } else if error.is_connect() {
            tracing::warn!("{} service unreachable: {}", self.name, error);
            AppError::UpstreamUnavailable(self.name)
        } else {
            AppError::Internal(format!("{} service call failed: {}", self.name, error))
        }
    }
}
