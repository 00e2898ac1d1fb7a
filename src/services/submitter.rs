// src/services/submitter.rs

//! Report submission service.
//!
//! Sends one multipart POST to `{origin}/reports` and interprets the answer.
//! There is no retry: the call either fully succeeds or fully fails.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, FormData, FormValue, ReportReceipt};
use crate::utils::http;

/// Status and raw body of a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an assembled payload to the backend.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Post `payload` to `url`.
    ///
    /// Returns `Err` only when no response was received.
    async fn post(&self, url: &Url, payload: &FormData) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: ReportTransport + ?Sized> ReportTransport for Arc<T> {
    async fn post(&self, url: &Url, payload: &FormData) -> Result<TransportResponse> {
        (**self).post(url, payload).await
    }
}

/// Multipart transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
        })
    }

    fn multipart(payload: &FormData) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in payload.entries() {
            form = match value {
                FormValue::Text(text) => form.text(name.clone(), text.clone()),
                FormValue::File(file) => {
                    let part = Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn post(&self, url: &Url, payload: &FormData) -> Result<TransportResponse> {
        let form = Self::multipart(payload)?;
        let response = self.client.post(url.clone()).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

/// Submits reports to a fixed endpoint.
pub struct ReportSubmitter<T> {
    transport: T,
    endpoint: Url,
}

impl<T: ReportTransport> ReportSubmitter<T> {
    /// Create a submitter posting to `{origin}{reports_path}`.
    pub fn new(transport: T, origin: &Url, reports_path: &str) -> Result<Self> {
        Ok(Self {
            transport,
            endpoint: http::endpoint(origin, reports_path)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send the payload once and return the parsed success body.
    pub async fn submit(&self, payload: &FormData) -> Result<ReportReceipt> {
        let result = match self.transport.post(&self.endpoint, payload).await {
            Ok(response) => interpret(response),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::error!("Error submitting report: {} ({:?})", e, e);
        }
        result
    }
}

/// Turn a backend response into a receipt or a failure.
///
/// Non-success statuses surface a truthy scalar `error` field from the
/// body (a non-empty string, a non-zero number or `true`), otherwise `HTTP error! status: <code>`. A success body that is not
/// JSON is a failure.
pub fn interpret(response: TransportResponse) -> Result<ReportReceipt> {
    if !response.is_success() {
        let message = serde_json::from_slice::<Value>(&response.body)
            .ok()
            .and_then(|body| body.get("error").and_then(error_text))
            .unwrap_or_else(|| format!("HTTP error! status: {}", response.status));
        return Err(AppError::rejected(message));
    }

    let body: Value = serde_json::from_slice(&response.body)?;
    Ok(ReportReceipt(body))
}

/// Text of a truthy scalar `error` field. Objects and arrays carry no text.
fn error_text(error: &Value) -> Option<String> {
    match error {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
