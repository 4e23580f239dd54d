//! HTTP client for the deployment server.

use std::time::Duration;

use log::{info, warn};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::payload::DeploymentPayload;
use crate::error::ReportError;

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (30 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What the deployment server made of a report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The server answered with a JSON body.
    Completed { status: u16, body: Value },
    /// The request never produced a response.
    Unreachable { error: String },
}

impl ReportOutcome {
    /// True only for an HTTP 200 answer.
    pub fn is_success(&self) -> bool {
        matches!(self, ReportOutcome::Completed { status: 200, .. })
    }

    /// Text shown to the user: a verdict line followed by the response body.
    pub fn render(&self) -> String {
        match self {
            ReportOutcome::Completed { body, .. } => {
                let verdict = if self.is_success() {
                    "Deployment successful!"
                } else {
                    "Deployment failed!"
                };
                format!("{}\n{}", verdict, pretty_json(body))
            }
            ReportOutcome::Unreachable { error } => format!("Error: {}", error),
        }
    }
}

/// Pretty-prints JSON with four-space indentation.
fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Creates an HTTP client with appropriate timeouts.
fn create_http_client() -> Result<Client, ReportError> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
        .map_err(ReportError::Client)
}

/// Sends deployment reports to `<server_url>/deploy`.
pub struct DeploymentReporter {
    client: Client,
    endpoint: String,
}

impl DeploymentReporter {
    pub fn new(server_url: &str) -> Result<Self, ReportError> {
        Ok(Self {
            client: create_http_client()?,
            endpoint: format!("{}/deploy", server_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `payload` as JSON.
    ///
    /// Network failures come back as [`ReportOutcome::Unreachable`] so the
    /// caller can carry on. A response whose body is not JSON is an error.
    pub async fn report(&self, payload: &DeploymentPayload) -> Result<ReportOutcome, ReportError> {
        info!(
            "Reporting deployment of {} ({}) to {}",
            payload.repo_url, payload.branch, self.endpoint
        );

        let response = match self.client.post(&self.endpoint).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Deployment server unreachable: {}", e);
                return Ok(ReportOutcome::Unreachable {
                    error: e.to_string(),
                });
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read deployment server response: {}", e);
                return Ok(ReportOutcome::Unreachable {
                    error: e.to_string(),
                });
            }
        };

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ReportError::InvalidResponse {
                status,
                message: e.to_string(),
            })?;

        info!("Deployment server answered HTTP {}", status);
        Ok(ReportOutcome::Completed { status, body })
    }
}
