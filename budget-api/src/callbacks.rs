//! Outbound calls to the mail provider: validate, download, delete.
//!
//! Issued one after another; none are retried and none set their own timeout.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::WebhookError;
use crate::models::ValidationResponse;

/// Ask the provider whether this webhook is genuine.
pub async fn check_validation(http: &Client, url: &str) -> Result<bool, WebhookError> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(WebhookError::ValidationUnavailable)?;

    let body: ValidationResponse = resp.json().await.map_err(WebhookError::ValidationUnavailable)?;
    debug!(success = body.success, "validation callback answered");
    Ok(body.success)
}

/// Download attachment content from its pre-signed URL as text.
pub async fn fetch_attachment(http: &Client, url: &str) -> Result<String, WebhookError> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| WebhookError::FetchFailed { reason: e.to_string() })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(WebhookError::FetchFailed { reason: format!("HTTP {status}") });
    }

    resp.text()
        .await
        .map_err(|e| WebhookError::FetchFailed { reason: e.to_string() })
}

/// Delete the source email. Failures are logged and otherwise ignored.
pub async fn delete_email(http: &Client, url: &str) {
    match http.delete(url).send().await {
        Ok(resp) if resp.status().is_success() => info!("Email deleted successfully"),
        Ok(resp) => warn!(status = resp.status().as_u16(), "email deletion returned an error status"),
        Err(e) => warn!(error = %e, "email deletion request failed"),
    }
}
