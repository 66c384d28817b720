//! Inbound statement-email webhook.
//!
//! One request runs, in order: validate with the provider, download the
//! first attachment, delete the email, pick a parser by file name, parse,
//! hand the batch to the sink. Deletion happens before format dispatch, so
//! an unsupported attachment still removes the email.

use axum::{body::Bytes, extract::State, http::StatusCode};
use budget_core::sort_by_datetime_desc;
use budget_ingest::StatementFormat;
use tracing::{Span, debug, info, instrument};

use crate::callbacks::{check_validation, delete_email, fetch_attachment};
use crate::models::WebhookPayload;
use crate::sink::StatementBatch;
use crate::{AppState, WebhookError};

const PREVIEW_CHARS: usize = 100;

/// POST /budget-email
///
/// # Errors
///
/// - 400: bad payload or first attachment, no attachments, unsupported attachment type
/// - 403: validation callback rejected the webhook
/// - 502: validation callback or attachment download failed
/// - 500: the attachment could not be parsed
#[instrument(name = "budget_email", skip_all, fields(filename = tracing::field::Empty))]
pub async fn receive_statement_email(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, WebhookError> {
    let payload = WebhookPayload::from_body(&body)?;

    if !check_validation(&state.http, &payload.validation_url).await? {
        return Err(WebhookError::Unauthorized);
    }

    let attachment = payload.first_attachment()?;
    if payload.attachment_count() > 1 {
        debug!(ignored = payload.attachment_count() - 1, "only the first attachment is processed");
    }
    Span::current().record("filename", attachment.filename.as_str());

    let content = fetch_attachment(&state.http, &attachment.url).await?;
    let preview: String = content.chars().take(PREVIEW_CHARS).collect();
    debug!(bytes = content.len(), preview = %preview, "Fetched attachment content");

    delete_email(&state.http, &payload.deletion_url).await;

    let format = StatementFormat::from_filename(&attachment.filename).ok_or_else(|| {
        WebhookError::UnsupportedFormat { filename: attachment.filename.clone() }
    })?;

    let mut transactions = format
        .parse(&content, &state.options)
        .map_err(|e| WebhookError::ParseFailed { format, reason: format!("{e:#}") })?;
    sort_by_datetime_desc(&mut transactions);

    info!(format = %format, count = transactions.len(), "statement parsed");
    state.sink.accept(StatementBatch {
        filename: attachment.filename.clone(),
        format,
        transactions,
    });

    Ok(StatusCode::OK)
}
