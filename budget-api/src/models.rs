//! Wire types for the mail provider's inbound webhook.

use serde::{Deserialize, Serialize};

use crate::WebhookError;

/// Attachment reference: points at hosted content, doesn't carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Pre-signed, short-lived download URL
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Only the callback URLs are checked on decode; attachments stay raw JSON
/// until `first_attachment` is called after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub validation_url: String,
    pub deletion_url: String,
    #[serde(default)]
    pub attachments: Option<Vec<serde_json::Value>>,
}

impl WebhookPayload {
    /// Decode a request body. An empty body reads as `{}`, which still fails
    /// for lack of callback URLs.
    pub fn from_body(body: &[u8]) -> Result<Self, WebhookError> {
        let body = if body.iter().all(u8::is_ascii_whitespace) { b"{}".as_slice() } else { body };
        serde_json::from_slice(body).map_err(WebhookError::InvalidPayload)
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.as_ref().map_or(0, Vec::len)
    }

    /// Decode the first attachment; the rest are never looked at.
    pub fn first_attachment(&self) -> Result<Attachment, WebhookError> {
        let first = self
            .attachments
            .as_deref()
            .and_then(<[_]>::first)
            .ok_or(WebhookError::NoAttachments)?;
        Attachment::deserialize(first).map_err(WebhookError::InvalidPayload)
    }
}

/// Reply from the validation callback. A missing `success` means rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ValidationResponse {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_full_payload() {
        let body = br#"{
            "validation_url": "https://mail.example/validate/abc",
            "deletion_url": "https://mail.example/delete/abc",
            "attachments": [{
                "filename": "account_statement_2024-07.csv",
                "content_id": "c1",
                "content_type": "text/csv",
                "url": "https://files.example/abc",
                "size": 2048
            }]
        }"#;
        let payload = WebhookPayload::from_body(body).unwrap();
        assert_eq!(payload.attachment_count(), 1);
        let first = payload.first_attachment().unwrap();
        assert_eq!(first.filename, "account_statement_2024-07.csv");
        assert_eq!(first.size, Some(2048));
    }

    #[test]
    fn test_absent_or_null_attachments_mean_none() {
        for body in [
            br#"{"validation_url": "v", "deletion_url": "d"}"#.as_slice(),
            br#"{"validation_url": "v", "deletion_url": "d", "attachments": null}"#.as_slice(),
            br#"{"validation_url": "v", "deletion_url": "d", "attachments": []}"#.as_slice(),
        ] {
            let payload = WebhookPayload::from_body(body).unwrap();
            assert_eq!(payload.attachment_count(), 0);
            assert!(matches!(payload.first_attachment(), Err(WebhookError::NoAttachments)));
        }
    }

    #[test]
    fn test_only_first_attachment_is_decoded() {
        let body = br#"{
            "validation_url": "v",
            "deletion_url": "d",
            "attachments": [{"filename": "a.csv", "url": "u"}, {"garbage": true}, 7]
        }"#;
        let payload = WebhookPayload::from_body(body).unwrap();
        assert_eq!(payload.attachment_count(), 3);
        assert_eq!(payload.first_attachment().unwrap().filename, "a.csv");
    }

    #[test]
    fn test_malformed_first_attachment_is_invalid() {
        let body = br#"{"validation_url": "v", "deletion_url": "d", "attachments": [{"filename": "a.csv"}]}"#;
        let payload = WebhookPayload::from_body(body).unwrap();
        assert!(matches!(payload.first_attachment(), Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn test_empty_body_is_invalid() {
        assert!(matches!(WebhookPayload::from_body(b""), Err(WebhookError::InvalidPayload(_))));
        assert!(matches!(WebhookPayload::from_body(b"not json"), Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn test_validation_success_defaults_false() {
        let resp: ValidationResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
    }
}
