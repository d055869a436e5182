//! Gmail REST API provider.
//!
//! Wraps the `users/me` endpoints of the Gmail API. All calls authenticate
//! with the per-request OAuth access token; building and refreshing that
//! token is the caller's concern.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::preview::{html_to_text, text_preview};
use crate::provider::{EmailDetail, EmailSummary, MailProvider, OutgoingEmail};

/// Default Gmail API base URL.
pub const DEFAULT_API_URL: &str = "https://gmail.googleapis.com";

/// Maximum bytes kept of a converted message body.
const MAX_BODY_PREVIEW: usize = 4096;

/// Default HTTP timeout for Gmail requests (30 seconds).
const HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GmailMessage {
    id: String,
    #[serde(default)]
    snippet: String,
    #[serde(default, rename = "labelIds")]
    label_ids: Vec<String>,
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default, rename = "mimeType")]
    mime_type: String,
    #[serde(default)]
    headers: Vec<Header>,
    body: Option<Body>,
    #[serde(default)]
    parts: Vec<Payload>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct Body {
    data: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendRequest {
    raw: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// A mail provider backed by the Gmail REST API.
pub struct GmailProvider {
    client: reqwest::Client,
    api_url: String,
}

impl GmailProvider {
    /// Create a provider against the default Gmail API URL.
    pub fn new() -> Result<Self, ToolError> {
        Self::with_api_url(DEFAULT_API_URL)
    }

    /// Create a provider against a custom base URL (used in tests and for
    /// proxies).
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                ToolError::ExecutionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    fn require_token(token: Option<&str>) -> Result<&str, ToolError> {
        token.ok_or_else(|| ToolError::Provider("Gmail access token required".to_string()))
    }

    async fn fetch_message(
        &self,
        token: &str,
        id: &str,
        format: &str,
    ) -> Result<GmailMessage, ToolError> {
        let url = format!("{}/gmail/v1/users/me/messages/{}", self.api_url, id);

        let response = self
            .client
            .get(&url)
            .query(&[("format", format)])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Provider(format!(
                "Gmail API error ({}): {}",
                status.as_u16(),
                body
            )));
        }

        Ok(response.json().await?)
    }

    async fn list_ids(
        &self,
        token: &str,
        query: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<String>, ToolError> {
        let url = format!("{}/gmail/v1/users/me/messages", self.api_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("maxResults", max_results.to_string())])
            .bearer_auth(token);
        if let Some(q) = query {
            request = request.query(&[("q", q)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Provider(format!(
                "Gmail API error ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let list: ListResponse = response.json().await?;
        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    async fn summaries(
        &self,
        token: &str,
        query: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError> {
        let ids = self.list_ids(token, query, max_results).await?;
        debug!("Gmail list returned {} message ids", ids.len());

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            match self.fetch_message(token, &id, "metadata").await {
                Ok(message) => summaries.push(summary_from(message)),
                Err(e) => warn!("Skipping message {}: {}", id, e),
            }
        }

        Ok(summaries)
    }
}

fn header_value(payload: Option<&Payload>, name: &str) -> String {
    payload
        .map(|p| p.headers.as_slice())
        .unwrap_or_default()
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.clone())
        .unwrap_or_default()
}

fn summary_from(message: GmailMessage) -> EmailSummary {
    let payload = message.payload.as_ref();
    EmailSummary {
        from: header_value(payload, "From"),
        subject: header_value(payload, "Subject"),
        date: header_value(payload, "Date"),
        snippet: message.snippet,
        unread: message.label_ids.iter().any(|l| l == "UNREAD"),
        id: message.id,
    }
}

/// Decode a base64url body segment, tolerating padded input.
fn decode_body(data: &str) -> Option<String> {
    let trimmed = data.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(trimmed).ok()?;
    String::from_utf8(bytes).ok()
}

/// Walk a MIME payload tree looking for a body of the given type.
fn find_part<'a>(payload: &'a Payload, mime_type: &str) -> Option<&'a Payload> {
    if payload.mime_type == mime_type
        && payload.body.as_ref().and_then(|b| b.data.as_ref()).is_some()
    {
        return Some(payload);
    }
    payload.parts.iter().find_map(|p| find_part(p, mime_type))
}

/// Extract a plain-text body from a Gmail payload.
///
/// Prefers a `text/plain` part; falls back to converting `text/html`.
fn extract_body(payload: &Payload) -> Result<String, ToolError> {
    if let Some(part) = find_part(payload, "text/plain") {
        if let Some(text) = part
            .body
            .as_ref()
            .and_then(|b| b.data.as_deref())
            .and_then(decode_body)
        {
            return Ok(text);
        }
    }

    if let Some(part) = find_part(payload, "text/html") {
        if let Some(html) = part
            .body
            .as_ref()
            .and_then(|b| b.data.as_deref())
            .and_then(decode_body)
        {
            return html_to_text(&html);
        }
    }

    Ok(String::new())
}

/// Build the RFC 822 text for an outgoing message.
fn to_rfc822(email: &OutgoingEmail) -> String {
    format!(
        "To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
        email.to, email.subject, email.body
    )
}

#[async_trait]
impl MailProvider for GmailProvider {
    async fn list_messages(
        &self,
        token: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError> {
        let token = Self::require_token(token)?;
        self.summaries(token, None, max_results).await
    }

    async fn search_messages(
        &self,
        token: Option<&str>,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError> {
        let token = Self::require_token(token)?;
        self.summaries(token, Some(query), max_results).await
    }

    async fn get_message(&self, token: Option<&str>, id: &str) -> Result<EmailDetail, ToolError> {
        let token = Self::require_token(token)?;
        let message = self.fetch_message(token, id, "full").await?;

        let (body, to) = match message.payload.as_ref() {
            Some(payload) => {
                let raw_body = extract_body(payload)?;
                let body = text_preview(&raw_body, false, MAX_BODY_PREVIEW)?;
                let to = header_value(Some(payload), "To");
                let to = if to.is_empty() { Vec::new() } else { vec![to] };
                (body, to)
            }
            None => (String::new(), Vec::new()),
        };

        Ok(EmailDetail {
            summary: summary_from(message),
            to,
            body,
        })
    }

    async fn send_message(
        &self,
        token: Option<&str>,
        email: &OutgoingEmail,
    ) -> Result<String, ToolError> {
        let token = Self::require_token(token)?;
        let url = format!("{}/gmail/v1/users/me/messages/send", self.api_url);

        let raw = URL_SAFE_NO_PAD.encode(to_rfc822(email));

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&SendRequest { raw })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Provider(format!(
                "Gmail API error ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let sent: SendResponse = response.json().await?;
        debug!("Sent message {} to {}", sent.id, email.to);
        Ok(sent.id)
    }

    fn name(&self) -> &str {
        "gmail"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with(mime_type: &str, data: &str) -> Payload {
        Payload {
            mime_type: mime_type.to_string(),
            headers: Vec::new(),
            body: Some(Body {
                data: Some(URL_SAFE_NO_PAD.encode(data)),
            }),
            parts: Vec::new(),
        }
    }

    #[test]
    fn test_client_construction() {
        assert!(GmailProvider::new().is_ok());
        assert!(GmailProvider::with_api_url("http://localhost:1234").is_ok());
    }

    #[tokio::test]
    async fn test_token_required() {
        let provider = GmailProvider::new().unwrap();
        let result = provider.list_messages(None, 5).await;
        assert!(matches!(result, Err(ToolError::Provider(_))));
    }

    #[test]
    fn test_extract_plain_body() {
        let payload = payload_with("text/plain", "hello body");
        assert_eq!(extract_body(&payload).unwrap(), "hello body");
    }

    #[test]
    fn test_extract_html_fallback() {
        let payload = Payload {
            mime_type: "multipart/alternative".to_string(),
            headers: Vec::new(),
            body: None,
            parts: vec![payload_with("text/html", "<p>hello <b>html</b></p>")],
        };

        let body = extract_body(&payload).unwrap();
        assert!(body.contains("hello"));
        assert!(!body.contains('<'));
    }

    #[test]
    fn test_extract_prefers_plain_over_html() {
        let payload = Payload {
            mime_type: "multipart/alternative".to_string(),
            headers: Vec::new(),
            body: None,
            parts: vec![
                payload_with("text/html", "<p>html version</p>"),
                payload_with("text/plain", "plain version"),
            ],
        };

        assert_eq!(extract_body(&payload).unwrap(), "plain version");
    }

    #[test]
    fn test_decode_body_with_padding() {
        let padded = format!("{}==", URL_SAFE_NO_PAD.encode("hi"));
        assert_eq!(decode_body(&padded).as_deref(), Some("hi"));
    }

    #[test]
    fn test_rfc822_format() {
        let email = OutgoingEmail::new("alice@example.com", "Hi there", "Body text");
        let raw = to_rfc822(&email);

        assert!(raw.starts_with("To: alice@example.com\r\n"));
        assert!(raw.contains("Subject: Hi there\r\n"));
        assert!(raw.ends_with("\r\n\r\nBody text"));
    }

    #[test]
    fn test_summary_unread_flag() {
        let message = GmailMessage {
            id: "m1".to_string(),
            snippet: "snippet".to_string(),
            label_ids: vec!["INBOX".to_string(), "UNREAD".to_string()],
            payload: None,
        };

        let summary = summary_from(message);
        assert!(summary.unread);
        assert_eq!(summary.id, "m1");
    }
}
