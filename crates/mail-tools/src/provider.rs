//! The mail provider strategy interface.
//!
//! Whether tool calls hit the real Gmail API or return fixed sample data is
//! an explicit configuration decision, not an environment guess: the server
//! builds a [`ProviderSelector`] from [`MailMode`] at startup, and the
//! selector resolves the provider per request based on whether an access
//! token was supplied.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ToolError;
use crate::gmail::GmailProvider;
use crate::mock::MockMailProvider;

/// A summary of an email message, as returned by list/search operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSummary {
    /// Provider message id.
    pub id: String,
    /// Sender, e.g. `"Alice <alice@example.com>"`.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Short plain-text snippet of the body.
    pub snippet: String,
    /// Date header, as reported by the provider.
    pub date: String,
    /// Whether the message is unread.
    pub unread: bool,
}

/// A full email message with its plain-text body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDetail {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: EmailSummary,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Plain-text body (HTML bodies converted to text).
    pub body: String,
}

/// An email to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl OutgoingEmail {
    /// Create a new outgoing email.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Strategy interface over an email backend.
///
/// Implementations take the per-request access token; the mock provider
/// ignores it, the Gmail provider requires it.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// List recent inbox messages.
    async fn list_messages(
        &self,
        token: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError>;

    /// Search messages with a provider query string (e.g. `is:unread`).
    async fn search_messages(
        &self,
        token: Option<&str>,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError>;

    /// Fetch a single message with its body.
    async fn get_message(&self, token: Option<&str>, id: &str) -> Result<EmailDetail, ToolError>;

    /// Send an email, returning the new message id.
    async fn send_message(
        &self,
        token: Option<&str>,
        email: &OutgoingEmail,
    ) -> Result<String, ToolError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Which mail backend the server is configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailMode {
    /// Fixed sample data, no network calls.
    Mock,
    /// Real Gmail REST API calls (requires per-request access tokens).
    Gmail,
}

impl FromStr for MailMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(MailMode::Mock),
            "gmail" | "real" => Ok(MailMode::Gmail),
            other => Err(format!("unknown mail mode: {}", other)),
        }
    }
}

/// Resolves the mail provider for each request.
///
/// Holds the mock provider unconditionally and the Gmail provider only when
/// the server runs in Gmail mode. Requests without an access token always
/// fall back to mock data, so the assistant stays usable before OAuth is
/// connected.
pub struct ProviderSelector {
    mock: Arc<MockMailProvider>,
    gmail: Option<Arc<GmailProvider>>,
}

impl ProviderSelector {
    /// Build a selector for the given mode.
    pub fn new(mode: MailMode, gmail: GmailProvider) -> Self {
        Self {
            mock: Arc::new(MockMailProvider::new()),
            gmail: match mode {
                MailMode::Gmail => Some(Arc::new(gmail)),
                MailMode::Mock => None,
            },
        }
    }

    /// Build a mock-only selector.
    pub fn mock_only() -> Self {
        Self {
            mock: Arc::new(MockMailProvider::new()),
            gmail: None,
        }
    }

    /// Pick the provider for a request with the given access token.
    pub fn select(&self, token: Option<&str>) -> Arc<dyn MailProvider> {
        match (&self.gmail, token) {
            (Some(gmail), Some(_)) => gmail.clone(),
            (Some(_), None) => {
                debug!("No access token on request, falling back to mock mail data");
                self.mock.clone()
            }
            (None, _) => self.mock.clone(),
        }
    }
}
