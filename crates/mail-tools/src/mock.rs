//! Mock mail provider returning fixed sample data.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ToolError;
use crate::provider::{EmailDetail, EmailSummary, MailProvider, OutgoingEmail};

/// A mail provider that serves fixed sample messages and never touches the
/// network. Used in mock mode and whenever a request carries no access token.
#[derive(Debug, Clone, Default)]
pub struct MockMailProvider;

impl MockMailProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self
    }

    fn sample_messages() -> Vec<EmailDetail> {
        vec![
            EmailDetail {
                summary: EmailSummary {
                    id: "mock-1".to_string(),
                    from: "Sarah Chen <sarah.chen@example.com>".to_string(),
                    subject: "Q3 planning meeting moved to Thursday".to_string(),
                    snippet: "Hi, quick heads up that the Q3 planning meeting has moved..."
                        .to_string(),
                    date: "Mon, 25 Aug 2025 09:14:02 +0000".to_string(),
                    unread: true,
                },
                to: vec!["me@example.com".to_string()],
                body: "Hi,\n\nQuick heads up that the Q3 planning meeting has moved from \
                       Wednesday to Thursday at 2pm. Same room, same agenda.\n\nSarah"
                    .to_string(),
            },
            EmailDetail {
                summary: EmailSummary {
                    id: "mock-2".to_string(),
                    from: "GitHub <notifications@github.com>".to_string(),
                    subject: "[echo-mvp] PR #42: Add thread persistence".to_string(),
                    snippet: "Reviewer approved your pull request. Merge when ready."
                        .to_string(),
                    date: "Mon, 25 Aug 2025 08:02:41 +0000".to_string(),
                    unread: true,
                },
                to: vec!["me@example.com".to_string()],
                body: "Reviewer approved your pull request.\n\nMerge when ready.".to_string(),
            },
            EmailDetail {
                summary: EmailSummary {
                    id: "mock-3".to_string(),
                    from: "Marco Ruiz <marco@example.org>".to_string(),
                    subject: "Dinner on Friday?".to_string(),
                    snippet: "Are you free Friday evening? Thinking the usual place around 7."
                        .to_string(),
                    date: "Sun, 24 Aug 2025 19:33:10 +0000".to_string(),
                    unread: false,
                },
                to: vec!["me@example.com".to_string()],
                body: "Are you free Friday evening? Thinking the usual place around 7.\n\nMarco"
                    .to_string(),
            },
        ]
    }
}

#[async_trait]
impl MailProvider for MockMailProvider {
    async fn list_messages(
        &self,
        _token: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError> {
        debug!("Mock provider listing messages (max {})", max_results);
        Ok(Self::sample_messages()
            .into_iter()
            .take(max_results as usize)
            .map(|m| m.summary)
            .collect())
    }

    async fn search_messages(
        &self,
        _token: Option<&str>,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, ToolError> {
        debug!("Mock provider searching for '{}'", query);

        // `is:unread` is the one query the assistant issues constantly;
        // everything else falls back to a subject/sender substring match.
        let needle = query.to_lowercase();
        let matches = Self::sample_messages().into_iter().filter(|m| {
            if needle.contains("is:unread") {
                m.summary.unread
            } else {
                m.summary.subject.to_lowercase().contains(&needle)
                    || m.summary.from.to_lowercase().contains(&needle)
            }
        });

        Ok(matches
            .take(max_results as usize)
            .map(|m| m.summary)
            .collect())
    }

    async fn get_message(&self, _token: Option<&str>, id: &str) -> Result<EmailDetail, ToolError> {
        Self::sample_messages()
            .into_iter()
            .find(|m| m.summary.id == id)
            .ok_or_else(|| ToolError::Provider(format!("message not found: {}", id)))
    }

    async fn send_message(
        &self,
        _token: Option<&str>,
        email: &OutgoingEmail,
    ) -> Result<String, ToolError> {
        debug!("Mock provider pretending to send to {}", email.to);
        Ok(format!("mock-sent-{}", email.to.len()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_samples() {
        let provider = MockMailProvider::new();
        let messages = provider.list_messages(None, 10).await.unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].id, "mock-1");
    }

    #[tokio::test]
    async fn test_list_respects_max_results() {
        let provider = MockMailProvider::new();
        let messages = provider.list_messages(None, 2).await.unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn test_search_unread() {
        let provider = MockMailProvider::new();
        let messages = provider.search_messages(None, "is:unread", 10).await.unwrap();

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.unread));
    }

    #[tokio::test]
    async fn test_search_by_subject() {
        let provider = MockMailProvider::new();
        let messages = provider.search_messages(None, "dinner", 10).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "mock-3");
    }

    #[tokio::test]
    async fn test_get_message() {
        let provider = MockMailProvider::new();
        let detail = provider.get_message(None, "mock-1").await.unwrap();

        assert_eq!(detail.summary.subject, "Q3 planning meeting moved to Thursday");
        assert!(detail.body.contains("Thursday at 2pm"));
    }

    #[tokio::test]
    async fn test_get_unknown_message() {
        let provider = MockMailProvider::new();
        let result = provider.get_message(None, "nope").await;
        assert!(matches!(result, Err(ToolError::Provider(_))));
    }

    #[tokio::test]
    async fn test_send_returns_id() {
        let provider = MockMailProvider::new();
        let email = OutgoingEmail::new("alice@example.com", "Hi", "Hello!");
        let id = provider.send_message(None, &email).await.unwrap();
        assert!(id.starts_with("mock-sent-"));
    }
}
