//! Conversation history management.
//!
//! Per-thread conversation history with automatic turn-based trimming and
//! LRU eviction so an unbounded number of threads cannot exhaust memory.

use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Default maximum number of threads to track before LRU eviction.
const DEFAULT_MAX_THREADS: usize = 10000;

/// A single message in the conversation history.
#[derive(Debug, Clone)]
pub struct HistoryMessage {
    /// Role: "user" or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl HistoryMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Per-thread conversation history with LRU eviction.
///
/// Maintains a separate history per chat thread, trimmed to a configurable
/// maximum number of turns. The total number of tracked threads is also
/// bounded; the least recently used thread is evicted past the limit.
#[derive(Debug)]
pub struct ConversationHistory {
    /// Map from thread ID to its message history.
    /// Uses IndexMap to maintain insertion order for LRU eviction.
    histories: RwLock<IndexMap<String, Vec<HistoryMessage>>>,
    /// Maximum number of turns (user + assistant pairs) to keep per thread.
    max_turns: usize,
    /// Maximum number of threads to track before LRU eviction.
    max_threads: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ConversationHistory {
    /// Create a new conversation history with the given max turns.
    ///
    /// Uses the default max threads limit (10,000).
    pub fn new(max_turns: usize) -> Self {
        Self::with_limits(max_turns, DEFAULT_MAX_THREADS)
    }

    /// Create a new conversation history with custom limits.
    ///
    /// # Arguments
    ///
    /// * `max_turns` - Maximum number of turns (user + assistant pairs) per thread
    /// * `max_threads` - Maximum number of threads to track before LRU eviction
    pub fn with_limits(max_turns: usize, max_threads: usize) -> Self {
        Self {
            histories: RwLock::new(IndexMap::new()),
            max_turns,
            max_threads,
        }
    }

    /// Get the conversation history for a thread.
    ///
    /// This marks the thread as recently used for LRU purposes.
    pub async fn get(&self, thread_id: &str) -> Vec<HistoryMessage> {
        let mut histories = self.histories.write().await;

        // Move to end to mark as recently used
        if let Some(entry) = histories.shift_remove(thread_id) {
            let result = entry.clone();
            histories.insert(thread_id.to_string(), entry);
            result
        } else {
            Vec::new()
        }
    }

    /// Add a user message and assistant response to a thread's history.
    ///
    /// This also performs LRU eviction if the thread limit is exceeded.
    pub async fn add_exchange(&self, thread_id: &str, user_msg: &str, assistant_msg: &str) {
        let mut histories = self.histories.write().await;

        // Remove and re-insert to move to end (mark as recently used)
        let mut history = histories.shift_remove(thread_id).unwrap_or_default();

        history.push(HistoryMessage::user(user_msg));
        history.push(HistoryMessage::assistant(assistant_msg));

        // Trim to max turns (each turn is 2 messages)
        let max_messages = self.max_turns * 2;
        if history.len() > max_messages {
            let to_remove = history.len() - max_messages;
            history.drain(0..to_remove);
        }

        histories.insert(thread_id.to_string(), history);

        // Evict the oldest threads past the limit
        while histories.len() > self.max_threads {
            histories.shift_remove_index(0);
        }
    }

    /// Clear history for a specific thread.
    pub async fn clear(&self, thread_id: &str) {
        let mut histories = self.histories.write().await;
        histories.shift_remove(thread_id);
    }

    /// Clear all conversation histories.
    pub async fn clear_all(&self) {
        let mut histories = self.histories.write().await;
        histories.clear();
    }

    /// Get the current number of tracked threads.
    pub async fn thread_count(&self) -> usize {
        let histories = self.histories.read().await;
        histories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_get_history() {
        let history = ConversationHistory::new(5);

        history.add_exchange("t1", "Hello", "Hi there!").await;
        history.add_exchange("t1", "Any new mail?", "Two unread.").await;

        let messages = history.get("t1").await;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "Hi there!");
    }

    #[tokio::test]
    async fn test_history_trimming() {
        let history = ConversationHistory::new(2); // Keep only 2 turns

        history.add_exchange("t1", "First", "Response 1").await;
        history.add_exchange("t1", "Second", "Response 2").await;
        history.add_exchange("t1", "Third", "Response 3").await;

        let messages = history.get("t1").await;
        assert_eq!(messages.len(), 4); // 2 turns = 4 messages
        assert_eq!(messages[0].content, "Second");
        assert_eq!(messages[1].content, "Response 2");
    }

    #[tokio::test]
    async fn test_separate_thread_histories() {
        let history = ConversationHistory::new(5);

        history.add_exchange("t1", "Hello A", "Hi A!").await;
        history.add_exchange("t2", "Hello B", "Hi B!").await;

        let a = history.get("t1").await;
        let b = history.get("t2").await;

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(a[0].content, "Hello A");
        assert_eq!(b[0].content, "Hello B");
    }

    #[tokio::test]
    async fn test_clear_thread() {
        let history = ConversationHistory::new(5);

        history.add_exchange("t1", "Hello", "Hi!").await;
        history.add_exchange("t2", "Hey", "Hello!").await;

        history.clear("t1").await;

        assert!(history.get("t1").await.is_empty());
        assert_eq!(history.get("t2").await.len(), 2);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let history = ConversationHistory::with_limits(5, 3);

        history.add_exchange("t1", "Hello", "Hi!").await;
        history.add_exchange("t2", "Hello", "Hi!").await;
        history.add_exchange("t3", "Hello", "Hi!").await;
        history.add_exchange("t4", "Hello", "Hi!").await;

        // Oldest thread evicted
        assert_eq!(history.thread_count().await, 3);
        assert!(history.get("t1").await.is_empty());
        assert!(!history.get("t2").await.is_empty());
        assert!(!history.get("t4").await.is_empty());
    }

    #[tokio::test]
    async fn test_lru_access_order() {
        let history = ConversationHistory::with_limits(5, 3);

        history.add_exchange("t1", "Hello", "Hi!").await;
        history.add_exchange("t2", "Hello", "Hi!").await;
        history.add_exchange("t3", "Hello", "Hi!").await;

        // Access t1 to make it recently used
        let _ = history.get("t1").await;

        history.add_exchange("t4", "Hello", "Hi!").await;

        // t2 is now the oldest and should be gone
        assert!(history.get("t2").await.is_empty());
        assert!(!history.get("t1").await.is_empty());
        assert!(!history.get("t3").await.is_empty());
        assert!(!history.get("t4").await.is_empty());
    }
}
