//! Leading-mention parsing.

/// A parsed `@name` mention at the start of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// The agent name, lowercased, without the `@`.
    pub name: String,
    /// The message with the mention stripped and leading whitespace trimmed.
    pub rest: String,
}

/// Parse a leading `@name` mention from a chat message.
///
/// Only a mention at the very start of the (trimmed) message counts; `@`
/// anywhere else is ordinary text. The name runs to the first whitespace.
/// A bare `@` with no name is not a mention.
pub fn parse_mention(text: &str) -> Option<Mention> {
    let trimmed = text.trim_start();
    let after_at = trimmed.strip_prefix('@')?;

    let name_end = after_at
        .find(char::is_whitespace)
        .unwrap_or(after_at.len());
    let name = &after_at[..name_end];

    if name.is_empty() {
        return None;
    }

    Some(Mention {
        name: name.to_lowercase(),
        rest: after_at[name_end..].trim_start().to_string(),
    })
}
