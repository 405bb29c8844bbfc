//! Chat transcript
//!
//! Append-only list of chat turns. Insertion order is display order.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{classify, RenderedBlock};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn; immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
    sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Raw content, exactly as typed or received
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// `HH:MM` in the viewer's local time zone
    pub fn local_time(&self) -> String {
        self.sent_at.with_timezone(&Local).format("%H:%M").to_string()
    }

    /// Display layout; only assistant replies get templates
    pub fn render(&self) -> RenderedBlock {
        match self.role {
            Role::Assistant => classify(&self.content),
            Role::User => RenderedBlock::Plain(self.content.clone()),
        }
    }
}

/// Ordered conversation history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Most recent assistant reply
    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use chrono::TimeZone;

    #[test]
    fn test_user_messages_render_plain() {
        let msg = ChatMessage::user("### Recipe\n\nmine");
        assert_eq!(msg.render().kind(), ContentKind::Plain);

        let msg = ChatMessage::assistant("### Recipe\n\ntheirs");
        assert_eq!(msg.render().kind(), ContentKind::Recipe);
    }

    #[test]
    fn test_transcript_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::assistant("Profile saved successfully."));
        transcript.push(ChatMessage::user("hi"));
        transcript.push(ChatMessage::assistant("hello"));
        transcript.push(ChatMessage::user("bye"));

        let contents: Vec<&str> = transcript.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["Profile saved successfully.", "hi", "hello", "bye"]);
        assert_eq!(transcript.last_assistant().map(|m| m.content()), Some("hello"));
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn test_local_time_uses_local_zone() {
        let sent_at = Utc.with_ymd_and_hms(2026, 3, 14, 22, 5, 0).unwrap();
        let msg = ChatMessage {
            role: Role::Assistant,
            content: "hello".to_string(),
            sent_at,
        };

        let expected = sent_at.with_timezone(&Local).format("%H:%M").to_string();
        assert_eq!(msg.local_time(), expected);
        assert_eq!(msg.local_time().len(), 5);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_value(ChatMessage::user("x")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "x");
    }
}
