//! Chat fine-tuning records.

use serde::{Deserialize, Serialize};

/// Speaker of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a training conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One line of the corpus file: system prompt, user prompt, post text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub messages: Vec<ChatMessage>,
}

impl TrainingRecord {
    /// Serialize to a single JSON line, without the trailing newline.
    ///
    /// Non-ASCII text is written literally rather than as `\u` escapes.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The fixed prompt pair shared by every record.
#[derive(Debug, Clone, Copy)]
pub struct Prompts<'a> {
    pub system_message: &'a str,
    pub user_message: &'a str,
}

/// Wrap one post's plain text into a three-turn conversation.
pub fn build_record(content: impl Into<String>, prompts: &Prompts<'_>) -> TrainingRecord {
    TrainingRecord {
        messages: vec![
            ChatMessage::system(prompts.system_message),
            ChatMessage::user(prompts.user_message),
            ChatMessage::assistant(content),
        ],
    }
}
