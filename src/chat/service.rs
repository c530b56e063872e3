//! The chat request flow: validate, record, prompt, generate, clean up.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::{normalize_chat_id, InMemoryStore, DEFAULT_CHAT_ID};
use super::{ChatMessage, ChatOptions, ConversationStore, GenerateError, Generator};
use crate::error::{Error, Result};
use crate::render::CleanupPipeline;
use crate::RenderedMessage;

const NO_CONTEXT: &str = "No previous conversation.";

/// Outcome of one chat turn, shaped like the chat API response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Whether a reply was generated
    pub success: bool,

    /// Cleaned-up reply text (Markdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// User-facing error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When the reply was produced
    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    /// A successful reply.
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// A failed turn carrying the fixed user-facing message.
    pub fn failure(error: &GenerateError) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.user_message().to_string()),
            timestamp: Utc::now(),
        }
    }

    /// Render the reply for display, if there is one.
    pub fn rendered(&self) -> Option<RenderedMessage> {
        self.response.as_deref().map(RenderedMessage::from_markdown)
    }
}

/// Retained history of one chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Normalised chat id
    pub chat_id: String,

    /// Messages, oldest first
    pub history: Vec<ChatMessage>,

    /// Number of messages
    pub count: usize,
}

/// Result of clearing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearOutcome {
    /// Status message
    pub message: String,

    /// Messages left in the cleared chat
    pub count: usize,
}

/// Chat service over an injected store and generator.
///
/// Holds no mutable state of its own; the store is the only shared state
/// and the generator is called without any lock held.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    generator: Arc<dyn Generator>,
    options: ChatOptions,
    cleanup: CleanupPipeline,
}

impl ChatService {
    /// Create a service with default options.
    pub fn new(store: Arc<dyn ConversationStore>, generator: Arc<dyn Generator>) -> Self {
        Self::with_options(store, generator, ChatOptions::default())
    }

    /// Create a service with the given options.
    pub fn with_options(
        store: Arc<dyn ConversationStore>,
        generator: Arc<dyn Generator>,
        options: ChatOptions,
    ) -> Self {
        let cleanup = CleanupPipeline::new(options.reply_cleanup.clone());
        Self {
            store,
            generator,
            options,
            cleanup,
        }
    }

    /// Create a service backed by a fresh [`InMemoryStore`] sized from
    /// `options.max_history`.
    pub fn in_memory(generator: Arc<dyn Generator>, options: ChatOptions) -> Self {
        let store = Arc::new(InMemoryStore::with_max_history(options.max_history));
        Self::with_options(store, generator, options)
    }

    /// Get the service options.
    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    /// Get the conversation store.
    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Check a user message and return it trimmed.
    pub fn validate(&self, message: &str) -> Result<String> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyMessage);
        }
        let len = message.chars().count();
        if len > self.options.max_message_chars {
            return Err(Error::MessageTooLong {
                len,
                max: self.options.max_message_chars,
            });
        }
        Ok(trimmed.to_string())
    }

    /// Run one chat turn.
    ///
    /// Validation and store failures are errors. A generator failure is a
    /// normal outcome: the reply has `success == false` and the user
    /// message stays in history.
    pub fn send(&self, chat_id: Option<&str>, message: &str) -> Result<ChatReply> {
        let message = self.validate(message)?;
        let id = normalize_chat_id(chat_id);

        let earlier = self.store.append_with_context(
            &id,
            ChatMessage::user(message.clone()),
            self.options.context_messages,
        )?;
        let context = build_context(&earlier);
        let prompt = self.build_prompt(&context, &message);

        log::debug!(
            "Sending {} byte prompt to {} for chat '{}'",
            prompt.len(),
            self.generator.name(),
            id
        );

        match self.generator.generate(&prompt) {
            Ok(text) => {
                let reply = self.cleanup.process(&text);
                self.store.append(&id, ChatMessage::assistant(reply.clone()))?;
                Ok(ChatReply::success(reply))
            }
            Err(err) => {
                log::warn!("Generation failed for chat '{}': {}", id, err);
                Ok(ChatReply::failure(&err))
            }
        }
    }

    /// Assemble the full prompt sent to the generator.
    pub fn build_prompt(&self, context: &str, message: &str) -> String {
        format!(
            "{}\n\nConversation context:\n{}\n\nUser: {}\nAssistant:",
            self.options.instruction, context, message
        )
    }

    /// Retained history of a chat.
    pub fn history(&self, chat_id: Option<&str>) -> Result<HistorySnapshot> {
        let id = normalize_chat_id(chat_id);
        let history = self.store.history(&id)?;
        Ok(HistorySnapshot {
            count: history.len(),
            chat_id: id,
            history,
        })
    }

    /// Clear one chat, or every chat when `all` is set and no specific chat
    /// is named.
    pub fn clear(&self, chat_id: Option<&str>, all: bool) -> Result<ClearOutcome> {
        let id = normalize_chat_id(chat_id);
        if all && id == DEFAULT_CHAT_ID {
            self.store.clear_all()?;
            log::debug!("Cleared all chats");
            return Ok(ClearOutcome {
                message: "All chats cleared".to_string(),
                count: 0,
            });
        }

        self.store.clear(&id)?;
        log::debug!("Cleared chat '{}'", id);
        Ok(ClearOutcome {
            message: "Chat history cleared".to_string(),
            count: 0,
        })
    }
}

/// Quote the messages before the current one, oldest first.
fn build_context(earlier: &[ChatMessage]) -> String {
    if earlier.is_empty() {
        return NO_CONTEXT.to_string();
    }
    earlier
        .iter()
        .map(ChatMessage::prompt_line)
        .collect::<Vec<_>>()
        .join("\n")
}
