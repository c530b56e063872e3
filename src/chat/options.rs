//! Chat service configuration.

use super::store::DEFAULT_MAX_HISTORY;
use crate::render::CleanupOptions;

/// Default system instruction placed at the top of every prompt.
pub const DEFAULT_INSTRUCTION: &str = "You are a helpful assistant. Follow these rules strictly:
- You have access to our conversation history and can reference previous messages.
- When the user says \"this\", \"that\", \"it\", or similar references, refer to the context provided.
- If asked to summarize, analyze, or comment on something, look at the recent conversation for context.
- Do not start your reply with 'Okay', 'Ok', 'Alright', or 'Sure'.
- Use concise, clear language and format with Markdown when helpful.
- Maintain conversation continuity and remember what was discussed.";

/// Options for the chat service.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Maximum user message length in characters
    pub max_message_chars: usize,

    /// Messages kept per chat by stores built from these options
    pub max_history: usize,

    /// Earlier messages quoted in the prompt
    pub context_messages: usize,

    /// Instruction at the top of the prompt
    pub instruction: String,

    /// Cleanup applied to generated replies
    pub reply_cleanup: CleanupOptions,
}

impl ChatOptions {
    /// Create new chat options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum message length.
    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = max;
        self
    }

    /// Set the per-chat history limit.
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max.max(1);
        self
    }

    /// Set how many earlier messages are quoted in the prompt.
    pub fn with_context_messages(mut self, count: usize) -> Self {
        self.context_messages = count;
        self
    }

    /// Set the prompt instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Set reply cleanup options.
    pub fn with_reply_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.reply_cleanup = cleanup;
        self
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            max_message_chars: 1000,
            max_history: DEFAULT_MAX_HISTORY,
            context_messages: 10,
            instruction: DEFAULT_INSTRUCTION.to_string(),
            reply_cleanup: CleanupOptions::reply(),
        }
    }
}
