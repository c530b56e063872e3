//! Conversation core: message history, prompt assembly and reply handling.
//!
//! The generation backend and the storage layer are injected
//! ([`Generator`], [`ConversationStore`]); nothing here keeps module-level
//! state.

mod generator;
mod message;
mod options;
mod service;
mod store;
mod transcript;

pub use generator::{GenerateError, Generator};
pub use message::{ChatMessage, Role};
pub use options::{ChatOptions, DEFAULT_INSTRUCTION};
pub use service::{ChatReply, ChatService, ClearOutcome, HistorySnapshot};
pub use store::{
    normalize_chat_id, ConversationStore, InMemoryStore, DEFAULT_CHAT_ID, DEFAULT_MAX_HISTORY,
};
pub use transcript::{
    scroll_snapshot_ttl, ScrollSnapshot, TranscriptCache, MAX_TRANSCRIPT_ENTRIES,
};
