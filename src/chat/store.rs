//! Conversation storage.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::ChatMessage;
use crate::error::{Error, Result};

/// Chat id used when none (or a blank one) is given.
pub const DEFAULT_CHAT_ID: &str = "default";

/// Default number of messages kept per chat.
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Normalise a chat id: trimmed, blank or missing ids map to
/// [`DEFAULT_CHAT_ID`].
pub fn normalize_chat_id(chat_id: Option<&str>) -> String {
    match chat_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => DEFAULT_CHAT_ID.to_string(),
    }
}

/// Per-chat message history.
///
/// Implement this trait to back conversations with real persistence.
/// Callers pass ids already normalised with [`normalize_chat_id`].
pub trait ConversationStore: Send + Sync {
    /// Append a message to a chat, trimming the chat to its history limit.
    fn append(&self, chat_id: &str, message: ChatMessage) -> Result<()>;

    /// Append a message and return up to `n` messages that precede it,
    /// oldest first.
    ///
    /// The default runs [`append`](Self::append) then
    /// [`recent`](Self::recent); stores with a single lock should override
    /// it so a concurrent writer cannot slip in between.
    fn append_with_context(
        &self,
        chat_id: &str,
        message: ChatMessage,
        n: usize,
    ) -> Result<Vec<ChatMessage>> {
        self.append(chat_id, message)?;
        let mut context = self.recent(chat_id, n + 1)?;
        context.pop();
        Ok(context)
    }

    /// The last `n` messages of a chat, oldest first.
    fn recent(&self, chat_id: &str, n: usize) -> Result<Vec<ChatMessage>>;

    /// The full retained history of a chat, oldest first.
    fn history(&self, chat_id: &str) -> Result<Vec<ChatMessage>>;

    /// Empty one chat.
    fn clear(&self, chat_id: &str) -> Result<()>;

    /// Remove every chat.
    fn clear_all(&self) -> Result<()>;

    /// Ids of all chats that have been touched.
    fn chat_ids(&self) -> Result<Vec<String>>;

    /// Number of retained messages in a chat.
    fn message_count(&self, chat_id: &str) -> Result<usize> {
        Ok(self.history(chat_id)?.len())
    }
}

/// In-process store: a map of chat id to message list.
#[derive(Debug)]
pub struct InMemoryStore {
    chats: RwLock<HashMap<String, Vec<ChatMessage>>>,
    max_history: usize,
}

impl InMemoryStore {
    /// Create a store keeping [`DEFAULT_MAX_HISTORY`] messages per chat.
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Create a store keeping at most `max_history` messages per chat.
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            chats: RwLock::new(HashMap::new()),
            max_history: max_history.max(1),
        }
    }

    /// Per-chat history limit.
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<ChatMessage>>>> {
        self.chats
            .read()
            .map_err(|e| Error::Store(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<ChatMessage>>>> {
        self.chats
            .write()
            .map_err(|e| Error::Store(format!("lock poisoned: {}", e)))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    fn push_trimmed<'a>(
        &self,
        chats: &'a mut HashMap<String, Vec<ChatMessage>>,
        chat_id: &str,
        message: ChatMessage,
    ) -> &'a [ChatMessage] {
        let history = chats.entry(chat_id.to_string()).or_default();
        history.push(message);
        if history.len() > self.max_history {
            let excess = history.len() - self.max_history;
            history.drain(..excess);
            log::debug!("Trimmed {} message(s) from chat '{}'", excess, chat_id);
        }
        history
    }
}

impl ConversationStore for InMemoryStore {
    fn append(&self, chat_id: &str, message: ChatMessage) -> Result<()> {
        let mut chats = self.write()?;
        self.push_trimmed(&mut chats, chat_id, message);
        Ok(())
    }

    fn append_with_context(
        &self,
        chat_id: &str,
        message: ChatMessage,
        n: usize,
    ) -> Result<Vec<ChatMessage>> {
        let mut chats = self.write()?;
        let history = self.push_trimmed(&mut chats, chat_id, message);
        let before = &history[..history.len() - 1];
        Ok(before[before.len().saturating_sub(n)..].to_vec())
    }

    fn recent(&self, chat_id: &str, n: usize) -> Result<Vec<ChatMessage>> {
        let chats = self.read()?;
        Ok(chats
            .get(chat_id)
            .map(|history| history[history.len().saturating_sub(n)..].to_vec())
            .unwrap_or_default())
    }

    fn history(&self, chat_id: &str) -> Result<Vec<ChatMessage>> {
        let chats = self.read()?;
        Ok(chats.get(chat_id).cloned().unwrap_or_default())
    }

    fn clear(&self, chat_id: &str) -> Result<()> {
        let mut chats = self.write()?;
        chats.insert(chat_id.to_string(), Vec::new());
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut chats = self.write()?;
        chats.clear();
        Ok(())
    }

    fn chat_ids(&self) -> Result<Vec<String>> {
        let chats = self.read()?;
        let mut ids: Vec<String> = chats.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn message_count(&self, chat_id: &str) -> Result<usize> {
        let chats = self.read()?;
        Ok(chats.get(chat_id).map_or(0, Vec::len))
    }
}
