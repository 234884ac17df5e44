// In-memory session store backed by DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::{Message, SessionRecord, SessionStore};
use crate::errors::ChatError;

/// Concurrent in-memory store. The default backend; anything that speaks
/// `SessionStore` can replace it.
#[derive(Default)]
pub struct MemoryStore {
    sessions: DashMap<String, SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self) -> Result<String, ChatError> {
        let id = format!("session_{}", Uuid::new_v4().simple());
        self.sessions.insert(id.clone(), SessionRecord::new(id.clone()));
        tracing::info!(session_id = %id, "Created new session");
        Ok(id)
    }

    async fn contains(&self, id: &str) -> Result<bool, ChatError> {
        Ok(self.sessions.contains_key(id))
    }

    async fn append(&self, id: &str, messages: &[Message]) -> Result<(), ChatError> {
        let mut record = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| ChatError::SessionNotFound(id.to_string()))?;
        record.messages.extend_from_slice(messages);
        Ok(())
    }

    async fn append_fenced(
        &self,
        id: &str,
        expected_len: usize,
        messages: &[Message],
    ) -> Result<(), ChatError> {
        let mut record = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| ChatError::SessionNotFound(id.to_string()))?;

        let found = record.messages.len();
        if found != expected_len {
            return Err(ChatError::StaleWrite {
                session_id: id.to_string(),
                expected: expected_len,
                found,
            });
        }

        record.messages.extend_from_slice(messages);
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<Vec<Message>, ChatError> {
        // Permissive read: unknown sessions are indistinguishable from
        // present-but-empty ones on this path.
        Ok(self
            .sessions
            .get(id)
            .map(|record| record.messages.clone())
            .unwrap_or_default())
    }

    async fn delete(&self, id: &str) -> Result<(), ChatError> {
        if self.sessions.remove(id).is_some() {
            tracing::debug!(session_id = %id, "Deleted session");
        }
        Ok(())
    }

    async fn session_count(&self) -> Result<usize, ChatError> {
        Ok(self.sessions.len())
    }
}
