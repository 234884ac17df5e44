// Conversation orchestration
//
// Per-message flow: Received -> Classified -> {CrisisShortCircuit |
// ProviderInvoked} -> Persisted -> Replied. Strictly linear, no cycles.
// Crisis turns never reach the gateway.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::context::{build_context, DEFAULT_MAX_TURNS};
use crate::crisis::{KeywordClassifier, Severity};
use crate::errors::ChatError;
use crate::providers::{CompletionRequest, ProviderGateway};
use crate::session::{Message, SessionStore};

/// Conversation-level policy knobs.
#[derive(Debug, Clone)]
pub struct ChatPolicy {
    /// System instruction prepended to every context window.
    pub system_prompt: String,
    /// Context window size in turns, including the new user turn.
    pub max_context_turns: usize,
    /// Whether the crisis resource reply is appended to history alongside
    /// the user turn. Explicit policy, never inferred.
    pub persist_crisis_reply: bool,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_context_turns: DEFAULT_MAX_TURNS,
            persist_crisis_reply: true,
        }
    }
}

/// What the caller gets back for one turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub reply: String,
    pub severity: Severity,
}

pub struct ConversationService {
    store: Arc<dyn SessionStore>,
    classifier: KeywordClassifier,
    gateway: ProviderGateway,
    policy: ChatPolicy,
    /// Per-session turn locks: single writer per session, sessions fully
    /// parallel with each other.
    turn_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ConversationService {
    pub fn new(store: Arc<dyn SessionStore>, gateway: ProviderGateway, policy: ChatPolicy) -> Self {
        Self {
            store,
            classifier: KeywordClassifier::new(),
            gateway,
            policy,
            turn_locks: DashMap::new(),
        }
    }

    pub async fn create_session(&self) -> Result<String, ChatError> {
        self.store.create().await
    }

    /// Full ordered history. Unknown sessions read as empty.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        self.store.read(session_id).await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), ChatError> {
        self.turn_locks.remove(session_id);
        self.store.delete(session_id).await
    }

    pub async fn session_count(&self) -> Result<usize, ChatError> {
        self.store.session_count().await
    }

    /// Handle one incoming user message.
    pub async fn send_message(&self, session_id: &str, text: &str) -> Result<TurnReply, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        // The lock covers read, provider call, and append: two turns for
        // the same session can never interleave their context windows.
        let lock = self.turn_lock(session_id);
        let _guard = lock.lock().await;

        if !self.store.contains(session_id).await? {
            return Err(ChatError::SessionNotFound(session_id.to_string()));
        }

        let crisis = self.classifier.classify(trimmed);
        if crisis.severity.is_crisis() {
            tracing::info!(
                session_id = %session_id,
                severity = ?crisis.severity,
                keyword = %crisis.keyword,
                "Crisis short-circuit, provider bypassed"
            );

            let mut turns = vec![Message::user(trimmed)];
            if self.policy.persist_crisis_reply {
                turns.push(Message::assistant(&crisis.response));
            }
            self.store.append(session_id, &turns).await?;

            return Ok(TurnReply {
                reply: crisis.response,
                severity: crisis.severity,
            });
        }

        let history = self.store.read(session_id).await?;
        let fence = history.len();

        let window = build_context(
            &history,
            trimmed,
            &self.policy.system_prompt,
            self.policy.max_context_turns,
        )?;

        let reply = self
            .gateway
            .complete(&CompletionRequest::new(window), trimmed)
            .await;

        tracing::info!(
            session_id = %session_id,
            source = ?reply.source,
            "Reply generated"
        );

        self.store
            .append_fenced(
                session_id,
                fence,
                &[Message::user(trimmed), Message::assistant(&reply.text)],
            )
            .await?;

        Ok(TurnReply {
            reply: reply.text,
            severity: Severity::None,
        })
    }

    fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.turn_locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    fn service_with_policy(policy: ChatPolicy) -> ConversationService {
        ConversationService::new(
            Arc::new(MemoryStore::new()),
            ProviderGateway::new(vec![]),
            policy,
        )
    }

    #[tokio::test]
    async fn test_blank_input_rejected_without_mutation() {
        let service = service_with_policy(ChatPolicy::default());
        let id = service.create_session().await.unwrap();

        let result = service.send_message(&id, "   \n  ").await;
        assert!(matches!(result, Err(ChatError::EmptyInput)));
        assert!(service.history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_to_unknown_session_fails() {
        let service = service_with_policy(ChatPolicy::default());

        let result = service.send_message("session_missing", "你好").await;
        assert!(matches!(result, Err(ChatError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_crisis_reply_persistence_flag() {
        // Persisted: user turn + resource reply
        let service = service_with_policy(ChatPolicy::default());
        let id = service.create_session().await.unwrap();
        service.send_message(&id, "我想自杀").await.unwrap();
        assert_eq!(service.history(&id).await.unwrap().len(), 2);

        // Not persisted: user turn only
        let service = service_with_policy(ChatPolicy {
            persist_crisis_reply: false,
            ..ChatPolicy::default()
        });
        let id = service.create_session().await.unwrap();
        let reply = service.send_message(&id, "我想自杀").await.unwrap();
        assert_eq!(reply.severity, Severity::Critical);
        assert_eq!(service.history(&id).await.unwrap().len(), 1);
    }
}
