//! In-memory session store — holds attributes between turns for hosts
//! (like the CLI) that do not round-trip them.

use std::collections::HashMap;
use std::sync::Arc;

use lunchline_core::error::Result;
use lunchline_core::session::{SessionAttributes, SessionId};
use lunchline_core::skill::{RequestKind, SkillRequest, SkillResponse};
use tokio::sync::RwLock;
use tracing::debug;

use crate::skill::LunchSkill;

/// Session attributes keyed by session ID.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionAttributes>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Attributes for `id`; empty if the session is unknown.
    pub async fn attributes(&self, id: &SessionId) -> SessionAttributes {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn save(&self, id: &SessionId, attributes: SessionAttributes) {
        self.sessions.write().await.insert(id.clone(), attributes);
    }

    /// Drop a session. Returns whether it existed.
    pub async fn end(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Run one turn against `skill` with this store's attributes.
    ///
    /// The session is dropped when the response ends it or the host reports
    /// it ended; otherwise the updated attributes are kept for the next turn.
    pub async fn dispatch(
        &self,
        skill: &LunchSkill,
        request: &SkillRequest,
    ) -> Result<Option<SkillResponse>> {
        let id = &request.session_id;
        let mut attributes = self.attributes(id).await;
        let response = skill.handle(request, &mut attributes).await?;

        let ended = matches!(request.kind, RequestKind::SessionEnded)
            || response.as_ref().is_some_and(|r| r.should_end_session);
        if ended {
            debug!(session_id = %id, "Dropping session");
            self.end(id).await;
        } else {
            self.save(id, attributes).await;
        }
        Ok(response)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}
