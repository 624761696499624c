//! `lunchline ask` — One-shot menu lookup.

use lunchline_core::menu::Category;
use lunchline_core::session::SessionId;
use lunchline_core::skill::{IntentRequest, RequestKind, SkillRequest};
use lunchline_skill::skill::SLOT_DAY;
use lunchline_skill::{DialogSession, InMemorySessionStore, LunchSkill};

use super::{build_skill, print_response};

pub async fn run(date: Option<String>, all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, skill) = build_skill()?;
    let store = InMemorySessionStore::new();
    let session_id = SessionId::new();
    tracing::debug!(session_id = %session_id, all, "One-shot lookup");

    let mut intent = IntentRequest::new("GetMenuIntent");
    if let Some(date) = date {
        intent = intent.with_slot(SLOT_DAY, date);
    }

    let mut response = store
        .dispatch(&skill, &SkillRequest::intent(session_id.clone(), intent))
        .await?;

    // Entrees are already out; at most one turn per remaining category.
    for _ in 1..Category::ALL.len() {
        let Some(current) = &response else { break };
        print_response(current);

        let in_dialog = DialogSession::load(&store.attributes(&session_id).await).is_some();
        if !all || current.should_end_session || !in_dialog {
            return finish(&store, &skill, session_id).await;
        }

        let more = SkillRequest::intent(session_id.clone(), IntentRequest::new("AMAZON.MoreIntent"));
        response = store.dispatch(&skill, &more).await?;
    }

    if let Some(last) = &response {
        print_response(last);
    }
    finish(&store, &skill, session_id).await
}

async fn finish(
    store: &InMemorySessionStore,
    skill: &LunchSkill,
    session_id: SessionId,
) -> Result<(), Box<dyn std::error::Error>> {
    store
        .dispatch(skill, &SkillRequest::new(session_id, RequestKind::SessionEnded))
        .await?;
    Ok(())
}
