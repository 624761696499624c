//! Request and response types exchanged with the voice host.
//!
//! The host does intent recognition and speech rendering. It hands the skill
//! a `SkillRequest` and gets back a `SkillResponse` per turn.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::session::SessionId;

/// One turn of a conversation, as delivered by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequest {
    /// Host-assigned request ID (used in logs only)
    pub request_id: String,

    /// The conversation this turn belongs to
    pub session_id: SessionId,

    /// What happened
    pub kind: RequestKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestKind {
    /// A new conversation began
    SessionStarted,
    /// The user opened the skill without asking anything
    Launch,
    /// The user said something the host recognized
    Intent(IntentRequest),
    /// The conversation is over
    SessionEnded,
}

/// A recognized intent with its slot values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, String>,
}

impl IntentRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// A slot value, treating blank values as absent.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl SkillRequest {
    pub fn new(session_id: SessionId, kind: RequestKind) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            session_id,
            kind,
        }
    }

    pub fn intent(session_id: SessionId, intent: IntentRequest) -> Self {
        Self::new(session_id, RequestKind::Intent(intent))
    }
}

/// Spoken output, either plain text or speech markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum OutputSpeech {
    PlainText(String),
    Ssml(String),
}

impl OutputSpeech {
    /// Wrap paragraph markup in a `<speak>` document.
    pub fn ssml(body: impl AsRef<str>) -> Self {
        OutputSpeech::Ssml(format!("<speak>{}</speak>", body.as_ref()))
    }

    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText(s) | OutputSpeech::Ssml(s) => s,
        }
    }
}

/// A simple visual card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

/// What the skill hands back to the host for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub speech: OutputSpeech,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    /// `true` ends the conversation after this turn.
    pub should_end_session: bool,
}

impl SkillResponse {
    /// Speak and end the conversation.
    pub fn tell(speech: OutputSpeech) -> Self {
        Self {
            speech,
            reprompt: None,
            card: None,
            should_end_session: true,
        }
    }

    /// Speak and keep listening, re-asking with `reprompt` on silence.
    pub fn ask(speech: OutputSpeech, reprompt: impl Into<String>) -> Self {
        Self {
            speech,
            reprompt: Some(OutputSpeech::PlainText(reprompt.into())),
            card: None,
            should_end_session: false,
        }
    }

    pub fn with_card(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.card = Some(Card {
            title: title.into(),
            content: content.into(),
        });
        self
    }
}
