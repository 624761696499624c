//! `lunchline chat` — Interactive conversation in the terminal.

use std::io::Write;

use lunchline_channels::{CLI_CHAT_ID, CliChannel, recognize};
use lunchline_core::channel::Channel;
use lunchline_core::clock::{Clock, SystemClock};
use lunchline_core::session::SessionId;
use lunchline_core::skill::{RequestKind, SkillRequest};
use lunchline_skill::{InMemorySessionStore, LunchSkill};

use super::{build_skill, render_response};

/// Intents after which the user is done talking.
const FAREWELLS: [&str; 3] = ["AMAZON.StopIntent", "AMAZON.CancelIntent", "AMAZON.NoIntent"];

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, skill) = build_skill()?;
    let clock = SystemClock;
    let store = InMemorySessionStore::new();
    let channel = CliChannel::new();

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║          Lunchline — Interactive Mode          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  School:    {}", config.school_name);
    println!("  Provider:  {}", config.provider_name);
    println!();
    println!("  Try: 'today', 'tomorrow', 'menu for 2025-10-07', 'more', 'help'.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut session_id = begin_session(&store, &skill).await?;
    if let Some(welcome) = store
        .dispatch(&skill, &SkillRequest::new(session_id.clone(), RequestKind::Launch))
        .await?
    {
        channel.send(CLI_CHAT_ID, &render_response(&welcome)).await?;
    }

    let mut rx = channel.start().await.map_err(|e| format!("Channel error: {e}"))?;

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(result) = rx.recv().await {
        let chan_msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        };

        let intent = recognize(&chan_msg.content, clock.today());
        tracing::debug!(channel = %chan_msg.channel_id, intent = %intent.name, "Recognized utterance");
        let farewell = FAREWELLS.contains(&intent.name.as_str());
        let request = SkillRequest::intent(session_id.clone(), intent);

        println!();
        match store.dispatch(&skill, &request).await {
            Ok(Some(response)) => {
                channel.send(&chan_msg.chat_id, &render_response(&response)).await?;
                if farewell {
                    return Ok(());
                }
                if response.should_end_session {
                    // The host would close here; the terminal just starts over.
                    session_id = begin_session(&store, &skill).await?;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("  [Error] {e}"),
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    store
        .dispatch(&skill, &SkillRequest::new(session_id, RequestKind::SessionEnded))
        .await?;

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

/// Open a fresh session and announce it to the skill.
async fn begin_session(
    store: &InMemorySessionStore,
    skill: &LunchSkill,
) -> Result<SessionId, Box<dyn std::error::Error>> {
    let session_id = SessionId::new();
    tracing::debug!(session_id = %session_id, "Starting terminal session");
    store
        .dispatch(skill, &SkillRequest::new(session_id.clone(), RequestKind::SessionStarted))
        .await?;
    Ok(session_id)
}
