//! Subcommand handlers and the helpers they share.

pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod doctor;
pub mod onboard;

use std::sync::Arc;

use lunchline_config::AppConfig;
use lunchline_core::clock::SystemClock;
use lunchline_core::skill::SkillResponse;
use lunchline_skill::LunchSkill;

/// Load config and wire the skill to the configured feed.
pub fn build_skill() -> Result<(AppConfig, LunchSkill), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let feed = lunchline_feed::build_from_config(&config)
        .map_err(|e| format!("Failed to set up menu feed: {e}"))?;
    let skill = LunchSkill::from_config(&config, feed, Arc::new(SystemClock));
    Ok((config, skill))
}

/// Speech markup as plain lines, one per paragraph.
pub fn speech_lines(markup: &str) -> Vec<String> {
    markup
        .replace("<speak>", "")
        .replace("</speak>", "")
        .split("</p>")
        .map(|part| part.replace("<p>", "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// A response laid out the way a screen device would show it.
pub fn render_response(response: &SkillResponse) -> String {
    let mut out = String::new();
    if let Some(card) = &response.card {
        out.push_str(&format!("  ┌ {}\n", card.title));
    }
    for line in speech_lines(response.speech.text()) {
        out.push_str(&format!("  │ {line}\n"));
    }
    out
}

pub fn print_response(response: &SkillResponse) {
    println!("{}", render_response(response));
}
