//! `lunchline doctor` — Check configuration and the menu feed.

use lunchline_config::AppConfig;
use lunchline_core::clock::{Clock, SystemClock};
use lunchline_core::cycle::spoken_date;
use lunchline_menu::{MenuFeed, resolve_cycle_index};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Lunchline Doctor — Feed Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found");
    } else {
        println!("  ⚠️  No config file, using defaults — run `lunchline onboard`");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Fix the config before checking the feed.");
            return Ok(());
        }
    };

    match check_feed(&config).await {
        Ok(()) => {}
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

async fn check_feed(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = lunchline_feed::build_from_config(config)?;
    let bytes = source.fetch_raw().await?;
    println!("  ✅ Feed reachable via {} ({} bytes)", source.name(), bytes.len());

    let feed = MenuFeed::from_bytes(&bytes)?;
    println!("  ✅ Feed decoded");
    println!("     Anchor date:   {}", spoken_date(feed.anchor_date()));
    println!("     Cycle length:  {} week(s)", feed.cycle_length());

    let today = SystemClock.today();
    match resolve_cycle_index(feed.anchor_date(), today, feed.cycle_length()) {
        Ok(index) => println!(
            "     Today:         week {} weekday {} of the cycle",
            index.week, index.weekday
        ),
        Err(e) => println!("     Today:         {e}"),
    }

    Ok(())
}
