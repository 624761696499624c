//! `lunchline config` — Configuration management commands.

use lunchline_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed and validated");
            println!();
            println!("   Skill:     {}", config.skill_name);
            println!("   School:    {}", config.school_name);
            println!("   Provider:  {}", config.provider_name);
            match &config.feed.file {
                Some(path) => println!("   Feed:      file {}", path.display()),
                None => println!(
                    "   Feed:      {} (timeout {}s)",
                    config.feed.url, config.feed.timeout_secs
                ),
            }
            for (slot, category) in config.stations.table().iter() {
                println!("   Station {slot}: {category}");
            }
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = lunchline_config::AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().contains("config.toml"));
    }
}
