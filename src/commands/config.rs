use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::layout::ColumnWidth;

pub fn run(config: &TeamcalConfig, current_user: Option<String>) -> Result<()> {
    let config_path = TeamcalConfig::config_path()?;

    if let Some(user) = current_user {
        set_current_user(config, &config_path, &user)?;
        println!("{}", format!("  Current user set to {}", user).green());
        return Ok(());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.events_path().display());

    let column_width = match config.column_width {
        ColumnWidth::Global => "global",
        ColumnWidth::PerCluster => "per-cluster",
    };
    let hidden_categories: Vec<&str> = config.hidden_categories.iter().map(|c| c.as_str()).collect();

    println!();
    println!("{}", "Settings".bold());
    println!("  Column width:       {}", column_width);
    println!(
        "  Current user:       {}",
        config.current_user.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  Privacy mode:       {}",
        if config.privacy_mode { "on" } else { "off" }
    );
    println!("  Hidden users:       {}", list_or_none(&config.hidden_users.join(", ")));
    println!("  Hidden categories:  {}", list_or_none(&hidden_categories.join(", ")));

    Ok(())
}

/// Rewrite the config file with `user` as the current user.
fn set_current_user(config: &TeamcalConfig, path: &Path, user: &str) -> Result<()> {
    let updated = TeamcalConfig {
        current_user: Some(user.to_string()),
        ..config.clone()
    };
    updated.save_to(path)?;
    tracing::debug!(path = %path.display(), user, "saved config");
    Ok(())
}

fn list_or_none(list: &str) -> &str {
    if list.is_empty() { "(none)" } else { list }
}
