use anyhow::Result;
use owo_colors::OwoColorize;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::store::{EventStore, FALLBACK_COLOR, User};

/// Arguments of `teamcal users add`.
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub color: Option<String>,
}

pub fn list(config: &TeamcalConfig) -> Result<()> {
    let store = EventStore::load(config.events_path())?;
    let users = store.users();

    if users.is_empty() {
        println!("{}", "No team members yet".dimmed());
        return Ok(());
    }

    for user in users {
        let role = [user.position.as_deref(), user.department.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        println!(
            "  [{}] {} {}  {}  {}",
            user.initial(),
            user.name.bold(),
            format!("({})", user.id).dimmed(),
            user.email,
            role.dimmed()
        );
    }

    Ok(())
}

/// Add a team member, or replace the one with the same id.
pub fn add(config: &TeamcalConfig, args: NewUser) -> Result<()> {
    let mut store = EventStore::load(config.events_path())?;
    let replacing = store.user(&args.id).is_some();

    let user = User {
        id: args.id,
        name: args.name,
        email: args.email,
        department: args.department.filter(|d| !d.is_empty()),
        position: args.position.filter(|p| !p.is_empty()),
        color: args.color.unwrap_or_else(|| FALLBACK_COLOR.to_string()),
    };
    let summary = if replacing {
        format!("  Updated: {}", user.name)
    } else {
        format!("  Added: {}", user.name)
    };

    store.upsert_user(user);
    store.save()?;

    println!("{}", summary.green());
    Ok(())
}
