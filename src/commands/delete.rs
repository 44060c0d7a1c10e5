use anyhow::Result;
use owo_colors::OwoColorize;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::store::EventStore;

pub fn run(config: &TeamcalConfig, id: &str) -> Result<()> {
    let mut store = EventStore::load(config.events_path())?;

    let title = store.event(id).map(|e| e.title.clone()).unwrap_or_default();
    if !store.remove_event(id) {
        anyhow::bail!("Event '{}' not found in {}", id, store.path().display());
    }
    store.save()?;

    println!("{}", format!("  Deleted: {}", title).red());
    Ok(())
}
