use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::event::CalendarEvent;
use teamcal_core::filter::{EventFilter, events_for_day};
use teamcal_core::store::EventStore;
use teamcal_core::DayWindow;

use crate::render::Render;

pub fn run(config: &TeamcalConfig, from: NaiveDate, to: NaiveDate, filter: &EventFilter) -> Result<()> {
    if to < from {
        anyhow::bail!("--to ({}) is before --from ({})", to, from);
    }

    let store = EventStore::load(config.events_path())?;
    let days = group_by_day(store.events(), from, to, filter);

    if days.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (date, events)) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_date_label(*date).bold());
        for event in events {
            let owner = store
                .user(&event.user_id)
                .map(|u| u.name.as_str())
                .unwrap_or(event.user_id.as_str());
            println!("{} {}", event.render(), owner.dimmed());
        }
    }

    Ok(())
}

/// Visible events for each day in `from..=to`, skipping empty days.
/// Events spanning several days are listed under each of them.
pub(crate) fn group_by_day<'a>(
    events: &'a [CalendarEvent],
    from: NaiveDate,
    to: NaiveDate,
    filter: &EventFilter,
) -> Vec<(NaiveDate, Vec<&'a CalendarEvent>)> {
    from.iter_days()
        .take_while(|d| *d <= to)
        .filter_map(|date| {
            let mut day = events_for_day(events, &DayWindow::for_date(date), filter);
            day.sort_by(|a, b| b.all_day.cmp(&a.all_day).then(a.start.cmp(&b.start)));
            (!day.is_empty()).then_some((date, day))
        })
        .collect()
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
