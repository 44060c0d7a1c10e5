use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use owo_colors::OwoColorize;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::event::{CalendarEvent, EventCategory};
use teamcal_core::format::event_time_label;
use teamcal_core::store::EventStore;

/// Arguments of `teamcal new`, as typed on the command line.
pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub user: Option<String>,
    pub category: String,
    pub location: Option<String>,
}

/// A start or end typed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
enum When {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl When {
    fn is_all_day(&self) -> bool {
        matches!(self, When::Date(_))
    }

    fn instant(&self) -> NaiveDateTime {
        match self {
            When::Date(d) => d.and_time(NaiveTime::MIN),
            When::DateTime(dt) => *dt,
        }
    }
}

pub fn run(config: &TeamcalConfig, args: NewEvent) -> Result<()> {
    let user = args
        .user
        .or_else(|| config.current_user.clone())
        .context("No owner for the event. Pass --user or set current_user in the config")?;

    let category: EventCategory = args.category.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let start = parse_when(&args.start)?;
    let end = match (args.end, args.duration) {
        (Some(end), _) => parse_end(&end, start)?,
        (None, Some(duration)) => apply_duration(start, &duration)?,
        (None, None) => default_end(start),
    };

    if end < start.instant() {
        anyhow::bail!("Event would end before it starts");
    }

    let mut event = CalendarEvent::new(
        args.title,
        start.instant(),
        end,
        start.is_all_day(),
        user,
        category,
    );
    event.location = args.location.filter(|l| !l.is_empty());

    let mut store = EventStore::load(config.events_path())?;
    let label = event_time_label(event.start, event.end, event.all_day);
    let summary = format!("  Created: {} ({})", event.title, label);
    let id = event.id.clone();

    store.add_event(event)?;
    store.save()?;

    tracing::debug!(%id, path = %store.path().display(), "saved event");
    println!("{}", summary.green());
    println!("  {}", id.dimmed());

    Ok(())
}

/// "2025-03-20T15:00", "2025-03-20 15:00" or "2025-03-20" (all-day).
fn parse_when(input: &str) -> Result<When> {
    let input = input.trim();

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(When::DateTime(dt));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(When::Date)
        .with_context(|| {
            format!(
                "Could not parse date/time: \"{}\". Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
                input
            )
        })
}

/// Last second of an all-day event ending on `date`. Ending at the next
/// midnight would make the event touch the following day as well.
fn all_day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1)
}

/// An all-day end date is inclusive.
fn parse_end(input: &str, start: When) -> Result<NaiveDateTime> {
    match (parse_when(input)?, start) {
        (When::Date(d), When::Date(_)) => Ok(all_day_end(d)),
        (end, _) => Ok(end.instant()),
    }
}

fn apply_duration(start: When, input: &str) -> Result<NaiveDateTime> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    Ok(start.instant() + chrono_dur)
}

/// Default end: +1 hour for timed events, the end of the same day for all-day events.
fn default_end(start: When) -> NaiveDateTime {
    match start {
        When::Date(d) => all_day_end(d),
        When::DateTime(dt) => dt + Duration::hours(1),
    }
}
