use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::event::{CalendarEvent, TimedEvent};
use teamcal_core::filter::{EventFilter, events_for_day};
use teamcal_core::format::{day_hours, is_business_hour};
use teamcal_core::layout::{ColumnWidth, DayLayout, LayoutOptions, Placement, layout_with};
use teamcal_core::store::EventStore;
use teamcal_core::DayWindow;

use crate::render::{DayRow, Render};

/// Everything needed to draw one day.
pub struct DayView<'a> {
    pub window: DayWindow,
    pub events: Vec<&'a CalendarEvent>,
    pub layout: DayLayout,
}

impl<'a> DayView<'a> {
    pub fn build(
        store: &'a EventStore,
        window: DayWindow,
        filter: &EventFilter,
        options: &LayoutOptions,
    ) -> Result<Self> {
        let events = events_for_day(store.events(), &window, filter);
        let timed: Vec<TimedEvent> = events.iter().map(|e| e.timed()).collect();
        let layout = layout_with(&timed, &window, options)?;

        Ok(DayView {
            window,
            events,
            layout,
        })
    }

    pub fn all_day_events(&self) -> impl Iterator<Item = &&'a CalendarEvent> {
        self.events.iter().filter(|e| e.all_day)
    }

    fn event(&self, id: &str) -> Option<&'a CalendarEvent> {
        self.events.iter().copied().find(|e| e.id == id)
    }

    /// Placements grouped by the hour they start in. Business hours are
    /// always listed, other hours only when something starts in them.
    pub fn hours(&self) -> Vec<(u32, Vec<&Placement>)> {
        day_hours()
            .filter_map(|hour| {
                let starting: Vec<_> = self
                    .layout
                    .placements
                    .iter()
                    .filter(|p| start_hour(p) == hour)
                    .collect();
                (is_business_hour(hour) || !starting.is_empty()).then_some((hour, starting))
            })
            .collect()
    }
}

/// An event starting exactly at the next midnight is listed under 23:00.
fn start_hour(placement: &Placement) -> u32 {
    (placement.start_minute / 60).min(23) as u32
}

pub fn run(
    config: &TeamcalConfig,
    date: NaiveDate,
    filter: &EventFilter,
    per_cluster: bool,
    json: bool,
) -> Result<()> {
    let store = EventStore::load(config.events_path())?;

    let mut options = config.layout_options();
    if per_cluster {
        options.column_width = ColumnWidth::PerCluster;
    }

    let view = DayView::build(&store, DayWindow::for_date(date), filter, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view.layout)?);
        return Ok(());
    }

    let header = view.window.date().format("%A, %B %-d %Y").to_string();
    println!("{}  {}", header.bold(), format!("{} events", view.events.len()).dimmed());

    let all_day: Vec<_> = view.all_day_events().collect();
    if !all_day.is_empty() {
        println!();
        println!("{}", "All-day".bold());
        for event in all_day {
            println!("{}", event.render());
        }
    }

    println!();
    for (hour, placements) in view.hours() {
        let label = format!("{:02}:00", hour);
        if is_business_hour(hour) {
            println!("{}", label.bold());
        } else {
            println!("{}", label.dimmed());
        }

        for placement in placements {
            let Some(event) = view.event(&placement.id) else {
                continue;
            };
            let row = DayRow {
                event,
                placement,
                owner: store.user(&event.user_id),
                color: store.color_for(event),
                total_columns: view.layout.total_columns,
            };
            println!("{}", row.render());
        }
    }

    Ok(())
}
