//! Terminal rendering for teamcal types.

use owo_colors::OwoColorize;
use teamcal_core::event::CalendarEvent;
use teamcal_core::format::{duration_label, event_time_label};
use teamcal_core::layout::{EventRectangle, Placement};
use teamcal_core::store::User;

/// Characters used to draw an event's horizontal slot in the day view.
pub const TRACK_WIDTH: usize = 24;

pub trait Render {
    fn render(&self) -> String;
}

/// One timed event in the day view together with its layout.
pub struct DayRow<'a> {
    pub event: &'a CalendarEvent,
    pub placement: &'a Placement,
    pub owner: Option<&'a User>,
    /// Hex colour of the event or its owner
    pub color: String,
    pub total_columns: usize,
}

impl Render for DayRow<'_> {
    fn render(&self) -> String {
        let rect = &self.placement.rectangle;
        let time = event_time_label(self.event.start, self.event.end, false);
        let geometry = format!(
            "col {}/{}  top {:.2}%  height {:.2}%  left {:.2}%  width {:.2}%",
            self.placement.column + 1,
            self.total_columns,
            rect.top,
            rect.height,
            rect.left,
            rect.width,
        );

        let track = render_track(rect, TRACK_WIDTH);
        let track = match parse_hex_color(&self.color) {
            Some((r, g, b)) => track.truecolor(r, g, b).to_string(),
            None => track.cyan().to_string(),
        };

        format!(
            "  {:>13}  {}  {} {}\n  {:>13}  {}",
            time,
            track,
            self.event.title.bold(),
            owner_badge(self.owner).dimmed(),
            "",
            geometry.dimmed(),
        )
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let time = event_time_label(self.start, self.end, self.all_day);
        let length = if self.all_day {
            String::new()
        } else {
            format!("({})", duration_label(self.start, self.end))
        };
        let tag = format!("[{}]", self.category);

        format!("  {:>13} {} {} {}", time, self.title, length.dimmed(), tag.dimmed())
    }
}

fn owner_badge(owner: Option<&User>) -> String {
    match owner {
        Some(user) => format!("[{}] {}", user.initial(), user.name),
        None => "[?]".to_string(),
    }
}

/// "#3b82f6" -> (59, 130, 246)
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Draw the horizontal extent of `rect` as a bar of `width` cells.
pub fn render_track(rect: &EventRectangle, width: usize) -> String {
    (0..width)
        .map(|i| {
            let center = (i as f64 + 0.5) / width as f64 * 100.0;
            if center >= rect.left && center < rect.left + rect.width {
                '█'
            } else {
                '·'
            }
        })
        .collect()
}
