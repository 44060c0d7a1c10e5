//! Which events are shown.
//!
//! Filtering happens before layout: the layout engine only ever sees events
//! that passed the filter and touch the displayed day.

use serde::{Deserialize, Serialize};

use crate::day_window::DayWindow;
use crate::event::{CalendarEvent, EventCategory};

/// Sidebar filters plus privacy mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Users whose events are hidden
    #[serde(default)]
    pub hidden_users: Vec<String>,
    /// Categories that are hidden
    #[serde(default)]
    pub hidden_categories: Vec<EventCategory>,
    /// When set, only events owned by `privacy_owner` are shown
    #[serde(default)]
    pub privacy_mode: bool,
    #[serde(default)]
    pub privacy_owner: Option<String>,
}

impl EventFilter {
    pub fn is_visible(&self, event: &CalendarEvent) -> bool {
        if self.privacy_mode {
            // Without a known owner nothing can be shown
            match &self.privacy_owner {
                Some(owner) if *owner == event.user_id => {}
                _ => return false,
            }
        }

        !self.hidden_users.contains(&event.user_id)
            && !self.hidden_categories.contains(&event.category)
    }

    pub fn hide_user(&mut self, user_id: &str) {
        if !self.hidden_users.iter().any(|u| u == user_id) {
            self.hidden_users.push(user_id.to_string());
        }
    }

    pub fn hide_category(&mut self, category: EventCategory) {
        if !self.hidden_categories.contains(&category) {
            self.hidden_categories.push(category);
        }
    }
}

/// Events that pass `filter` and touch `window`, in their original order.
pub fn events_for_day<'a>(
    events: &'a [CalendarEvent],
    window: &DayWindow,
    filter: &EventFilter,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|e| filter.is_visible(e))
        .filter(|e| window.touches(e.start, e.end))
        .collect()
}
