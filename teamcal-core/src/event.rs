//! Team calendar event types.
//!
//! `CalendarEvent` is what the store holds and the front ends display.
//! `TimedEvent` is the slimmed-down record the day-view layout engine works on.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{TeamCalError, TeamCalResult};

/// Category an event is filed under (used by the sidebar filters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Meeting,
    Personal,
    Project,
    Holiday,
    Deadline,
    Training,
    #[default]
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 7] = [
        EventCategory::Meeting,
        EventCategory::Personal,
        EventCategory::Project,
        EventCategory::Holiday,
        EventCategory::Deadline,
        EventCategory::Training,
        EventCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "meeting",
            EventCategory::Personal => "personal",
            EventCategory::Project => "project",
            EventCategory::Holiday => "holiday",
            EventCategory::Deadline => "deadline",
            EventCategory::Training => "training",
            EventCategory::Other => "other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                let names: Vec<_> = EventCategory::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}

/// A calendar event owned by a team member.
///
/// Instants are naive: they are already expressed in the timezone the
/// calendar is rendered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Overrides the owner's colour when set (e.g. "#3b82f6")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub category: EventCategory,
}

impl CalendarEvent {
    /// Create a new event with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        all_day: bool,
        user_id: impl Into<String>,
        category: EventCategory,
    ) -> Self {
        CalendarEvent {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            start,
            end,
            all_day,
            user_id: user_id.into(),
            location: None,
            color: None,
            category,
        }
    }

    /// The part of this event the layout engine needs.
    pub fn timed(&self) -> TimedEvent {
        TimedEvent {
            id: self.id.clone(),
            start: self.start,
            end: self.end,
            all_day: self.all_day,
        }
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Input record for the day-view layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
}

impl TimedEvent {
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimedEvent {
            id: id.into(),
            start,
            end,
            all_day: false,
        }
    }

    pub fn all_day(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimedEvent {
            all_day: true,
            ..TimedEvent::new(id, start, end)
        }
    }

    /// Reject events that end before they start.
    pub fn validate(&self) -> TeamCalResult<()> {
        if self.start > self.end {
            return Err(TeamCalError::InvalidEventRange {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl From<&CalendarEvent> for TimedEvent {
    fn from(event: &CalendarEvent) -> Self {
        event.timed()
    }
}
