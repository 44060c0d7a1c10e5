//! Local event store.
//!
//! Events and team members are kept in a single JSON document on disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TeamCalError, TeamCalResult};
use crate::event::CalendarEvent;

/// Colour used for events whose owner is unknown.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// A team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub color: String,
}

impl User {
    /// First letter of the name, shown as a badge on events.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    events: Vec<CalendarEvent>,
}

pub struct EventStore {
    path: PathBuf,
    data: StoreData,
}

impl EventStore {
    /// Load the store at `path`. A missing file is an empty store.
    ///
    /// Rows that `add_event` would refuse (reversed ranges, repeated ids) are
    /// dropped with a warning so one bad row cannot block the whole calendar.
    pub fn load(path: impl Into<PathBuf>) -> TeamCalResult<Self> {
        let path = path.into();

        let mut data: StoreData = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                TeamCalError::Serialization(format!("{}: {}", path.display(), e))
            })?
        } else {
            tracing::debug!(path = %path.display(), "event store not found, starting empty");
            StoreData::default()
        };

        data.events = drop_invalid_events(data.events);
        Ok(EventStore { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> TeamCalResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.data)
            .map_err(|e| TeamCalError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.data.events
    }

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.data.users.iter().find(|u| u.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&CalendarEvent> {
        self.data.events.iter().find(|e| e.id == id)
    }

    /// Event colour, falling back to the owner's colour.
    pub fn color_for(&self, event: &CalendarEvent) -> String {
        event
            .color
            .clone()
            .or_else(|| self.user(&event.user_id).map(|u| u.color.clone()))
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }

    pub fn add_event(&mut self, event: CalendarEvent) -> TeamCalResult<()> {
        event.timed().validate()?;
        if self.event(&event.id).is_some() {
            return Err(TeamCalError::DuplicateEventId(event.id));
        }
        self.data.events.push(event);
        Ok(())
    }

    /// Returns true if an event was removed.
    pub fn remove_event(&mut self, id: &str) -> bool {
        let before = self.data.events.len();
        self.data.events.retain(|e| e.id != id);
        self.data.events.len() != before
    }

    pub fn upsert_user(&mut self, user: User) {
        match self.data.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => self.data.users.push(user),
        }
    }
}

fn drop_invalid_events(events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut seen = HashSet::new();

    events
        .into_iter()
        .filter(|event| {
            if let Err(e) = event.timed().validate() {
                tracing::warn!(id = %event.id, title = %event.title, "skipping event: {}", e);
                return false;
            }
            if !seen.insert(event.id.clone()) {
                tracing::warn!(id = %event.id, title = %event.title, "skipping event with repeated id");
                return false;
            }
            true
        })
        .collect()
}
