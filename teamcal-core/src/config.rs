//! Global teamcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{TeamCalError, TeamCalResult};
use crate::event::EventCategory;
use crate::filter::EventFilter;
use crate::layout::{ColumnWidth, LayoutOptions};

static DEFAULT_EVENTS_FILE: &str = "~/.local/share/teamcal/events.json";

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn is_default_events_file(p: &PathBuf) -> bool {
    *p == default_events_file()
}

fn is_default_column_width(w: &ColumnWidth) -> bool {
    *w == ColumnWidth::default()
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Configuration at ~/.config/teamcal/config.toml
///
/// Every field can also be set from the environment, e.g.
/// `TEAMCAL_COLUMN_WIDTH=per-cluster` or `TEAMCAL_HIDDEN_USERS=bob,carol`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamcalConfig {
    #[serde(default = "default_events_file", skip_serializing_if = "is_default_events_file")]
    pub events_file: PathBuf,

    #[serde(default, skip_serializing_if = "is_default_column_width")]
    pub column_width: ColumnWidth,

    /// Id of the user running the CLI (owner of new events, privacy mode owner)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub privacy_mode: bool,

    /// Users whose events are never shown
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_users: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_categories: Vec<EventCategory>,
}

impl Default for TeamcalConfig {
    fn default() -> Self {
        TeamcalConfig {
            events_file: default_events_file(),
            column_width: ColumnWidth::default(),
            current_user: None,
            privacy_mode: false,
            hidden_users: Vec::new(),
            hidden_categories: Vec::new(),
        }
    }
}

impl TeamcalConfig {
    pub fn config_path() -> TeamCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TeamCalError::Config("Could not determine config directory".into()))?
            .join("teamcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out file on first run.
    pub fn load() -> TeamCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TeamCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("TEAMCAL")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("hidden_users")
                    .with_list_parse_key("hidden_categories"),
            )
            .build()
            .map_err(|e| TeamCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TeamCalError::Config(e.to_string()))
    }

    /// Events file with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            column_width: self.column_width,
            ..LayoutOptions::default()
        }
    }

    pub fn filter(&self) -> EventFilter {
        EventFilter {
            hidden_users: self.hidden_users.clone(),
            hidden_categories: self.hidden_categories.clone(),
            privacy_mode: self.privacy_mode,
            privacy_owner: self.current_user.clone(),
        }
    }

    pub fn save_to(&self, path: &Path) -> TeamCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TeamCalError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| TeamCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TeamCalResult<()> {
        let contents = format!(
            "\
# teamcal configuration

# Where events and team members are stored:
# events_file = \"{}\"

# How overlapping events share the day view width:
# \"global\" sizes every column by the busiest moment of the day,
# \"per-cluster\" sizes each group of overlapping events on its own.
# column_width = \"global\"

# Your user id (owner of new events):
# current_user = \"alice\"

# Only show your own events:
# privacy_mode = false

# Hide other people's events or whole categories
# (meeting, personal, project, holiday, deadline, training, other):
# hidden_users = [\"bob\"]
# hidden_categories = [\"personal\"]
",
            DEFAULT_EVENTS_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TeamCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TeamCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
