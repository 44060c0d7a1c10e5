pub mod config;
pub mod day;
pub mod delete;
pub mod events;
pub mod new;
pub mod users;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use teamcal_core::config::TeamcalConfig;
use teamcal_core::event::EventCategory;
use teamcal_core::filter::EventFilter;

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

pub fn parse_date_or_today(s: Option<&str>) -> Result<NaiveDate> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// The configured filter plus users and categories hidden on the command line.
pub fn build_filter(
    config: &TeamcalConfig,
    hide_users: &[String],
    hide_categories: &[String],
) -> Result<EventFilter> {
    let mut filter = config.filter();

    for user in hide_users {
        filter.hide_user(user);
    }
    for name in hide_categories {
        let category: EventCategory = name.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        filter.hide_category(category);
    }

    Ok(filter)
}
