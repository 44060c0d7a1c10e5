//! Core types for teamcal.
//!
//! This crate provides the pieces shared by the CLI and any other front end:
//! - `event` and `store` for calendar events and the local event source
//! - `day_window` and `layout` for positioning timed events in the day view
//! - `filter` and `format` for deciding what is shown and how it is labelled

pub mod config;
pub mod day_window;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod layout;
pub mod store;

pub use day_window::DayWindow;
pub use error::{TeamCalError, TeamCalResult};
pub use event::{CalendarEvent, EventCategory, TimedEvent};
pub use layout::{ColumnWidth, DayLayout, EventRectangle, LayoutOptions, Placement, layout, layout_with};
