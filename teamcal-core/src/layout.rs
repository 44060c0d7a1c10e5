//! Day-view event layout.
//!
//! Timed events are packed into side-by-side columns so that overlapping
//! events never share a column, and each event's time range is mapped onto a
//! vertical 24-hour axis. All geometry is expressed in percent of the event
//! area so the renderer can scale it to whatever pixel size it has.
//!
//! Column packing is greedy and order dependent: events are sorted by start
//! (ties: later end first, then input order) and each one takes the lowest
//! column that holds no event it overlaps. By default the column width is
//! shared by the whole day, so a single overlap anywhere narrows every event.
//! [`ColumnWidth::PerCluster`] instead sizes each group of transitively
//! overlapping events on its own.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::day_window::{DayWindow, MINUTES_PER_DAY};
use crate::error::{TeamCalError, TeamCalResult};
use crate::event::TimedEvent;

/// Smallest height (percent) an event is drawn with, so short events stay clickable.
pub const MIN_HEIGHT_PERCENT: f64 = 2.0;

/// Stack order of column 0. Lower values belong to the time-grid background.
pub const STACK_BASE: i32 = 10;

/// Where an event is drawn inside the day view, in percent of the event area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRectangle {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
    pub stack_order: i32,
}

/// How column width is shared between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnWidth {
    /// One width for the whole day, sized by the highest column used anywhere.
    #[default]
    Global,
    /// Each cluster of overlapping events is sized by its own column count.
    PerCluster,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub column_width: ColumnWidth,
    pub min_height_percent: f64,
    pub stack_base: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            column_width: ColumnWidth::Global,
            min_height_percent: MIN_HEIGHT_PERCENT,
            stack_base: STACK_BASE,
        }
    }
}

/// Layout details for one timed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: String,
    pub column: usize,
    /// Index of the group of transitively overlapping events this one belongs to
    pub cluster: usize,
    /// 1 + number of other events this one overlaps
    pub max_overlap: usize,
    pub start_minute: i64,
    pub end_minute: i64,
    pub rectangle: EventRectangle,
}

/// Result of laying out one day. Placements are in packing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub placements: Vec<Placement>,
    pub total_columns: usize,
}

impl Default for DayLayout {
    fn default() -> Self {
        DayLayout {
            placements: Vec::new(),
            total_columns: 1,
        }
    }
}

impl DayLayout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn rectangle(&self, id: &str) -> Option<EventRectangle> {
        self.placement(id).map(|p| p.rectangle)
    }

    pub fn rectangles(&self) -> HashMap<String, EventRectangle> {
        self.placements
            .iter()
            .map(|p| (p.id.clone(), p.rectangle))
            .collect()
    }
}

/// A clamped time range in minutes from the start of the day.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: i64,
    end: i64,
}

impl Span {
    /// Strict overlap: touching ranges do not overlap.
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Lay out `events` for `window` with the default options.
///
/// All-day events are skipped and get no rectangle.
pub fn layout(
    events: &[TimedEvent],
    window: &DayWindow,
) -> TeamCalResult<HashMap<String, EventRectangle>> {
    Ok(layout_with(events, window, &LayoutOptions::default())?.rectangles())
}

/// Lay out `events` for `window`.
///
/// The whole call fails if any event ends before it starts or if an id is
/// repeated; nothing is laid out in that case.
pub fn layout_with(
    events: &[TimedEvent],
    window: &DayWindow,
    options: &LayoutOptions,
) -> TeamCalResult<DayLayout> {
    let mut seen = HashSet::new();
    for event in events {
        if !seen.insert(event.id.as_str()) {
            return Err(TeamCalError::DuplicateEventId(event.id.clone()));
        }
    }

    let mut timed: Vec<&TimedEvent> = events.iter().filter(|e| !e.all_day).collect();
    for event in &timed {
        event.validate()?;
    }

    // Stable sort keeps input order for identical ranges
    timed.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    if timed.is_empty() {
        return Ok(DayLayout::default());
    }

    let spans: Vec<Span> = timed
        .iter()
        .map(|e| Span {
            start: window.minutes_from_start(e.start),
            end: window.minutes_from_start(e.end),
        })
        .collect();

    let columns = pack_columns(&spans);
    let clusters = find_clusters(&spans);
    let overlaps = overlap_counts(&spans);

    let total_columns = columns.iter().max().map_or(1, |max| max + 1);

    let cluster_count = clusters.iter().max().map_or(0, |max| max + 1);
    let mut cluster_columns = vec![1usize; cluster_count];
    for (column, cluster) in columns.iter().zip(&clusters) {
        cluster_columns[*cluster] = cluster_columns[*cluster].max(column + 1);
    }

    let placements: Vec<Placement> = timed
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let span = spans[i];
            let column_count = match options.column_width {
                ColumnWidth::Global => total_columns,
                ColumnWidth::PerCluster => cluster_columns[clusters[i]],
            };
            let width = 100.0 / column_count as f64;

            Placement {
                id: event.id.clone(),
                column: columns[i],
                cluster: clusters[i],
                max_overlap: overlaps[i],
                start_minute: span.start,
                end_minute: span.end,
                rectangle: EventRectangle {
                    top: minutes_to_percent(span.start),
                    height: minutes_to_percent(span.end - span.start)
                        .max(options.min_height_percent),
                    left: columns[i] as f64 * width,
                    width,
                    stack_order: columns[i] as i32 + options.stack_base,
                },
            }
        })
        .collect();

    tracing::debug!(
        date = %window.date(),
        events = placements.len(),
        skipped_all_day = events.len() - placements.len(),
        total_columns,
        clusters = cluster_count,
        "laid out day view"
    );

    Ok(DayLayout {
        placements,
        total_columns,
    })
}

fn minutes_to_percent(minutes: i64) -> f64 {
    minutes as f64 / MINUTES_PER_DAY as f64 * 100.0
}

/// First-fit column assignment over spans in packing order.
fn pack_columns(spans: &[Span]) -> Vec<usize> {
    let mut columns: Vec<Vec<Span>> = Vec::new();
    let mut assigned = Vec::with_capacity(spans.len());

    for span in spans {
        let free = columns
            .iter()
            .position(|placed| placed.iter().all(|other| !span.overlaps(other)));

        let index = match free {
            Some(index) => index,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };

        columns[index].push(*span);
        assigned.push(index);
    }

    assigned
}

/// For each span, 1 + the number of other spans it overlaps.
fn overlap_counts(spans: &[Span]) -> Vec<usize> {
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let others = spans
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && span.overlaps(other))
                .count();
            others + 1
        })
        .collect()
}

/// Number connected groups of overlapping spans, in order of first appearance.
fn find_clusters(spans: &[Span]) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..spans.len()).collect();

    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for i in 0..spans.len() {
        for j in (i + 1)..spans.len() {
            if spans[i].overlaps(&spans[j]) {
                let (a, b) = (root(&mut parent, i), root(&mut parent, j));
                if a != b {
                    parent[a.max(b)] = a.min(b);
                }
            }
        }
    }

    let mut numbering: HashMap<usize, usize> = HashMap::new();
    (0..spans.len())
        .map(|i| {
            let r = root(&mut parent, i);
            let next = numbering.len();
            *numbering.entry(r).or_insert(next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn day() -> DayWindow {
        DayWindow::for_date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: (u32, u32), end: (u32, u32)) -> TimedEvent {
        TimedEvent::new(id, at(start.0, start.1), at(end.0, end.1))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let rects = layout(&[], &day()).unwrap();
        assert!(rects.is_empty());
    }

    #[test]
    fn single_event_takes_full_width() {
        let rects = layout(&[event("a", (9, 0), (10, 0))], &day()).unwrap();
        let a = rects["a"];
        assert_close(a.top, 37.5);
        assert_close(a.height, 100.0 / 24.0);
        assert_close(a.left, 0.0);
        assert_close(a.width, 100.0);
        assert_eq!(a.stack_order, 10);
    }

    #[test]
    fn overlapping_events_split_into_two_columns() {
        let events = [event("a", (9, 0), (10, 0)), event("b", (9, 30), (10, 30))];
        let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
        assert_eq!(result.total_columns, 2);

        let a = result.rectangle("a").unwrap();
        let b = result.rectangle("b").unwrap();
        assert_close(a.left, 0.0);
        assert_close(a.width, 50.0);
        assert_close(b.left, 50.0);
        assert_close(b.width, 50.0);
        assert_close(b.top, 570.0 / 1440.0 * 100.0);
        assert_eq!(b.stack_order, 11);
    }

    #[test]
    fn touching_events_share_a_column() {
        let events = [event("a", (9, 0), (10, 0)), event("b", (10, 0), (11, 0))];
        let rects = layout(&events, &day()).unwrap();
        for id in ["a", "b"] {
            assert_close(rects[id].left, 0.0);
            assert_close(rects[id].width, 100.0);
        }
    }

    #[test]
    fn all_day_events_get_no_rectangle() {
        let events = [TimedEvent::all_day("a", at(8, 0), at(9, 0))];
        assert!(layout(&events, &day()).unwrap().is_empty());
    }

    #[test]
    fn all_day_events_do_not_take_a_column() {
        let events = [
            TimedEvent::all_day("holiday", at(0, 0), at(23, 59)),
            event("a", (9, 0), (10, 0)),
        ];
        let rects = layout(&events, &day()).unwrap();
        assert_eq!(rects.len(), 1);
        assert_close(rects["a"].width, 100.0);
    }

    #[test]
    fn three_mutually_overlapping_events() {
        let events = [
            event("a", (9, 0), (11, 0)),
            event("b", (9, 30), (10, 30)),
            event("c", (10, 0), (11, 30)),
        ];
        let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
        assert_eq!(result.total_columns, 3);

        let columns: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| result.placement(id).unwrap().column)
            .collect();
        assert_eq!(columns, vec![0, 1, 2]);

        let total_width: f64 = result.placements.iter().map(|p| p.rectangle.width).sum();
        assert_close(total_width, 100.0);
        assert_close(result.rectangle("c").unwrap().left, 200.0 / 3.0);
    }

    #[test]
    fn equal_starts_place_longer_event_first() {
        let events = [event("short", (9, 0), (10, 0)), event("long", (9, 0), (11, 0))];
        let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
        assert_eq!(result.placement("long").unwrap().column, 0);
        assert_eq!(result.placement("short").unwrap().column, 1);
    }

    #[test]
    fn identical_ranges_keep_input_order() {
        let events = [event("p", (9, 0), (10, 0)), event("q", (9, 0), (10, 0))];
        let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
        assert_eq!(result.placements[0].id, "p");
        assert_eq!(result.placement("p").unwrap().column, 0);
        assert_eq!(result.placement("q").unwrap().column, 1);
    }

    #[test]
    fn freed_column_is_reused() {
        let events = [
            event("a", (9, 0), (12, 0)),
            event("b", (9, 0), (10, 0)),
            event("c", (10, 30), (11, 0)),
        ];
        let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
        assert_eq!(result.placement("c").unwrap().column, 1);
        assert_eq!(result.total_columns, 2);
    }

    #[test]
    fn event_from_previous_day_is_clamped_to_midnight() {
        let start = at(22, 0) - Duration::days(1);
        let events = [TimedEvent::new("late", start, at(2, 0))];
        let rects = layout(&events, &day()).unwrap();
        assert_close(rects["late"].top, 0.0);
        assert_close(rects["late"].height, 120.0 / 1440.0 * 100.0);
    }

    #[test]
    fn event_running_past_midnight_ends_at_bottom() {
        let end = at(3, 0) + Duration::days(1);
        let events = [TimedEvent::new("night", at(22, 0), end)];
        let rect = layout(&events, &day()).unwrap()["night"];
        assert_close(rect.top + rect.height, 100.0);
    }

    #[test]
    fn zero_length_event_gets_minimum_height() {
        let rects = layout(&[event("ping", (12, 0), (12, 0))], &day()).unwrap();
        assert_close(rects["ping"].height, MIN_HEIGHT_PERCENT);
    }

    #[test]
    fn event_outside_the_day_still_gets_a_rectangle() {
        let start = at(2, 0) + Duration::days(1);
        let events = [TimedEvent::new("tomorrow", start, start + Duration::hours(1))];
        let rect = layout(&events, &day()).unwrap()["tomorrow"];
        assert_close(rect.top, 100.0);
        assert_close(rect.height, MIN_HEIGHT_PERCENT);
    }

    #[test]
    fn reversed_event_rejects_the_whole_call() {
        let events = [event("ok", (9, 0), (10, 0)), event("bad", (11, 0), (10, 0))];
        let err = layout(&events, &day()).unwrap_err();
        assert!(matches!(err, TeamCalError::InvalidEventRange { ref id, .. } if id == "bad"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let events = [event("a", (9, 0), (10, 0)), event("a", (11, 0), (12, 0))];
        let err = layout(&events, &day()).unwrap_err();
        assert!(matches!(err, TeamCalError::DuplicateEventId(ref id) if id == "a"));
    }

    #[test]
    fn global_width_narrows_unrelated_events() {
        let events = [
            event("a", (9, 0), (10, 0)),
            event("b", (9, 30), (10, 30)),
            event("lunch", (12, 0), (13, 0)),
        ];
        let rects = layout(&events, &day()).unwrap();
        assert_close(rects["lunch"].width, 50.0);
    }

    #[test]
    fn per_cluster_width_keeps_unrelated_events_wide() {
        let events = [
            event("a", (9, 0), (10, 0)),
            event("b", (9, 30), (10, 30)),
            event("lunch", (12, 0), (13, 0)),
        ];
        let options = LayoutOptions {
            column_width: ColumnWidth::PerCluster,
            ..LayoutOptions::default()
        };
        let result = layout_with(&events, &day(), &options).unwrap();
        assert_eq!(result.total_columns, 2);
        assert_close(result.rectangle("a").unwrap().width, 50.0);
        assert_close(result.rectangle("b").unwrap().left, 50.0);
        assert_close(result.rectangle("lunch").unwrap().width, 100.0);
        assert_ne!(
            result.placement("a").unwrap().cluster,
            result.placement("lunch").unwrap().cluster
        );
    }

    #[test]
    fn max_overlap_counts_self_and_neighbours() {
        let events = [
            event("a", (9, 0), (11, 0)),
            event("b", (9, 30), (10, 0)),
            event("c", (10, 30), (12, 0)),
            event("d", (13, 0), (14, 0)),
        ];
        let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
        assert_eq!(result.placement("a").unwrap().max_overlap, 3);
        assert_eq!(result.placement("b").unwrap().max_overlap, 2);
        assert_eq!(result.placement("d").unwrap().max_overlap, 1);
    }

    #[test]
    fn custom_options_change_floor_and_stack_base() {
        let options = LayoutOptions {
            min_height_percent: 5.0,
            stack_base: 100,
            ..LayoutOptions::default()
        };
        let result = layout_with(&[event("a", (9, 0), (9, 5))], &day(), &options).unwrap();
        let rect = result.rectangle("a").unwrap();
        assert_close(rect.height, 5.0);
        assert_eq!(rect.stack_order, 100);
    }

    fn arb_events() -> impl Strategy<Value = Vec<TimedEvent>> {
        prop::collection::vec((0i64..1440, 0i64..300, prop::bool::weighted(0.1)), 0..30).prop_map(
            |parts| {
                let midnight = at(0, 0);
                parts
                    .into_iter()
                    .enumerate()
                    .map(|(i, (offset, length, all_day))| {
                        let start = midnight + Duration::minutes(offset);
                        TimedEvent {
                            id: format!("e{i}"),
                            start,
                            end: start + Duration::minutes(length),
                            all_day,
                        }
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn layout_is_idempotent(events in arb_events()) {
            let first = layout(&events, &day()).unwrap();
            let second = layout(&events, &day()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn every_timed_event_gets_exactly_one_rectangle(events in arb_events()) {
            let rects = layout(&events, &day()).unwrap();
            let timed = events.iter().filter(|e| !e.all_day).count();
            prop_assert_eq!(rects.len(), timed);
            for e in &events {
                prop_assert_eq!(rects.contains_key(&e.id), !e.all_day);
            }
        }

        #[test]
        fn shared_columns_never_overlap(events in arb_events()) {
            let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
            for (i, a) in result.placements.iter().enumerate() {
                for b in &result.placements[i + 1..] {
                    if a.column == b.column {
                        prop_assert!(
                            !(a.start_minute < b.end_minute && a.end_minute > b.start_minute),
                            "{} and {} share column {}", a.id, b.id, a.column
                        );
                    }
                }
            }
        }

        #[test]
        fn rectangles_are_visible_and_in_bounds(events in arb_events()) {
            let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
            for p in &result.placements {
                let r = p.rectangle;
                prop_assert!(r.height >= MIN_HEIGHT_PERCENT);
                prop_assert!(r.top >= 0.0 && r.top <= 100.0);
                prop_assert!(r.left >= 0.0);
                prop_assert!(r.left + r.width <= 100.0 + EPSILON);
                prop_assert_eq!(r.stack_order, p.column as i32 + STACK_BASE);
            }
        }

        #[test]
        fn total_columns_follows_highest_column(events in arb_events()) {
            let result = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
            let expected = result.placements.iter().map(|p| p.column + 1).max().unwrap_or(1);
            prop_assert_eq!(result.total_columns, expected);
            for p in &result.placements {
                prop_assert!(p.column < p.max_overlap);
                prop_assert!((p.rectangle.width - 100.0 / expected as f64).abs() < EPSILON);
            }
        }

        #[test]
        fn per_cluster_keeps_columns_and_never_narrows(events in arb_events()) {
            let global = layout_with(&events, &day(), &LayoutOptions::default()).unwrap();
            let options = LayoutOptions { column_width: ColumnWidth::PerCluster, ..LayoutOptions::default() };
            let clustered = layout_with(&events, &day(), &options).unwrap();
            for (g, c) in global.placements.iter().zip(&clustered.placements) {
                prop_assert_eq!(&g.id, &c.id);
                prop_assert_eq!(g.column, c.column);
                prop_assert!(c.rectangle.width >= g.rectangle.width - EPSILON);
            }
        }
    }
}
