//! Horizontal layout of overlapping events.
//!
//! Events are grouped greedily: in start order, each event joins the first
//! group containing an event it overlaps, or opens a new group. Every event
//! of a group gets its own column. This is not a minimal packing: two events
//! that only share a common neighbour still get separate columns.

use crate::event::Event;

/// Share of the width available to columns, in percent.
const USABLE_WIDTH: u32 = 96;
/// Left margin before the first column, in percent.
const LEFT_MARGIN: u32 = 2;
/// Gap subtracted from every column, in percent.
const GUTTER: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLayout {
    pub id: i64,
    pub left: u32,
    pub width: u32,
    pub column: usize,
    pub total_columns: usize,
}

/// Assign columns to the timed events of a single day.
pub fn layout_overlapping_events<'a, I>(events: I) -> Vec<EventLayout>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut sorted: Vec<&Event> = events.into_iter().collect();
    sorted.sort_by_key(|e| e.start_time);

    let mut groups: Vec<Vec<&Event>> = Vec::new();
    for event in sorted {
        match groups
            .iter_mut()
            .find(|group| group.iter().any(|member| member.overlaps(event)))
        {
            Some(group) => group.push(event),
            None => groups.push(vec![event]),
        }
    }

    let mut layouts = Vec::new();
    for group in groups {
        let total_columns = group.len();
        let column_width = USABLE_WIDTH / total_columns as u32;

        for (column, event) in group.into_iter().enumerate() {
            layouts.push(EventLayout {
                id: event.id,
                left: LEFT_MARGIN + column as u32 * column_width,
                width: column_width.saturating_sub(GUTTER),
                column,
                total_columns,
            });
        }
    }

    layouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashSet;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, h, m, 0).unwrap()
    }

    fn event(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id,
            title: format!("Event {}", id),
            description: String::new(),
            short_description: String::new(),
            start_time: start,
            end_time: end,
            link: String::new(),
            banner: String::new(),
            airports: vec![],
            routes: vec![],
            organisers: vec![],
        }
    }

    fn find(layouts: &[EventLayout], id: i64) -> EventLayout {
        *layouts.iter().find(|l| l.id == id).unwrap()
    }

    #[test]
    fn empty_input() {
        assert!(layout_overlapping_events(&Vec::<Event>::new()).is_empty());
    }

    #[test]
    fn single_event_takes_full_width() {
        let events = [event(1, at(10, 0), at(12, 0))];
        let layouts = layout_overlapping_events(&events);

        assert_eq!(
            layouts,
            vec![EventLayout {
                id: 1,
                left: 2,
                width: 95,
                column: 0,
                total_columns: 1,
            }]
        );
    }

    #[test]
    fn overlapping_pair_splits_width() {
        let events = [event(2, at(11, 0), at(13, 0)), event(1, at(10, 0), at(12, 0))];
        let layouts = layout_overlapping_events(&events);

        let first = find(&layouts, 1);
        let second = find(&layouts, 2);
        assert_eq!((first.column, first.left, first.width), (0, 2, 47));
        assert_eq!((second.column, second.left, second.width), (1, 50, 47));
        assert_eq!(first.total_columns, 2);
    }

    #[test]
    fn back_to_back_events_do_not_share_a_group() {
        let events = [event(1, at(10, 0), at(11, 0)), event(2, at(11, 0), at(12, 0))];
        let layouts = layout_overlapping_events(&events);

        assert!(layouts.iter().all(|l| l.total_columns == 1 && l.column == 0));
    }

    #[test]
    fn chained_overlaps_get_one_column_each() {
        // 1 and 3 never overlap but both overlap 2
        let events = [
            event(1, at(10, 0), at(12, 0)),
            event(2, at(11, 0), at(13, 0)),
            event(3, at(12, 30), at(14, 0)),
        ];
        let layouts = layout_overlapping_events(&events);

        assert!(layouts.iter().all(|l| l.total_columns == 3));
        assert_eq!(find(&layouts, 3).column, 2);
        assert_eq!(find(&layouts, 3).left, 2 + 2 * 32);
        assert_eq!(find(&layouts, 3).width, 31);
    }

    #[test]
    fn columns_are_unique_within_each_group() {
        let events = [
            event(1, at(8, 0), at(9, 0)),
            event(2, at(8, 30), at(10, 0)),
            event(3, at(8, 45), at(9, 15)),
            event(4, at(13, 0), at(14, 0)),
            event(5, at(13, 30), at(15, 0)),
            event(6, at(18, 0), at(19, 0)),
        ];
        let layouts = layout_overlapping_events(&events);
        assert_eq!(layouts.len(), events.len());

        for total in [3, 2, 1] {
            let group: Vec<_> = layouts.iter().filter(|l| l.total_columns == total).collect();
            assert_eq!(group.len(), total);
            let columns: HashSet<usize> = group.iter().map(|l| l.column).collect();
            assert_eq!(columns.len(), total);
        }
    }

    #[test]
    fn input_order_does_not_matter() {
        let forward = [
            event(1, at(10, 0), at(11, 0)),
            event(2, at(10, 30), at(11, 30)),
            event(3, at(16, 0), at(17, 0)),
        ];
        let reversed = [forward[2].clone(), forward[1].clone(), forward[0].clone()];

        let mut a = layout_overlapping_events(&forward);
        let mut b = layout_overlapping_events(&reversed);
        a.sort_by_key(|l| l.id);
        b.sort_by_key(|l| l.id);
        assert_eq!(a, b);
        assert_eq!(find(&a, 2).column, 1);
    }
}
