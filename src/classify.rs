use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::{Event, Sections};

/// Calendar date of `instant` on the facility's wall clock.
pub fn facility_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn same_facility_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    facility_date(a, tz) == facility_date(b, tz)
}

/// Splits today's events into On Ice, Up Next and Upcoming.
///
/// Only events starting on `now`'s facility-local date are considered.
/// Events already over are dropped; On Ice is ordered by end time so the
/// sheet that frees up first is listed first.
pub fn classify(events: &[Event], now: DateTime<Utc>, tz: Tz) -> Sections {
    let mut on_ice = Vec::new();
    let mut future = Vec::new();

    for event in events
        .iter()
        .filter(|event| same_facility_day(event.start, now, tz))
    {
        if event.is_current(now) {
            on_ice.push(event.clone());
        } else if event.start > now {
            future.push(event.clone());
        }
    }

    on_ice.sort_by_key(|event| event.end);
    future.sort_by_key(|event| event.start);

    let mut upcoming = future.into_iter();
    let up_next = upcoming.next();

    Sections {
        on_ice,
        up_next,
        upcoming: upcoming.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LockerText, SectionKind};
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0)
            .single()
            .expect("valid test instant")
    }

    fn event(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id: title.to_string(),
            start,
            end,
            title_raw: title.to_string(),
            team: title.to_string(),
            description: String::new(),
            locker: LockerText::Unassigned,
            raw_locker: title.to_string(),
            rink: 'C',
            source_title: title.to_string(),
            custom_title: String::new(),
        }
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().map(|event| event.title_raw.as_str()).collect()
    }

    #[test]
    fn two_future_events_without_ice_time() {
        let events = vec![
            event("Seven", at(19, 0), at(20, 0)),
            event("Six", at(18, 0), at(19, 0)),
        ];
        let sections = classify(&events, at(15, 0), UTC);
        assert!(sections.on_ice.is_empty());
        assert_eq!(titles(sections.up_next_list()), vec!["Six"]);
        assert_eq!(titles(&sections.upcoming), vec!["Seven"]);
        assert_eq!(sections.layout(), crate::models::Layout::TwoSection);
    }

    #[test]
    fn on_ice_sorted_by_end() {
        let events = vec![
            event("Long", at(15, 0), at(18, 0)),
            event("Short", at(16, 0), at(17, 0)),
            event("Later", at(19, 0), at(20, 0)),
        ];
        let sections = classify(&events, at(16, 30), UTC);
        assert_eq!(titles(&sections.on_ice), vec!["Short", "Long"]);
        assert_eq!(titles(sections.up_next_list()), vec!["Later"]);
        assert!(sections.upcoming.is_empty());
        assert_eq!(sections.layout(), crate::models::Layout::ThreeSection);
    }

    #[test]
    fn boundaries_and_finished_events() {
        let events = vec![
            event("Done", at(8, 0), at(9, 0)),
            event("Ends now", at(9, 0), at(10, 0)),
            event("Starts now", at(10, 0), at(11, 0)),
        ];
        let sections = classify(&events, at(10, 0), UTC);
        assert_eq!(titles(&sections.on_ice), vec!["Starts now"]);
        assert!(sections.up_next.is_none());
        assert!(sections.upcoming.is_empty());
        assert_eq!(sections.section_of("Done"), None);
        assert_eq!(sections.section_of("Ends now"), None);
        assert_eq!(sections.section_of("Starts now"), Some(SectionKind::OnIce));
    }

    #[test]
    fn other_days_are_ignored() {
        let tomorrow = at(18, 0) + chrono::Duration::days(1);
        let events = vec![
            event("Tomorrow", tomorrow, tomorrow + chrono::Duration::hours(1)),
            event("Tonight", at(21, 0), at(22, 0)),
        ];
        let sections = classify(&events, at(12, 0), UTC);
        assert_eq!(titles(sections.up_next_list()), vec!["Tonight"]);
        assert!(sections.upcoming.is_empty());
    }

    #[test]
    fn day_is_taken_in_the_facility_zone() {
        // 01:30 UTC on June 2nd is still June 1st in New York.
        let tz = chrono_tz::America::New_York;
        let now = at(23, 0);
        let late = Utc
            .with_ymd_and_hms(2025, 6, 2, 1, 30, 0)
            .single()
            .expect("valid instant");
        let events = vec![event("Late Skate", late, late + chrono::Duration::hours(1))];

        assert_eq!(classify(&events, now, tz).len(), 1);
        assert!(classify(&events, now, UTC).is_empty());
    }

    #[test]
    fn every_event_lands_in_at_most_one_bucket() {
        let events = (0..12)
            .map(|hour| event(&format!("E{hour}"), at(hour * 2, 0), at(hour * 2 + 1, 30)))
            .collect::<Vec<_>>();
        for now_hour in 0..24 {
            let now = at(now_hour, 15);
            let sections = classify(&events, now, UTC);
            assert!(sections.up_next_list().len() <= 1);
            for ev in &events {
                let hits = sections.on_ice.iter().filter(|e| e.id == ev.id).count()
                    + sections.up_next_list().iter().filter(|e| e.id == ev.id).count()
                    + sections.upcoming.iter().filter(|e| e.id == ev.id).count();
                let expected = usize::from(ev.end > now);
                assert_eq!(hits, expected, "{} at {now}", ev.id);
            }
        }
    }
}
