use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

/// A community event as listed in the site's `events.json`. Every field is
/// optional in the source data; missing ones deserialize to empty values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunityEvent {
    pub title: String,
    /// Raw date string; kept verbatim so one bad entry cannot poison the
    /// whole file.
    pub date: String,
    pub location: String,
    pub organizer: String,
    pub description: String,
    pub registration_open: bool,
    pub registration_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Today,
    Ended,
}

impl CommunityEvent {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// `None` when the date is unreadable; such events are listed nowhere.
    pub fn status(&self, today: NaiveDate) -> Option<EventStatus> {
        let date = self.parsed_date()?;
        Some(if date < today {
            EventStatus::Ended
        } else if date == today {
            EventStatus::Today
        } else {
            EventStatus::Upcoming
        })
    }

    /// Registration is offered only for open, linked, not-yet-past events.
    pub fn registration_available(&self, today: NaiveDate) -> bool {
        self.registration_open
            && !self.registration_link.trim().is_empty()
            && self.parsed_date().map(|date| date >= today).unwrap_or(false)
    }
}

/// Events ordered the way the site lists them: upcoming soonest first, then
/// past events newest first.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Schedule {
    pub upcoming: Vec<CommunityEvent>,
    pub past: Vec<CommunityEvent>,
}

impl Schedule {
    pub fn build(events: Vec<CommunityEvent>, today: NaiveDate) -> Self {
        let mut upcoming = Vec::new();
        let mut past = Vec::new();
        for event in events {
            match event.parsed_date() {
                Some(date) if date >= today => upcoming.push((date, event)),
                Some(date) => past.push((date, event)),
                None => {}
            }
        }
        upcoming.sort_by_key(|(date, _)| *date);
        past.sort_by_key(|(date, _)| Reverse(*date));

        Self {
            upcoming: upcoming.into_iter().map(|(_, event)| event).collect(),
            past: past.into_iter().map(|(_, event)| event).collect(),
        }
    }

    /// Countdown target on the events page.
    pub fn next_upcoming(&self) -> Option<&CommunityEvent> {
        self.upcoming.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommunityEvent> {
        self.upcoming.iter().chain(self.past.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, date: &str) -> CommunityEvent {
        CommunityEvent {
            title: title.to_string(),
            date: date.to_string(),
            ..CommunityEvent::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
    }

    #[test]
    fn upcoming_ascending_then_past_descending() {
        let schedule = Schedule::build(
            vec![
                event("old", "2025-11-01"),
                event("soon", "2025-12-12"),
                event("later", "2026-01-05"),
                event("older", "2025-10-01"),
            ],
            today(),
        );

        let upcoming: Vec<&str> = schedule.upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(upcoming, ["soon", "later"]);
        let past: Vec<&str> = schedule.past.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(past, ["old", "older"]);

        let listed: Vec<&str> = schedule.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(listed, ["soon", "later", "old", "older"]);
    }

    #[test]
    fn todays_event_counts_as_upcoming() {
        let schedule = Schedule::build(vec![event("now", "2025-12-10")], today());
        assert_eq!(schedule.upcoming.len(), 1);
        assert_eq!(
            schedule.upcoming[0].status(today()),
            Some(EventStatus::Today)
        );
    }

    #[test]
    fn unreadable_dates_are_listed_nowhere() {
        let schedule = Schedule::build(
            vec![event("bad", "sometime soon"), event("ok", "2025-12-20")],
            today(),
        );
        assert_eq!(schedule.upcoming.len(), 1);
        assert!(schedule.past.is_empty());
    }

    #[test]
    fn next_upcoming_is_the_soonest() {
        let schedule = Schedule::build(
            vec![event("later", "2026-02-01"), event("soon", "2025-12-11")],
            today(),
        );
        assert_eq!(schedule.next_upcoming().unwrap().title, "soon");
    }

    #[test]
    fn registration_requires_open_flag_link_and_future_date() {
        let mut e = event("soon", "2025-12-12");
        assert!(!e.registration_available(today()));
        e.registration_open = true;
        e.registration_link = "https://example.com/register".to_string();
        assert!(e.registration_available(today()));

        let mut past = event("old", "2025-11-01");
        past.registration_open = true;
        past.registration_link = "https://example.com/register".to_string();
        assert!(!past.registration_available(today()));
    }

    #[test]
    fn status_classes_match_the_site() {
        assert_eq!(EventStatus::Upcoming.to_string(), "upcoming");
        assert_eq!(EventStatus::Ended.to_string(), "ended");
    }

    #[test]
    fn partial_json_entries_fill_in_defaults() {
        let events: Vec<CommunityEvent> = serde_json::from_str(
            r#"[{"title": "Minimal", "date": "2025-12-20", "registrationOpen": true}]"#,
        )
        .unwrap();
        assert_eq!(events[0].title, "Minimal");
        assert!(events[0].registration_open);
        assert!(events[0].location.is_empty());
    }
}
