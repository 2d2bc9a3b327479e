//! Integration tests for the streak state machine.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use habit_core::{FixedClock, Habit, HabitError, HabitStore, StreakEvent, Tracker};
use tempfile::TempDir;

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn tracker_at(store: &Arc<HabitStore>, now: &str) -> Tracker<Vec<u8>> {
    Tracker::builder()
        .store(Arc::clone(store))
        .output(Vec::new())
        .clock(FixedClock(ts(now)))
        .build()
        .unwrap()
}

fn output_of(tracker: Tracker<Vec<u8>>) -> String {
    String::from_utf8(tracker.into_output()).unwrap()
}

fn file_store(dir: &TempDir) -> Arc<HabitStore> {
    Arc::new(HabitStore::open(dir.path().join("test.store")).unwrap())
}

#[test]
fn test_record_starts_new_habit() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    let mut tracker = tracker_at(&store, "2024-02-06T13:00:00Z");

    let event = tracker.record("programming").unwrap();

    assert_eq!(
        event,
        StreakEvent::Started {
            name: "programming".into()
        }
    );
    assert_eq!(
        store.get("programming"),
        Some(Habit {
            name: "programming".into(),
            current_streak: 1,
            last_done: ts("2024-02-06T13:00:00Z"),
        })
    );
    assert_eq!(
        output_of(tracker),
        "Congratulations on starting your new habit 'programming'! Don't forget to do it again.\n"
    );
}

#[test]
fn test_record_persists_new_habit() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    let mut tracker = tracker_at(&store, "2024-02-06T13:00:00Z");
    tracker.record("programming").unwrap();

    let reopened = HabitStore::open(temp_dir.path().join("test.store")).unwrap();
    assert_eq!(reopened.all(), store.all());
}

#[test]
fn test_record_keeps_streak_on_same_calendar_day() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    store.add(Habit {
        name: "programming".into(),
        current_streak: 7,
        last_done: ts("2024-02-06T13:00:00Z"),
    });
    let mut tracker = tracker_at(&store, "2024-02-06T13:05:00Z");

    tracker.record("programming").unwrap();

    assert_eq!(
        store.get("programming"),
        Some(Habit {
            name: "programming".into(),
            current_streak: 7,
            last_done: ts("2024-02-06T13:05:00Z"),
        })
    );
    assert_eq!(
        output_of(tracker),
        "Way to go practicing your habit 'programming' more than once today!\n"
    );
}

#[test]
fn test_record_extends_streak_on_next_day_within_24_hours() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    store.add(Habit {
        name: "programming".into(),
        current_streak: 1,
        last_done: ts("2024-02-05T13:00:00Z"),
    });
    let mut tracker = tracker_at(&store, "2024-02-06T12:59:00Z");

    let event = tracker.record("programming").unwrap();

    assert_eq!(
        event,
        StreakEvent::StreakExtended {
            name: "programming".into(),
            streak: 2
        }
    );
    assert_eq!(
        store.get("programming"),
        Some(Habit {
            name: "programming".into(),
            current_streak: 2,
            last_done: ts("2024-02-06T12:59:00Z"),
        })
    );
    assert_eq!(
        output_of(tracker),
        "Nice work: you've done the habit 'programming' for 2 days in a row now.\n"
    );
}

#[test]
fn test_record_resets_streak_for_habits_one_or_more_days_old() {
    struct Case {
        name: &'static str,
        last_done: &'static str,
        want_output: &'static str,
    }

    let cases = [
        Case {
            name: "programming",
            last_done: "2024-02-04T13:00:00Z",
            want_output: "You last did the habit 'programming' 2 days ago, so you're starting a new streak today. Good luck!\n",
        },
        Case {
            name: "exercising",
            last_done: "2024-02-05T13:05:00Z",
            want_output: "You last did the habit 'exercising' 1 day ago, so you're starting a new streak today. Good luck!\n",
        },
    ];

    for case in cases {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);
        store.add(Habit {
            name: case.name.into(),
            current_streak: 5,
            last_done: ts(case.last_done),
        });
        let mut tracker = tracker_at(&store, "2024-02-06T13:05:00Z");

        tracker.record(case.name).unwrap();

        assert_eq!(
            store.get(case.name),
            Some(Habit {
                name: case.name.into(),
                current_streak: 1,
                last_done: ts("2024-02-06T13:05:00Z"),
            }),
            "case {}",
            case.name
        );
        assert_eq!(output_of(tracker), case.want_output, "case {}", case.name);
    }
}

#[test]
fn test_record_rejects_occurrence_before_last_done() {
    let store = Arc::new(HabitStore::in_memory());
    let stored = Habit {
        name: "programming".into(),
        current_streak: 3,
        last_done: ts("2024-02-06T13:00:00Z"),
    };
    store.add(stored.clone());
    let mut tracker = tracker_at(&store, "2024-02-05T13:00:00Z");

    let err = tracker.record("programming").unwrap_err();

    match &err {
        HabitError::OutOfOrder { name, now, last } => {
            assert_eq!(name, "programming");
            assert_eq!(*now, ts("2024-02-05T13:00:00Z"));
            assert_eq!(*last, ts("2024-02-06T13:00:00Z"));
        }
        other => panic!("expected out-of-order error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "current time 2024-02-05T13:00:00Z cannot precede last time habit 'programming' was updated on 2024-02-06T13:00:00Z"
    );
    assert_eq!(store.get("programming"), Some(stored));
    assert!(output_of(tracker).is_empty());
}

#[test]
fn test_record_surfaces_save_failure_and_rolls_back() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(HabitStore::open(temp_dir.path().join("missing").join("test.store")).unwrap());
    let mut tracker = tracker_at(&store, "2024-02-06T13:00:00Z");

    let err = tracker.record("programming").unwrap_err();

    assert!(matches!(err, HabitError::Persistence(_)));
    assert!(store.get("programming").is_none());
    assert!(output_of(tracker).is_empty());
}

#[test]
fn test_summary_reports_inactive_habits() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    store.add(Habit {
        name: "programming".into(),
        current_streak: 1,
        last_done: ts("2024-02-05T12:30:00Z"),
    });
    store.add(Habit {
        name: "exercising".into(),
        current_streak: 4,
        last_done: ts("2024-02-03T13:00:00Z"),
    });
    let mut tracker = tracker_at(&store, "2024-02-06T13:00:00Z");

    let events = tracker.summarize().unwrap();

    assert_eq!(events.len(), 2);
    let output = output_of(tracker);
    for want in [
        "It's been 1 day since you did 'programming'. Stay positive and get back on it!\n",
        "It's been 3 days since you did 'exercising'. Stay positive and get back on it!\n",
    ] {
        assert!(output.contains(want), "wanted {want:?} in {output:?}");
    }
}

#[test]
fn test_summary_is_sorted_by_name() {
    let store = Arc::new(HabitStore::in_memory());
    store.add(Habit::started("writing", ts("2024-02-06T09:00:00Z")));
    store.add(Habit::started("cooking", ts("2024-02-01T09:00:00Z")));
    let mut tracker = tracker_at(&store, "2024-02-06T13:00:00Z");

    let events = tracker.summarize().unwrap();

    assert_eq!(
        events,
        vec![
            StreakEvent::Inactive {
                name: "cooking".into(),
                days: 5
            },
            StreakEvent::OnStreak {
                name: "writing".into(),
                streak: 1
            },
        ]
    );
}

#[test]
fn test_summary_of_empty_store() {
    let store = Arc::new(HabitStore::in_memory());
    let mut tracker = tracker_at(&store, "2024-02-06T13:00:00Z");

    let events = tracker.summarize().unwrap();

    assert_eq!(events, vec![StreakEvent::NothingTracked]);
    assert_eq!(
        output_of(tracker),
        "You're not currently tracking any habits.\n"
    );
}

#[test]
fn test_week_of_daily_records_builds_streak() {
    let store = Arc::new(HabitStore::in_memory());
    // Each record lands on the next calendar day but less than 24 hours
    // after the previous one.
    for day in 1..=7 {
        let now = format!("2024-02-0{day}T{:02}:00:00Z", 20 - day);
        let mut tracker = tracker_at(&store, &now);
        tracker.record("meditation").unwrap();
    }
    // Later the same day.
    let mut tracker = tracker_at(&store, "2024-02-07T22:00:00Z");
    tracker.record("meditation").unwrap();

    assert_eq!(store.get("meditation").unwrap().current_streak, 7);

    // Exactly a day later counts as a full day missed.
    let mut tracker = tracker_at(&store, "2024-02-08T22:00:00Z");
    let event = tracker.record("meditation").unwrap();
    assert_eq!(
        event,
        StreakEvent::StreakReset {
            name: "meditation".into(),
            days_since: 1
        }
    );
}
