//! Records shared by command tests.

use chrono::{NaiveDate, NaiveTime};
use tl_core::{Hours, NewRecord, Record, RecordId, TimeRange};
use tl_store::{MemoryBackend, RecordStore};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn record(id: &str, date: NaiveDate, hours: Hours, project: &str, description: &str) -> Record {
    Record::create(
        NewRecord {
            date,
            hours,
            description: description.to_string(),
            project: project.to_string(),
        },
        RecordId::new(id).unwrap(),
        date.and_hms_opt(18, 0, 0).unwrap(),
    )
    .unwrap()
}

/// Three entries across two ISO weeks, inserted out of date order:
///
/// - 2024-01-10 (Wed), 2.0h, no project
/// - 2024-01-15 (Mon), 7.5h from two ranges, Backend
/// - 2024-01-12 (Fri), 10.0h, Client Meeting
pub fn sample_store() -> RecordStore<MemoryBackend> {
    let mut store = RecordStore::open(MemoryBackend::new()).unwrap();
    store
        .add(record(
            "bbb222-y",
            date(1, 10),
            Hours::Manual(2.0),
            "",
            "Inbox triage\nFollow-ups",
        ))
        .unwrap();
    store
        .add(record(
            "aaa111-x",
            date(1, 15),
            Hours::Ranges(vec![
                TimeRange::new(time(9, 0), time(12, 0)).unwrap(),
                TimeRange::new(time(13, 0), time(17, 30)).unwrap(),
            ]),
            "Backend",
            "Sprint work",
        ))
        .unwrap();
    store
        .add(record(
            "ccc333-z",
            date(1, 12),
            Hours::Manual(10.0),
            "Client Meeting",
            "Quarterly review",
        ))
        .unwrap();
    store
}
