//! Delete command for removing a single entry.

use std::io::Write;

use anyhow::{Context, Result};
use tl_store::{Persistence, RecordStore};

use super::util::format_hours;

/// Removes the entry whose ID is `id`, or starts with `id`.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut RecordStore<P>,
    id: &str,
) -> Result<()> {
    let target = store.resolve(id)?.id().clone();
    let removed = store.delete(&target).context("failed to save after delete")?;

    writeln!(
        writer,
        "Deleted {} {} ({}) [{}]",
        removed.date(),
        removed.project_label(),
        format_hours(removed.hours()),
        removed.id().short()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tl_core::{Hours, NewRecord, Record, RecordId};
    use tl_store::MemoryBackend;

    use super::*;

    fn record(id: &str, project: &str) -> Record {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Record::create(
            NewRecord {
                date,
                hours: Hours::Manual(3.0),
                description: "Work".to_string(),
                project: project.to_string(),
            },
            RecordId::new(id).unwrap(),
            date.and_hms_opt(12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn store() -> RecordStore<MemoryBackend> {
        let mut store = RecordStore::open(MemoryBackend::new()).unwrap();
        store.add(record("abc123-one", "Backend")).unwrap();
        store.add(record("abd456-two", "")).unwrap();
        store
    }

    #[test]
    fn deletes_by_unique_prefix() {
        let mut store = store();
        let mut output = Vec::new();

        run(&mut output, &mut store, "abc").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id().as_str(), "abd456-two");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Deleted 2024-01-10 Backend (3.0h) [abc123]\n"
        );
    }

    #[test]
    fn deletes_by_full_id() {
        let mut store = store();
        let mut output = Vec::new();

        run(&mut output, &mut store, "abd456-two").unwrap();

        assert_eq!(store.len(), 1);
        assert!(String::from_utf8(output).unwrap().contains("No Project"));
    }

    #[test]
    fn ambiguous_prefix_deletes_nothing() {
        let mut store = store();
        let writes = store.backend().write_count();

        let err = run(&mut Vec::new(), &mut store, "ab").unwrap_err();

        assert!(err.to_string().contains("ambiguous"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut store = store();
        let err = run(&mut Vec::new(), &mut store, "zzz").unwrap_err();
        assert_eq!(err.to_string(), "record not found: zzz");
        assert_eq!(store.len(), 2);
    }
}
