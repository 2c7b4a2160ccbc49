//! On-disk shape of a record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tl_core::record::{date_format, timestamp_format};
use tl_core::time_range::total_hours;
use tl_core::{Hours, NewRecord, Record, RecordId, TimeRange, ValidationError};

/// A record as it appears in the backing file.
///
/// `id` is optional so files written before records carried an ID still load;
/// such entries receive a fresh ID on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    #[serde(default)]
    pub project: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ranges: Option<Vec<TimeRange>>,
}

impl RecordEntity {
    /// Validates the stored values and rebuilds the record.
    ///
    /// Returns the record and whether its ID had to be generated.
    pub fn into_record(self) -> Result<(Record, bool), ValidationError> {
        let (id, generated) = match self.id {
            Some(id) => (RecordId::new(id)?, false),
            None => (RecordId::generate(), true),
        };

        let hours = match self.time_ranges {
            Some(ranges) if !ranges.is_empty() => {
                let computed = total_hours(&ranges);
                if (computed - self.hours).abs() > 1e-6 {
                    tracing::warn!(
                        stored = self.hours,
                        computed,
                        date = %self.date,
                        "stored hours disagree with time ranges; using range total"
                    );
                }
                Hours::Ranges(ranges)
            }
            _ => Hours::Manual(self.hours),
        };

        let record = Record::create(
            NewRecord {
                date: self.date,
                hours,
                description: self.description,
                project: self.project,
            },
            id,
            self.timestamp,
        )?;
        Ok((record, generated))
    }
}

impl From<&Record> for RecordEntity {
    fn from(record: &Record) -> Self {
        Self {
            id: Some(record.id().to_string()),
            date: record.date(),
            hours: record.hours(),
            description: record.description().to_string(),
            project: record.project().to_string(),
            timestamp: record.created_at(),
            time_ranges: record.time_ranges().map(<[TimeRange]>::to_vec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_written_without_ids() {
        let json = r#"{
            "date": "2024-03-04",
            "hours": 7.5,
            "description": "Quarterly planning",
            "project": "Client Meeting",
            "timestamp": "2024-03-04 17:02:11",
            "time_ranges": [
                {"start": "09:00 AM", "end": "12:00 PM", "hours": 3.0},
                {"start": "01:00 PM", "end": "05:30 PM", "hours": 4.5}
            ]
        }"#;
        let entity: RecordEntity = serde_json::from_str(json).unwrap();
        let (record, generated) = entity.into_record().unwrap();

        assert!(generated);
        assert!((record.hours() - 7.5).abs() < f64::EPSILON);
        assert_eq!(record.time_ranges().unwrap().len(), 2);
        assert_eq!(
            record.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-04 17:02:11"
        );
    }

    #[test]
    fn keeps_existing_id() {
        let json = r#"{
            "id": "rec-1",
            "date": "2024-03-04",
            "hours": 2.0,
            "description": "Review",
            "project": "",
            "timestamp": "2024-03-04 10:00:00"
        }"#;
        let entity: RecordEntity = serde_json::from_str(json).unwrap();
        let (record, generated) = entity.into_record().unwrap();

        assert!(!generated);
        assert_eq!(record.id().as_str(), "rec-1");
        assert!(record.time_ranges().is_none());
    }

    #[test]
    fn range_total_wins_over_stored_hours() {
        let json = r#"{
            "id": "rec-2",
            "date": "2024-03-04",
            "hours": 9.0,
            "description": "Support",
            "project": "",
            "timestamp": "2024-03-04 10:00:00",
            "time_ranges": [{"start": "09:00", "end": "11:00", "hours": 2.0}]
        }"#;
        let entity: RecordEntity = serde_json::from_str(json).unwrap();
        let (record, _) = entity.into_record().unwrap();
        assert!((record.hours() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_invalid_stored_record() {
        let entity = RecordEntity {
            id: Some("rec-3".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            hours: 0.0,
            description: "Nothing".to_string(),
            project: String::new(),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            time_ranges: None,
        };
        assert!(matches!(
            entity.into_record(),
            Err(ValidationError::NonPositiveHours { .. })
        ));
    }

    #[test]
    fn entity_from_record_roundtrips() {
        let json = r#"{
            "id": "rec-4",
            "date": "2024-03-05",
            "hours": 1.5,
            "description": "Standup",
            "project": "Ops",
            "timestamp": "2024-03-05 09:45:00",
            "time_ranges": [{"start": "09:00 AM", "end": "10:30 AM", "hours": 1.5}]
        }"#;
        let entity: RecordEntity = serde_json::from_str(json).unwrap();
        let (record, _) = entity.clone().into_record().unwrap();
        assert_eq!(RecordEntity::from(&record), entity);
    }

    #[test]
    fn rejects_dates_outside_four_digit_years() {
        let json = r#"{
            "id": "rec-5",
            "date": "+262142-12-31",
            "hours": 1.0,
            "description": "Far future",
            "project": "",
            "timestamp": "2024-03-05 09:45:00"
        }"#;
        assert!(serde_json::from_str::<RecordEntity>(json).is_err());
    }
}
