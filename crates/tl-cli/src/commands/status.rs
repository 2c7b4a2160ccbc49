//! Status command for showing where entries live and how many there are.

use std::io::Write;

use anyhow::{Context, Result};
use tl_core::SortOrder;
use tl_core::aggregate::sort_by_date;
use tl_store::RecordStore;

use super::util::format_hours;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let store = RecordStore::open_file(&config.data_path)
        .with_context(|| format!("failed to open {}", config.data_path.display()))?;

    writeln!(writer, "Time log status")?;
    writeln!(writer, "Data file: {}", config.data_path.display())?;

    if store.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Entries: {}", store.len())?;
    if let Some(latest) = sort_by_date(store.all(), SortOrder::NewestFirst).first() {
        writeln!(
            writer,
            "Latest: {} {} ({})",
            latest.date(),
            latest.project_label(),
            format_hours(latest.hours())
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tl_core::Hours;

    use insta::assert_snapshot;

    use crate::commands::fixtures::{date, record};

    #[test]
    fn status_command_outputs_count_and_latest_entry() {
        let temp = tempfile::tempdir().unwrap();
        let data_path = temp.path().join("time_logs.json");
        let mut store = RecordStore::open_file(&data_path).unwrap();
        store
            .add(record("r1", date(4, 2), Hours::Manual(6.0), "Docs", "Guide"))
            .unwrap();
        store
            .add(record("r2", date(4, 1), Hours::Manual(2.0), "", "Email"))
            .unwrap();

        let config = Config {
            data_path: data_path.clone(),
        };
        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&data_path.display().to_string(), "[TEMP]/time_logs.json");
        assert_snapshot!(output, @r"
        Time log status
        Data file: [TEMP]/time_logs.json
        Entries: 2
        Latest: 2024-04-02 Docs (6.0h)
        ");
    }

    #[test]
    fn status_command_without_data_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_path: temp.path().join("missing.json"),
        };
        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with("No entries recorded.\n"));
        // Reading never creates the file
        assert!(!config.data_path.exists());
    }
}
