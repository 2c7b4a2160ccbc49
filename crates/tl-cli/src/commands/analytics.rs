//! Analytics command: hours by day, by project, and by ISO week.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tl_core::aggregate::{group_by_day, group_by_project, group_by_week};
use tl_core::{DayTotal, ProjectTotal, WeekSummary};
use tl_store::{Persistence, RecordStore};

use super::util::{format_hours, progress_bar};

#[derive(Debug, Serialize)]
struct AnalyticsReport {
    by_day: Vec<DayTotal>,
    by_project: Vec<ProjectTotal>,
    by_week: Vec<WeekSummary>,
}

pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &RecordStore<P>,
    json: bool,
) -> Result<()> {
    let report = AnalyticsReport {
        by_day: group_by_day(store.all()),
        by_project: group_by_project(store.all()),
        by_week: group_by_week(store.all()),
    };

    if json {
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        return Ok(());
    }

    if store.is_empty() {
        writeln!(writer, "Add some entries to see analytics.")?;
        return Ok(());
    }

    write_days(writer, &report.by_day)?;
    // Only shown once at least one entry names a project
    if !report.by_project.is_empty() {
        writeln!(writer)?;
        write_projects(writer, &report.by_project)?;
    }
    writeln!(writer)?;
    write_weeks(writer, &report.by_week)?;

    Ok(())
}

fn write_days<W: Write>(writer: &mut W, days: &[DayTotal]) -> std::io::Result<()> {
    let max = days.iter().map(|d| d.hours).fold(0.0, f64::max);
    writeln!(writer, "Hours by day")?;
    for day in days {
        writeln!(
            writer,
            "{}  {:>5}  {}",
            day.date,
            format_hours(day.hours),
            progress_bar(day.hours, max)
        )?;
    }
    Ok(())
}

fn write_projects<W: Write>(writer: &mut W, projects: &[ProjectTotal]) -> std::io::Result<()> {
    // Sorted largest first
    let max = projects.first().map_or(0.0, |p| p.hours);
    let width = projects
        .iter()
        .map(|p| p.project.chars().count())
        .max()
        .unwrap_or_default();

    writeln!(writer, "Hours by project")?;
    for project in projects {
        writeln!(
            writer,
            "{:<width$}  {:>5}  {}",
            project.project,
            format_hours(project.hours),
            progress_bar(project.hours, max)
        )?;
    }
    Ok(())
}

fn write_weeks<W: Write>(writer: &mut W, weeks: &[WeekSummary]) -> std::io::Result<()> {
    writeln!(writer, "Weekly summary")?;
    writeln!(
        writer,
        "{:<21}  {:>6}  {:>7}  {:>4}",
        "Week", "Total", "Avg/day", "Days"
    )?;
    for week in weeks {
        writeln!(
            writer,
            "{:<21}  {:>6}  {:>7}  {:>4}",
            week.label(),
            format_hours(week.total_hours),
            format_hours(week.avg_hours_per_day),
            week.days_worked
        )?;
    }
    Ok(())
}
