use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use vendorlint_core::{FieldValue, VendorRecord, parse_record};

use crate::CliError;
use crate::files::{collect_vendor_files, file_name};

#[derive(Args, Debug)]
pub struct StaleArgs {
    /// Vendor record files or directories containing them.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
    /// Staleness threshold in days.
    #[arg(long, default_value_t = 730)]
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct StaleEntry {
    updated_at: NaiveDate,
    name: String,
    file: String,
}

pub fn run(args: StaleArgs) -> Result<ExitCode, CliError> {
    let files = collect_vendor_files(&args.paths)?;
    let cutoff = Local::now().date_naive() - Duration::days(args.days);

    // Unreadable files and unparsable dates are someone else's problem;
    // the validator reports those.
    let mut entries = Vec::new();
    for path in &files {
        let Ok(text) = fs::read_to_string(path) else {
            continue;
        };
        let Ok(record) = parse_record(&text) else {
            continue;
        };
        let Some(updated_at) = record_date(&record) else {
            continue;
        };
        entries.push(StaleEntry {
            updated_at,
            name: record_name(&record, path),
            file: file_name(path),
        });
    }

    let stale = find_stale(entries, cutoff);

    if stale.is_empty() {
        println!("No vendors older than {} days. All up to date.", args.days);
    } else {
        println!(
            "Found {} vendor(s) not updated since {} ({} days ago):",
            stale.len(),
            cutoff,
            args.days
        );
        println!();
        for entry in &stale {
            println!("  {}  {}  ({})", entry.updated_at, entry.name, entry.file);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Entries strictly older than the cutoff, oldest first.
fn find_stale(entries: Vec<StaleEntry>, cutoff: NaiveDate) -> Vec<StaleEntry> {
    let mut stale: Vec<StaleEntry> = entries
        .into_iter()
        .filter(|entry| entry.updated_at < cutoff)
        .collect();
    stale.sort();
    stale
}

fn record_date(record: &VendorRecord) -> Option<NaiveDate> {
    let value = record.get("updated_at")?;
    NaiveDate::parse_from_str(value.as_str()?, "%Y-%m-%d").ok()
}

fn record_name(record: &VendorRecord, path: &Path) -> String {
    record
        .get("name")
        .and_then(FieldValue::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| file_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("test date")
    }

    fn entry(updated_at: &str, name: &str) -> StaleEntry {
        StaleEntry {
            updated_at: date(updated_at),
            name: name.to_string(),
            file: format!("{}.yaml", name.to_lowercase()),
        }
    }

    #[test]
    fn selects_only_entries_older_than_the_cutoff() {
        let entries = vec![
            entry("2024-06-01", "Fresh"),
            entry("2021-01-01", "Ancient"),
            entry("2022-12-31", "Borderline"),
        ];
        let stale = find_stale(entries, date("2023-01-01"));
        assert_eq!(stale.len(), 2);
        assert_eq!(stale[0].name, "Ancient");
        assert_eq!(stale[1].name, "Borderline");
    }

    #[test]
    fn cutoff_date_itself_is_not_stale() {
        let entries = vec![entry("2023-01-01", "Exact")];
        assert!(find_stale(entries, date("2023-01-01")).is_empty());
    }

    #[test]
    fn orders_oldest_first() {
        let entries = vec![
            entry("2020-05-05", "B"),
            entry("2019-01-01", "A"),
            entry("2020-01-01", "C"),
        ];
        let stale = find_stale(entries, date("2023-01-01"));
        let names: Vec<&str> = stale.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }
}
