use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use serde::Serialize;
use vendorlint_core::{
    REGISTRY_VERSION, ValidationReport, Validator, collect_category_tags, parse_record,
    suggest_percent_increase,
};

use crate::CliError;
use crate::files::{collect_vendor_files, file_name};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Vendor record files or directories containing them.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
    /// Exit with an error code when any record has warnings.
    #[arg(long, default_value_t = false)]
    pub fail_on_warnings: bool,
    /// Print machine-readable category tokens after the summary.
    #[arg(long, default_value_t = false)]
    pub categories: bool,
    /// Print suggested percent_increase lines for records missing one.
    #[arg(long, default_value_t = false)]
    pub suggest: bool,
    /// Write a JSON report of all diagnostics to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    files_scanned: usize,
    files_with_errors: usize,
    files_with_warnings: usize,
    categories: Vec<String>,
    files: Vec<FileReport>,
}

pub fn run(args: ValidateArgs) -> Result<ExitCode, CliError> {
    let files = collect_vendor_files(&args.paths)?;
    let validator = Validator::default();

    tracing::info!(
        event = "validation_started",
        files = files.len(),
        registry_version = REGISTRY_VERSION
    );

    let mut reports: Vec<ValidationReport> = Vec::new();
    let mut file_reports: Vec<FileReport> = Vec::new();
    let mut files_with_errors = 0usize;
    let mut files_with_warnings = 0usize;

    for path in &files {
        let name = file_name(path);
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                files_with_errors += 1;
                println!("❌ {name}");
                println!("   Error: Failed to read file: {err}");
                file_reports.push(FileReport {
                    file: name,
                    is_valid: false,
                    errors: vec![format!("Failed to read file: {err}")],
                    warnings: Vec::new(),
                });
                continue;
            }
        };

        let report = validator.validate(&text);

        if !report.errors.is_empty() {
            files_with_errors += 1;
            println!("❌ {name}");
            for message in report.error_messages() {
                println!("   Error: {message}");
            }
        }
        if !report.warnings.is_empty() {
            files_with_warnings += 1;
            println!("⚠️ {name}");
            for message in report.warning_messages() {
                println!("   Warning: {message}");
            }
        }

        if args.suggest {
            if let Ok(record) = parse_record(&text) {
                if let Some(patch) = suggest_percent_increase(&record, validator.registry()) {
                    println!("   Suggested for {name}: {}", patch.render_line());
                }
            }
        }

        file_reports.push(FileReport {
            file: name,
            is_valid: report.is_valid(),
            errors: report.error_messages(),
            warnings: report.warning_messages(),
        });
        reports.push(report);
    }

    let categories: Vec<String> = collect_category_tags(&reports)
        .into_iter()
        .map(str::to_owned)
        .collect();

    println!();
    println!("{}", "=".repeat(40));
    println!("Validation complete. Scanned {} files.", files.len());
    println!("Errors: {files_with_errors} files");
    println!("Warnings: {files_with_warnings} files");

    if args.categories {
        for tag in &categories {
            println!("{tag}");
        }
    }

    if let Some(path) = &args.report {
        let run_report = RunReport {
            files_scanned: files.len(),
            files_with_errors,
            files_with_warnings,
            categories,
            files: file_reports,
        };
        fs::write(path, serde_json::to_vec_pretty(&run_report)?)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    tracing::info!(
        event = "validation_finished",
        errors = files_with_errors,
        warnings = files_with_warnings
    );

    if files_with_errors > 0 || (args.fail_on_warnings && files_with_warnings > 0) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
