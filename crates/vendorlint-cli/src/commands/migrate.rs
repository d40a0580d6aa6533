use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use regex::Regex;

use crate::CliError;
use crate::files::{collect_vendor_files, file_name};

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Vendor record files or directories containing them.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: MigrateArgs) -> Result<ExitCode, CliError> {
    let files = collect_vendor_files(&args.paths)?;
    let mut migrated = 0usize;

    for path in &files {
        let original = fs::read_to_string(path)?;
        if let Some(updated) = migrate_text(&original) {
            fs::write(path, updated)?;
            println!("  migrated: {}", file_name(path));
            migrated += 1;
        }
    }

    println!();
    println!("Done. {migrated}/{} files updated.", files.len());
    Ok(ExitCode::SUCCESS)
}

/// Apply the one-time legacy rewrite:
/// - `footnotes: '[^id]: text'` becomes `vendor_note: text`
/// - `pricing_note: Quote` becomes
///   `pricing_source_info: Pricing comes from a quote`
/// - `[^id]` references are stripped from the pricing fields
///
/// Returns the new contents, or `None` when the file needs no changes.
fn migrate_text(original: &str) -> Option<String> {
    let footnote_def = Regex::new(r"^\[\^[^\]]+\]:\s*").ok()?;
    let footnote_ref = Regex::new(r"\[\^[^\]]+\]").ok()?;

    let lines: Vec<&str> = original.split_inclusive('\n').collect();
    let mut out: Vec<String> = Vec::new();
    let mut changed = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(first) = field_rest(line, "footnotes") {
            // Absorb indented continuation lines of a block scalar.
            let mut parts = vec![first.trim_end_matches('\n').to_string()];
            let mut j = i + 1;
            while j < lines.len() && lines[j].starts_with([' ', '\t']) {
                parts.push(lines[j].trim().to_string());
                j += 1;
            }

            let combined = parts.join(" ").trim().to_string();
            let combined = strip_surrounding_quotes(&combined).replace("''", "'");
            let note = footnote_def.replace(&combined, "").trim().to_string();

            if !note.is_empty() {
                out.push(render_field_line("vendor_note", &note));
            }
            // The old field is dropped either way.
            changed = true;
            i = j;
            continue;
        }

        if let Some(rest) = field_rest(line, "pricing_note") {
            let value = rest.trim();
            if !value.is_empty() {
                if value.eq_ignore_ascii_case("quote") {
                    out.push("pricing_source_info: Pricing comes from a quote\n".to_string());
                } else {
                    out.push(format!("pricing_source_info: {value}\n"));
                }
            }
            changed = true;
            i += 1;
            continue;
        }

        if is_pricing_line(line) && footnote_ref.is_match(line) {
            out.push(footnote_ref.replace_all(line, "").into_owned());
            changed = true;
            i += 1;
            continue;
        }

        out.push(line.to_string());
        i += 1;
    }

    changed.then(|| out.concat())
}

fn field_rest<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim_start_matches([' ', '\t']))
}

fn is_pricing_line(line: &str) -> bool {
    ["sso_pricing:", "base_pricing:", "percent_increase:"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn strip_surrounding_quotes(value: &str) -> String {
    let bytes = value.as_bytes();
    if value.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[value.len() - 1] == first {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

// Quote the value when plain scalar syntax would break on it.
fn render_field_line(field: &str, value: &str) -> String {
    if value.contains('\'') || value.contains(':') || value.contains('#') {
        let escaped = value.replace('"', "\\\"");
        format!("{field}: \"{escaped}\"\n")
    } else {
        format!("{field}: {value}\n")
    }
}
