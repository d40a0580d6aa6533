use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Args;
use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use vendorlint_core::{FieldValue, parse_record};

use crate::CliError;
use crate::files::{collect_vendor_files, file_name};

const USER_AGENT: &str = "vendorlint/linkchecker";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// Gentle rate limiting between requests.
const PACE: Duration = Duration::from_millis(300);

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Vendor record files or directories containing them.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: LinkArgs) -> Result<ExitCode, CliError> {
    let files = collect_vendor_files(&args.paths)?;
    if files.is_empty() {
        println!("No vendor files found.");
        return Ok(ExitCode::SUCCESS);
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    tracing::info!(event = "link_check_started", files = files.len());

    let mut total_urls = 0usize;
    let mut dead = 0usize;

    for path in &files {
        let Ok(text) = fs::read_to_string(path) else {
            continue;
        };
        let Ok(record) = parse_record(&text) else {
            continue;
        };

        let name = record
            .get("name")
            .and_then(FieldValue::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| file_name(path));

        let sources = match record.get("pricing_source") {
            Some(FieldValue::String(url)) => vec![url.clone()],
            Some(FieldValue::List(urls)) => urls.clone(),
            _ => Vec::new(),
        };

        for url in sources {
            if !url.starts_with("http") {
                continue;
            }
            total_urls += 1;

            let (status, error) = check_url(&client, &url);
            let is_dead = match status {
                Some(code) => code >= 400,
                None => true,
            };

            if is_dead {
                dead += 1;
                let reason = match status {
                    Some(code) => code.to_string(),
                    None => format!("connection error: {}", error.unwrap_or_default()),
                };
                println!("  DEAD  {name}: {url} ({reason})");
            } else {
                println!("  OK    {name}: {url} ({})", status.unwrap_or_default());
            }

            thread::sleep(PACE);
        }
    }

    tracing::info!(event = "link_check_finished", urls = total_urls, dead = dead);

    println!();
    println!("Checked {total_urls} URL(s) across {} vendor file(s).", files.len());
    if dead > 0 {
        println!("{dead} dead link(s) found.");
        return Ok(ExitCode::FAILURE);
    }
    println!("All links OK.");
    Ok(ExitCode::SUCCESS)
}

/// Probe one URL, returning (status-code-or-none, error-string-or-none).
///
/// Tries HEAD first and falls back to GET when the server rejects HEAD.
/// Redirects are followed by the client.
fn check_url(client: &Client, url: &str) -> (Option<u16>, Option<String>) {
    for method in [Method::HEAD, Method::GET] {
        match client.request(method.clone(), url).send() {
            Ok(response) => {
                let status = response.status();
                if method == Method::HEAD && status == StatusCode::METHOD_NOT_ALLOWED {
                    continue;
                }
                return (Some(status.as_u16()), None);
            }
            Err(err) => return (None, Some(err.to_string())),
        }
    }
    (None, Some("all methods failed".to_string()))
}
