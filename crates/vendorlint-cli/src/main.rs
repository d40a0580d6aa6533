mod commands;
mod files;
mod logging;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "vendorlint", version, about = "Vendor pricing record linter")]
struct Cli {
    /// Log progress events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate vendor records against the schema and pricing checks.
    Validate(commands::validate::ValidateArgs),
    /// List records whose updated_at exceeds the staleness threshold.
    Stale(commands::stale::StaleArgs),
    /// Check that every pricing_source URL is reachable.
    CheckLinks(commands::links::LinkArgs),
    /// Rewrite legacy footnotes/pricing_note fields into current ones.
    Migrate(commands::migrate::MigrateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match cli.command {
        Command::Validate(args) => commands::validate::run(args),
        Command::Stale(args) => commands::stale::run(args),
        Command::CheckLinks(args) => commands::links::run(args),
        Command::Migrate(args) => commands::migrate::run(args),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("vendorlint: {err}");
            ExitCode::FAILURE
        }
    }
}
