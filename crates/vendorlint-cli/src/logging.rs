use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. `VENDORLINT_LOG` overrides the level;
/// `--verbose` raises the default from warn to info.
pub fn init(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("VENDORLINT_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
