use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// One-call logging setup for a host embedding the session.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,pond=info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_init_does_not_panic() {
        // the test logger is already installed by the ctor bootstrap
        super::init_tracing();
        super::init_tracing();
        tracing::info!(component = "telemetry", "still logging");
    }
}
