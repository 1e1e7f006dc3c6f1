use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "slidesplit=warn",
        1 => "slidesplit=info",
        2 => "slidesplit=debug",
        _ => "slidesplit=trace",
    }
}

/// Installs the stderr diagnostics subscriber.
///
/// Calling it twice is harmless; the second registration is ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();

    tracing::debug!(verbosity, "logging initialized");
}
