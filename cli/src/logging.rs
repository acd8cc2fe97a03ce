//! Logging setup for the command line front end.
//!
//! Logs go to stderr so command output on stdout stays machine readable.
//! Set `DEBUG_LOGGING=1` for debug output from the resonator crates, or
//! `RUST_LOG` for full control.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter_directive = if debug_logging {
        "info,resonator_core=debug,resonator_cli=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "resonator logging initialized");
}
