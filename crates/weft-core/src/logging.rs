//! Logging conventions.
//!
//! weft emits structured `tracing` events with a `message` field naming the
//! operation (`"layout.measure"`, `"selection.delta"`, ...) and typed fields
//! for its inputs and outputs. Libraries never install a subscriber; the
//! application does. The `tracing-json` feature offers a ready-made JSON
//! subscriber for production binaries.

pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Error returned when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub type InitError = tracing_subscriber::util::TryInitError;

/// Install a JSON subscriber filtered by `RUST_LOG` (default `info`).
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> Result<(), InitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}
