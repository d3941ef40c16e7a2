//! Structured logging bootstrap using **tracing**.
//!
//! The library itself only emits `trace!`/`debug!` events (matcher attempts,
//! rejections, absent fields, shape mismatches); it never installs a
//! subscriber on its own. Applications that embed matching and want those
//! events can call [`init_structured_logging`] once at startup.

/// Installs the global tracing collector with structured JSON output.
///
/// Call *once* at the beginning of the application's runtime. Output goes to
/// stderr so stdout stays clean for program output.
///
/// # Environment Variables
/// - `RUST_LOG`: controls filtering (e.g. `RUST_LOG=dynmatch=trace`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
