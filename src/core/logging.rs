//! Logging initialization
//!
//! The library only emits `log` records: layout construction and full
//! refills at `info`/`warn`, every streamed rectangle at `debug`, and
//! hysteresis-suppressed ticks at `trace`. Binaries pick a backend here.

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    builder.format_timestamp_millis();
    builder
}

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=lodscape::terrain=debug` to see every streamed strip.
///
/// # Example
/// ```no_run
/// lodscape::core::logging::init();
/// log::info!("Streaming started");
/// ```
pub fn init() {
    builder().init();
}

/// Initialize logging, returning `false` when a logger was already installed.
pub fn try_init() -> bool {
    builder().try_init().is_ok()
}
