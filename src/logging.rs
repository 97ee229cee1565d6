//! Log output for the command line tool

/// Install a `tracing_subscriber` that writes to stdout
///
/// If `debug` is `false` then only `error!`, `warn!` and `info!` are reported.
/// If `debug` is `true` then `debug!` and `trace!` are reported as well.
pub fn init_tracing_subscriber(debug: bool) {
    let log_level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
        .with_max_level(log_level)
        .with_writer(std::io::stdout)
        .init();
}
