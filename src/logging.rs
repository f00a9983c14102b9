use tracing::Level;

/// Install a compact stderr subscriber. Warnings only by default so a clean
/// run stays silent; `verbose` enables debug events for every file and link.
/// The level is never taken from the environment.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .init();
}
