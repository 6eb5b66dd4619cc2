use log::LevelFilter;
use tracing_subscriber::filter::LevelFilter as MaxLevel;

/// Sends `log` records to stderr through a `tracing` subscriber, keeping stdout for snapshots.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    let max_level = match level {
        LevelFilter::Off => MaxLevel::OFF,
        LevelFilter::Error => MaxLevel::ERROR,
        LevelFilter::Warn => MaxLevel::WARN,
        LevelFilter::Info => MaxLevel::INFO,
        LevelFilter::Debug => MaxLevel::DEBUG,
        LevelFilter::Trace => MaxLevel::TRACE,
    };

    // also installs the bridge that forwards `log` macros
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
