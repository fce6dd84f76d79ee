//! Example demonstrating the Phrasebook logging setup.

use phrasebook_log::spans::storage_span;
use phrasebook_log::{debug, error, info, init, trace, warn, LogConfig, LogFormat, LogLevel};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LogConfig {
        level: LogLevel::Debug,
        format: LogFormat::Json,
        file_path: Some(PathBuf::from("/tmp/phrasebook-demo.log")),
        source_location: true,
        span_events: true,
    };

    init(config)?;

    trace!("hidden at debug level");
    debug!(locale = "de", "loading catalog");
    info!("catalog ready");

    let span = storage_span("write", "locales/de.json");
    let _guard = span.enter();
    warn!(locale = "xx", "no locale bound, using default");
    error!("unable to write locales to file");

    println!("Environment config: {:?}", LogConfig::from_env());
    println!("Log file written to /tmp/phrasebook-demo.log");

    Ok(())
}
