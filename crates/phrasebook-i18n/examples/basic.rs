//! Translate a few phrases and watch the catalog fill up.
//!
//! Run with `RUST_LOG=debug` to see catalog loads and writes.

use phrasebook_config::ConfigLoader;
use phrasebook_i18n::{t, tn, Engine};
use phrasebook_log::LogConfig;

fn main() -> anyhow::Result<()> {
    phrasebook_log::init(LogConfig::from_env())?;

    let mut config = ConfigLoader::discover().load_with_env()?;
    config.directory = std::env::temp_dir().join("phrasebook-basic");
    let engine = Engine::new(config)?;

    println!("default locale: {}", engine.default_locale());
    println!("{}", t!(engine, None, "Hello"));
    println!("{}", t!(engine, Some("de"), "Hello %s", "Ada"));

    for count in [1, 2, 5] {
        println!("{}", tn!(engine, Some("de"), "%s cat", "%s cats", count));
    }

    let stats = engine.stats();
    println!(
        "{} phrases in {:?} ({})",
        stats.phrases, stats.loaded_locales, stats.extension
    );
    println!("catalogs written to {}", engine.config().directory.display());
    Ok(())
}
