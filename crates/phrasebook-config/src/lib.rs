//! Configuration for Phrasebook.
//!
//! Settings come from `.phrasebook/config.yaml` (with `${VAR}` expansion),
//! optionally overlaid by `PHRASEBOOK_*` environment variables.

pub mod types;
pub mod loader;
pub mod env;


pub use types::*;
pub use loader::*;
pub use env::*;
