//! JSON-based assumption loader
//!
//! The document mirrors the `Assumptions` struct; `gtm-model dump-config`
//! prints the defaults in this format.

use super::Assumptions;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load assumptions from a JSON file and validate them
pub fn load_json(path: &Path) -> Result<Assumptions> {
    let file = File::open(path)?;
    let assumptions = load_json_from_reader(BufReader::new(file))?;
    log::info!("Loaded assumptions from {}", path.display());
    Ok(assumptions)
}

/// Load assumptions from any reader and validate them
pub fn load_json_from_reader<R: Read>(reader: R) -> Result<Assumptions> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    assumptions.validate()?;
    Ok(assumptions)
}
