// crates/souk-cli/src/state.rs
//
// Engine state persistence: the whole Storefront serializes to a JSON
// file between invocations.

use std::fs;

use souk_engine::Storefront;

/// Load the storefront from the state file.
pub fn load(path: &str) -> Result<Storefront, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        format!(
            "cannot read state file {}: {} (run `souk init` first)",
            path, e
        )
    })?;
    let front = serde_json::from_str(&raw)
        .map_err(|e| format!("state file {} is corrupt: {}", path, e))?;
    Ok(front)
}

/// Persist the storefront to the state file.
pub fn save(path: &str, front: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    let raw = serde_json::to_string_pretty(front)?;
    fs::write(path, raw)?;
    Ok(())
}
