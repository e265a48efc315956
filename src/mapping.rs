//! Loading and persisting flat `key -> text` JSON catalogs.
//!
//! Catalogs are [`IndexMap`]s so that iteration order is the order the keys
//! appear in the file; the written catalog is ordered by the source catalog.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// A flat, insertion-ordered `key -> text` catalog.
pub type Mapping = IndexMap<String, String>;

/// Parse a catalog from JSON text. The document must be an object of strings.
pub fn parse_mapping(json: &str) -> Result<Mapping> {
    serde_json::from_str(json).context("Expected a flat JSON object of string values")
}

/// Load the English source catalog. Any failure here is fatal for the run.
pub fn load_source(path: &Path) -> Result<Mapping> {
    info!("Loading {}...", path.display());
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source catalog {}", path.display()))?;
    let mapping = parse_mapping(&contents)
        .with_context(|| format!("Failed to parse source catalog {}", path.display()))?;
    info!("Found {} keys", mapping.len());
    Ok(mapping)
}

/// Load the existing Spanish catalog.
///
/// Returns an empty catalog when the file does not exist or when `force` is
/// set (every eligible key is then translated from scratch).
pub fn load_target(path: &Path, force: bool) -> Result<Mapping> {
    if force || !path.exists() {
        return Ok(Mapping::new());
    }

    info!("Loading existing {}...", path.display());
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read target catalog {}", path.display()))?;
    let mapping = parse_mapping(&contents)
        .with_context(|| format!("Failed to parse target catalog {}", path.display()))?;
    info!("Found {} existing translations", mapping.len());
    Ok(mapping)
}

/// Render a catalog as indented JSON with non-ASCII text kept literal.
pub fn render_mapping(mapping: &Mapping) -> Result<String> {
    let mut json = serde_json::to_string_pretty(mapping).context("Failed to serialize catalog")?;
    json.push('\n');
    Ok(json)
}

/// Write a catalog, creating parent directories as needed.
pub fn write_mapping(path: &Path, mapping: &Mapping) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = render_mapping(mapping)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
