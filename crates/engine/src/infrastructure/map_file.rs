//! Map file loader.
//!
//! One city per line: `Name dir=Other dir=Other ...`, whitespace separated.
//! Blank lines and `#` comments are skipped. The domain validates every
//! neighbour spec; this module only splits lines into fields.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// City name -> raw `direction=neighbour` specs, as read from the file.
pub type MapData = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum MapFileError {
    #[error("Failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line} starts with a neighbour spec instead of a city name")]
    MissingCityName { line: usize },
}

/// Read and split a map file.
pub fn load_map(path: &Path) -> Result<MapData, MapFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| MapFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_map(&contents)?;
    tracing::debug!(path = %path.display(), cities = map.len(), "Loaded map file");
    Ok(map)
}

/// Split map text into `name -> specs`. A repeated city name replaces the
/// earlier line.
pub fn parse_map(contents: &str) -> Result<MapData, MapFileError> {
    let mut map = MapData::new();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(name) = fields.next() else {
            continue;
        };
        if name.contains('=') {
            return Err(MapFileError::MissingCityName { line: index + 1 });
        }

        let specs = fields.map(str::to_string).collect();
        if map.insert(name.to_string(), specs).is_some() {
            tracing::warn!(city = name, line = index + 1, "City listed twice; keeping the later line");
        }
    }
    Ok(map)
}
