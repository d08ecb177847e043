use crate::models::Settings;
use std::fs;
use std::io;
use std::path::Path;

/// Reads a JSON settings file. No path means the built-in defaults; a path that does not
/// exist is an error so a typo does not silently fall back.
pub fn load(path: Option<&Path>) -> io::Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let bytes = fs::read(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to read settings {}: {}", path.display(), e),
        )
    })?;
    let settings: Settings = serde_json::from_slice(&bytes).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid settings {}: {}", path.display(), e),
        )
    })?;

    Ok(settings.normalized())
}
