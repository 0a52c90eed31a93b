//! Generic JSON persistence helpers for ~/.spellquest/ files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the default ~/.spellquest/ directory path, creating it if needed.
pub fn default_data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".spellquest");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file from `dir`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(
    dir: &Path,
    filename: &str,
) -> T {
    let path = dir.join(filename);
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON into `dir`.
pub fn save_json<T: serde::Serialize>(dir: &Path, filename: &str, data: &T) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(dir.join(filename), json)?;
    Ok(())
}
