use std::{fs, io, path::Path};

use crate::models::Settings;

pub const CONFIG_PATH: &str = "data/config.json";

// Missing file -> defaults. Unreadable or malformed file -> error.
pub fn load_settings() -> io::Result<Settings> {
    load_settings_from(Path::new(CONFIG_PATH))
}

pub fn load_settings_from(path: &Path) -> io::Result<Settings> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let text = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
