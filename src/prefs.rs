use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

/// UI preferences that survive restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    pub fn theme(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark_mode)
    }
}

/// Save preferences as JSON.
pub fn save_to_file(prefs: &Preferences, path: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(prefs).map_err(|e| format!("Serialize error: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("Write error: {e}"))?;
    Ok(())
}

pub fn load_from_file(path: &str) -> Result<Preferences, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("Read error: {e}"))?;
    serde_json::from_str(&json).map_err(|e| format!("Deserialize error: {e}"))
}

/// Load preferences, falling back to defaults (light mode) when the file is missing
/// or unreadable.
pub fn load_or_default(path: &str) -> Preferences {
    match load_from_file(path) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::debug!(path, error = %e, "using default preferences");
            Preferences::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(name: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("{}_{}.json", name, nanos))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn dark_mode_survives_save_and_load() {
        let path = temp_file("prefs_dark");
        save_to_file(&Preferences { dark_mode: true }, &path).unwrap();
        let loaded = load_from_file(&path).unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.theme(), ThemeMode::Dark);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_falls_back_to_light_mode() {
        let prefs = load_or_default(&temp_file("prefs_missing"));
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.theme(), ThemeMode::Light);
    }

    #[test]
    fn corrupt_file_fails_load() {
        let path = temp_file("prefs_corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_from_file(&path).is_err());
        assert!(!load_or_default(&path).dark_mode);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn empty_object_uses_field_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert!(!prefs.dark_mode);
    }
}
