//! Loading and layering settings.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::types::Settings;

/// Resolves the default settings file path (`~/.praxis/settings.json`).
#[must_use]
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".praxis").join("settings.json")
}

/// Recursively merges `overlay` into `base`. Objects merge key by key;
/// any other value in the overlay replaces the base value outright.
fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        let _ = base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base_slot, _) => {
            *base_slot = overlay.clone();
        }
    }
}

/// Loads settings from a JSON file layered over the defaults.
///
/// A missing file yields plain defaults. A file that fails to parse is
/// logged and ignored rather than aborting startup.
#[must_use]
pub fn load(path: &Path) -> Settings {
    let defaults = Settings::default();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return defaults;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read settings file");
            return defaults;
        }
    };

    let overlay: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings file is not valid JSON");
            return defaults;
        }
    };

    let mut merged = match serde_json::to_value(&defaults) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "cannot serialize default settings");
            return defaults;
        }
    };
    deep_merge(&mut merged, &overlay);

    match serde_json::from_value(merged) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings file has invalid values");
            defaults
        }
    }
}

/// Applies `PRAXIS_*` environment variables on top of loaded settings.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

fn apply_overrides(settings: &mut Settings, get: impl Fn(&str) -> Option<String>) {
    if let Some(host) = get("PRAXIS_HOST") {
        settings.host = host;
    }
    if let Some(raw) = get("PRAXIS_PORT") {
        match raw.parse::<u16>() {
            Ok(port) => settings.port = port,
            Err(_) => tracing::warn!(value = %raw, "ignoring unparsable PRAXIS_PORT"),
        }
    }
    if let Some(db_path) = get("PRAXIS_DB_PATH") {
        settings.db_path = db_path;
    }
    if let Some(secret) = get("PRAXIS_TOKEN_SECRET") {
        settings.token_secret = secret;
    }
    if let Some(raw) = get("PRAXIS_TOKEN_TTL_HOURS") {
        match raw.parse::<i64>() {
            Ok(hours) if hours > 0 => settings.token_ttl_hours = hours,
            _ => tracing::warn!(value = %raw, "ignoring unparsable PRAXIS_TOKEN_TTL_HOURS"),
        }
    }
    if let Some(level) = get("PRAXIS_LOG_LEVEL") {
        settings.log_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Write as _;

    #[test]
    fn settings_path_lands_in_praxis_dir() {
        let path = settings_path();
        assert!(path.ends_with(".praxis/settings.json"));
    }

    #[test]
    fn deep_merge_preserves_untouched_keys() {
        let mut base = json!({"a": {"x": 1, "y": 2}, "b": "keep"});
        deep_merge(&mut base, &json!({"a": {"y": 20, "z": 30}}));
        assert_eq!(base, json!({"a": {"x": 1, "y": 20, "z": 30}, "b": "keep"}));
    }

    #[test]
    fn deep_merge_replaces_non_objects() {
        let mut base = json!({"list": [1, 2, 3]});
        deep_merge(&mut base, &json!({"list": [9]}));
        assert_eq!(base, json!({"list": [9]}));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"port": 9999, "logLevel": "debug"}}"#).unwrap();

        let settings = load(&path);
        assert_eq!(settings.port, 9999);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.host, "127.0.0.1");
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{{ not json").unwrap();

        assert_eq!(load(&path), Settings::default());
    }

    #[test]
    fn env_overrides_apply_and_validate() {
        let env: HashMap<&str, &str> = [
            ("PRAXIS_PORT", "7000"),
            ("PRAXIS_TOKEN_SECRET", "prod-secret"),
            ("PRAXIS_TOKEN_TTL_HOURS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_overrides(&mut settings, |key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(settings.port, 7000);
        assert_eq!(settings.token_secret, "prod-secret");
        assert_eq!(settings.token_ttl_hours, Settings::default().token_ttl_hours);
    }

    #[test]
    fn negative_ttl_is_ignored() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, |key| {
            (key == "PRAXIS_TOKEN_TTL_HOURS").then(|| "-5".to_string())
        });
        assert_eq!(settings.token_ttl_hours, Settings::default().token_ttl_hours);
    }
}
