//! INI parsing logic for converting `Ini` → `Settings`.
//!
//! The single place where INI key names are mapped to struct fields.

use super::settings::Settings;
use super::ConfigError;
use ini::Ini;
use std::path::PathBuf;

/// Parse an `Ini` object into `Settings`.
///
/// Starts from `Settings::default()` and overlays any values found in the
/// INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(section) = ini.section(Some("store")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                settings.store.directory = PathBuf::from(v);
            }
        }
    }

    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("ttl_secs") {
            settings.cache.ttl_secs = v.parse().map_err(|_| invalid(
                "cache",
                "ttl_secs",
                v,
                "must be a non-negative integer (seconds)",
            ))?;
        }
    }

    if let Some(section) = ini.section(Some("timeline")) {
        if let Some(v) = section.get("horizon_secs") {
            let horizon: i64 = v.parse().map_err(|_| invalid(
                "timeline",
                "horizon_secs",
                v,
                "must be a positive integer (seconds)",
            ))?;
            if horizon <= 0 {
                return Err(invalid(
                    "timeline",
                    "horizon_secs",
                    v,
                    "must be a positive integer (seconds)",
                ));
            }
            settings.timeline.horizon_secs = horizon;
        }
        if let Some(v) = section.get("max_entries") {
            let max: usize = v.parse().map_err(|_| invalid(
                "timeline",
                "max_entries",
                v,
                "must be a positive integer",
            ))?;
            if max == 0 {
                return Err(invalid(
                    "timeline",
                    "max_entries",
                    v,
                    "must be a positive integer",
                ));
            }
            settings.timeline.max_entries = max;
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                settings.logging.directory = PathBuf::from(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                settings.logging.file = v.to_string();
            }
        }
    }

    Ok(settings)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ini_from(text: &str) -> Ini {
        Ini::load_from_str(text).unwrap()
    }

    #[test]
    fn test_empty_ini_yields_defaults() {
        let settings = parse_ini(&ini_from("")).unwrap();
        assert_eq!(settings.cache.ttl_secs, 300);
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let settings = parse_ini(&ini_from("[theme]\nname = zen\n")).unwrap();
        assert_eq!(settings.timeline.max_entries, 720);
    }

    #[test]
    fn test_blank_directory_keeps_default() {
        let settings = parse_ini(&ini_from("[store]\ndirectory =  \n")).unwrap();
        assert!(settings.store.directory.ends_with("answerglance"));
    }

    #[test]
    fn test_max_entries_zero_rejected() {
        let err = parse_ini(&ini_from("[timeline]\nmax_entries = 0\n")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_negative_horizon_rejected() {
        assert!(parse_ini(&ini_from("[timeline]\nhorizon_secs = -5\n")).is_err());
    }
}
