//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigFile, ConfigFileError};
use crate::geo::LatLng;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("min_zoom") {
            config.map.min_zoom = Some(parse_number("map", "min_zoom", v)?);
        }
        if let Some(v) = section.get("max_zoom") {
            config.map.max_zoom = Some(parse_number("map", "max_zoom", v)?);
        }
        if let (Some(min), Some(max)) = (config.map.min_zoom, config.map.max_zoom) {
            if min > max {
                return Err(invalid(
                    "map",
                    "min_zoom",
                    &min.to_string(),
                    "must not exceed max_zoom",
                ));
            }
        }

        match (section.get("center_lat"), section.get("center_lng")) {
            (Some(lat), Some(lng)) => {
                let lat: f64 = parse_number("map", "center_lat", lat)?;
                let lng: f64 = parse_number("map", "center_lng", lng)?;
                if lat.abs() > 90.0 {
                    return Err(invalid("map", "center_lat", &lat.to_string(), "must be within ±90"));
                }
                if lng.abs() > 180.0 {
                    return Err(invalid("map", "center_lng", &lng.to_string(), "must be within ±180"));
                }
                config.map.initial_center = Some(LatLng::new(lat, lng));
            }
            (Some(v), None) => {
                return Err(invalid("map", "center_lat", v, "center_lng must also be set"));
            }
            (None, Some(v)) => {
                return Err(invalid("map", "center_lng", v, "center_lat must also be set"));
            }
            (None, None) => {}
        }

        if let Some(v) = section.get("width") {
            config.map.width = Some(parse_number("map", "width", v)?);
        }
        if let Some(v) = section.get("height") {
            config.map.height = Some(parse_number("map", "height", v)?);
        }
        if let Some(v) = section.get("debug") {
            let debug =
                parse_bool(v).ok_or_else(|| invalid("map", "debug", v, "expected a boolean"))?;
            config.map.debug = Some(debug);
        }
        if let Some(v) = section.get("user_id") {
            let v = v.trim();
            if !v.is_empty() {
                config.map.user_id = Some(v.to_string());
            }
        }
    }

    // [servers] section
    if let Some(section) = ini.section(Some("servers")) {
        if let Some(v) = section.get("tile_url") {
            let v = v.trim();
            if !v.is_empty() {
                config.map.tile_server_url = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("api_url") {
            let v = v.trim();
            if !v.is_empty() {
                config.map.api_server_url = Some(v.to_string());
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.log_file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_number<T: FromStr>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "expected a number"))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a boolean value from a string.
///
/// Returns `None` for anything other than true/1/yes/on or false/0/no/off.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(text).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_parse_bool_variants() {
        for v in ["true", "TRUE", "1", "yes", " on "] {
            assert_eq!(parse_bool(v), Some(true), "{} should be true", v);
        }
        for v in ["false", "0", "No", "off"] {
            assert_eq!(parse_bool(v), Some(false), "{} should be false", v);
        }
        for v in ["", "maybe", "2"] {
            assert_eq!(parse_bool(v), None, "{} should be rejected", v);
        }
    }

    #[test]
    fn test_unrecognized_debug_value_rejected() {
        let err = parse("[map]\ndebug = maybe\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref section, ref key, ref value, .. }
                if section == "map" && key == "debug" && value == "maybe"
        ));
    }

    #[test]
    fn test_half_center_is_rejected() {
        let err = parse("[map]\ncenter_lat = 10\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "center_lat"));
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let err = parse("[map]\nmin_zoom = 12\nmax_zoom = 4\n").unwrap_err();
        assert!(err.to_string().contains("max_zoom"));
    }

    #[test]
    fn test_blank_user_id_is_ignored() {
        let config = parse("[map]\nuser_id =\n").unwrap();
        assert!(config.map.user_id.is_none());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/logs/treemap.log");
        assert!(!expanded.starts_with("~"));
        assert_eq!(expand_tilde("/var/log/t.log"), PathBuf::from("/var/log/t.log"));
    }
}
