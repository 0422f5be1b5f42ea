//! Configuration loading and validation
//!
//! The config file is TOML with a single `[walls]` table, found at
//! `~/.wallsrc` unless another path is given on the command line:
//!
//! ```toml
//! [walls]
//! api_key = "myapikey"
//! api_secret = "myapisecret"
//! tags = "sanfrancisco"
//! image_dir = "~/wallpapers"
//! width = 1920
//! height = 1080
//! ```
//!
//! Validation is all-up-front: every missing key is reported in one message,
//! then non-integer dimensions, then a missing image directory. The rest of
//! the program only ever sees an already-validated [`Config`].

use crate::error::{Error, Result};
use crate::selection::Constraint;
use std::path::{Path, PathBuf};

/// Keys the `[walls]` table must define
const REQUIRED_KEYS: [&str; 6] = [
    "api_key",
    "api_secret",
    "tags",
    "image_dir",
    "width",
    "height",
];

/// Validated program configuration
///
/// Immutable for the lifetime of the run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Flickr API key
    pub api_key: String,
    /// Flickr API secret
    pub api_secret: String,
    /// Comma-separated tag filter passed to the photo search
    pub tags: String,
    /// Directory the chosen wallpaper is saved into (must already exist)
    pub image_dir: PathBuf,
    /// Minimum acceptable image width in pixels
    pub width: u32,
    /// Minimum acceptable image height in pixels
    pub height: u32,
}

impl Config {
    /// Load and validate the config file at `path`
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path).map_err(|_| Error::Config {
            message: format!("couldn't load config {}", path.display()),
            key: None,
        })?;

        let value: toml::Value = text.parse().map_err(|e| Error::Config {
            message: format!("couldn't parse config {}: {e}", path.display()),
            key: None,
        })?;

        let table = value
            .get("walls")
            .and_then(toml::Value::as_table)
            .ok_or_else(|| Error::Config {
                message: "config missing [walls] section".to_string(),
                key: None,
            })?;

        // Report every missing key at once
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !table.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(Error::Config {
                message: format!("missing config keys: '{}'", missing.join("', '")),
                key: None,
            });
        }

        let api_key = string_key(table, "api_key")?;
        let api_secret = string_key(table, "api_secret")?;
        let tags = string_key(table, "tags")?;

        // Both dimensions checked before reporting
        let width = dimension_key(table, "width");
        let height = dimension_key(table, "height");
        let bad: Vec<&str> = [("width", &width), ("height", &height)]
            .iter()
            .filter(|(_, parsed)| parsed.is_none())
            .map(|(key, _)| *key)
            .collect();
        if !bad.is_empty() {
            return Err(Error::Config {
                message: format!("the following must be positive integers: '{}'", bad.join("', '")),
                key: None,
            });
        }
        let (Some(width), Some(height)) = (width, height) else {
            unreachable!("missing dimensions reported above");
        };

        let image_dir = expand_tilde(&string_key(table, "image_dir")?);
        if !image_dir.is_dir() {
            return Err(Error::config(
                format!("the directory {} does not exist", image_dir.display()),
                "image_dir",
            ));
        }

        Ok(Config {
            api_key,
            api_secret,
            tags,
            image_dir,
            width,
            height,
        })
    }

    /// Minimum dimensions derived from the validated configuration
    pub fn constraint(&self) -> Constraint {
        Constraint {
            min_width: self.width,
            min_height: self.height,
        }
    }
}

/// Default config location: `~/.wallsrc`
///
/// Returns `None` when the home directory cannot be determined.
pub fn default_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".wallsrc"))
}

/// Fetch a key that must hold a string value
fn string_key(table: &toml::map::Map<String, toml::Value>, key: &str) -> Result<String> {
    table
        .get(key)
        .and_then(toml::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::config(format!("'{key}' must be a string"), key))
}

/// Fetch a dimension key, accepting a positive integer or a numeric string
fn dimension_key(table: &toml::map::Map<String, toml::Value>, key: &str) -> Option<u32> {
    match table.get(key)? {
        toml::Value::Integer(n) if *n > 0 => u32::try_from(*n).ok(),
        toml::Value::String(s) => s.parse::<u32>().ok().filter(|n| *n > 0),
        _ => None,
    }
}

/// Expand a leading `~/` to the user's home directory
fn expand_tilde(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(dirs) = directories::BaseDirs::new()
    {
        return dirs.home_dir().join(rest);
    }
    PathBuf::from(raw)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Write a config file into the temp dir and return its path
    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("wallsrc.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    fn full_config(dir: &TempDir) -> String {
        format!(
            r#"
[walls]
api_key = "myapikey"
api_secret = "myapisecret"
tags = "sanfrancisco"
image_dir = "{}"
width = 1920
height = 1080
"#,
            dir.path().display()
        )
    }

    fn config_message(err: Error) -> String {
        match err {
            Error::Config { message, .. } => message,
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn valid_config_loads() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &full_config(&dir));

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api_key, "myapikey");
        assert_eq!(config.api_secret, "myapisecret");
        assert_eq!(config.tags, "sanfrancisco");
        assert_eq!(config.image_dir, dir.path());
        assert_eq!(
            config.constraint(),
            Constraint {
                min_width: 1920,
                min_height: 1080,
            }
        );
    }

    #[test]
    fn unreadable_file_reports_load_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.toml");

        let message = config_message(Config::load(&path).unwrap_err());
        assert!(
            message.starts_with("couldn't load config"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn missing_walls_section_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[other]\napi_key = \"k\"\n");

        let message = config_message(Config::load(&path).unwrap_err());
        assert_eq!(message, "config missing [walls] section");
    }

    #[test]
    fn all_missing_keys_reported_together() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[walls]\napi_key = \"k\"\n");

        let message = config_message(Config::load(&path).unwrap_err());
        for key in ["api_secret", "tags", "image_dir", "width", "height"] {
            assert!(message.contains(key), "message should name {key}: {message}");
        }
        assert!(
            !message.contains("api_key"),
            "present key must not be reported: {message}"
        );
    }

    #[test]
    fn non_integer_dimensions_reported_together() {
        let dir = TempDir::new().unwrap();
        let contents = full_config(&dir)
            .replace("width = 1920", "width = \"wide\"")
            .replace("height = 1080", "height = \"tall\"");
        let path = write_config(&dir, &contents);

        let message = config_message(Config::load(&path).unwrap_err());
        assert!(message.contains("positive integers"), "{message}");
        assert!(message.contains("width"), "{message}");
        assert!(message.contains("height"), "{message}");
    }

    #[test]
    fn numeric_string_dimensions_accepted() {
        let dir = TempDir::new().unwrap();
        let contents = full_config(&dir)
            .replace("width = 1920", "width = \"1920\"")
            .replace("height = 1080", "height = \"1080\"");
        let path = write_config(&dir, &contents);

        let config = Config::load(&path).unwrap();
        assert_eq!((config.width, config.height), (1920, 1080));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let contents = full_config(&dir).replace("width = 1920", "width = 0");
        let path = write_config(&dir, &contents);

        let message = config_message(Config::load(&path).unwrap_err());
        assert!(message.contains("width"), "{message}");
        assert!(!message.contains("height"), "{message}");
    }

    #[test]
    fn missing_image_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let contents = full_config(&dir).replace(
            &dir.path().display().to_string(),
            "/nonexistent/wallpapers",
        );
        let path = write_config(&dir, &contents);

        let err = Config::load(&path).unwrap_err();
        match err {
            Error::Config { message, key } => {
                assert_eq!(key.as_deref(), Some("image_dir"));
                assert!(message.contains("does not exist"), "{message}");
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn non_string_tags_is_rejected() {
        let dir = TempDir::new().unwrap();
        let contents = full_config(&dir).replace("tags = \"sanfrancisco\"", "tags = 42");
        let path = write_config(&dir, &contents);

        let err = Config::load(&path).unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("tags")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths_alone() {
        assert_eq!(expand_tilde("/tmp/walls"), PathBuf::from("/tmp/walls"));
    }

    #[test]
    fn expand_tilde_resolves_home_prefix() {
        if let Some(dirs) = directories::BaseDirs::new() {
            assert_eq!(
                expand_tilde("~/wallpapers"),
                dirs.home_dir().join("wallpapers")
            );
        }
    }
}
