use std::error::Error;
use std::path::PathBuf;
use std::{env, io};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Area {
    /// Capacity in UTF-16 units, unbounded when absent
    pub quota: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Replay {
    /// Script to replay, the built-in session when absent
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    #[serde(default)]
    pub local: Area,
    #[serde(default)]
    pub session: Area,
    #[serde(default)]
    pub replay: Replay,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let mut settings = Self::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))?;

        if let Some(path) = &settings.replay.path {
            let normalized_path = Self::normalize_path(path)?
                .to_string_lossy()
                .to_string();

            settings.replay.path = Some(normalized_path);
        }

        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn normalize_path(path: &str) -> io::Result<PathBuf> {
        let path_buf = PathBuf::from(path);

        Ok(if path_buf.is_absolute() {
            path_buf
        } else {
            env::current_dir()?.as_path().join(&path_buf)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::new().unwrap();
        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.local.quota, Some(5_242_880));
        assert_eq!(settings.session.quota, Some(5_242_880));
        assert!(settings.replay.path.is_none());
    }

    #[test]
    fn test_optional_sections() {
        let settings = Settings::from_toml(
            r#"
            [logger]
            level = "debug"

            [session]
            quota = 16
            "#,
        )
        .unwrap();

        assert_eq!(settings.logger.level, "debug");
        assert_eq!(settings.local.quota, None);
        assert_eq!(settings.session.quota, Some(16));
        assert!(settings.replay.path.is_none());
    }

    #[test]
    fn test_missing_logger_rejected() {
        assert!(Settings::from_toml("[local]\nquota = 1").is_err());
    }

    #[test]
    fn test_relative_path_normalized() {
        let path = Settings::normalize_path("configs/script.toml").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("configs/script.toml"));
    }
}
