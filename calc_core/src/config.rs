//! # Settings
//!
//! User settings read from a TOML file. Every field has a default, so a
//! partial file (or no file at all) is valid.
//!
//! ```toml
//! output_dir = "informes"
//!
//! [report]
//! engineer = "Ing. Ana Gómez"
//! job_id = "25-014"
//! company = "Metalmecánica Andina"
//!
//! [logistics]
//! daily_fee = 15000.0
//! daily_rate = 0.004
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::stair_cost::LogisticsPolicy;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::write_atomic;

/// Metadata printed on report headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub engineer: String,
    pub job_id: String,
    pub company: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            engineer: String::new(),
            job_id: String::new(),
            company: "Forja".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory for relative export paths; the working directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    pub report: ReportSettings,
    pub logistics: LogisticsPolicy,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::config_error("<inline>", e.to_string()))
    }

    pub fn to_toml(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// `FileError` if the file cannot be read, `ConfigError` if it does not
    /// parse or holds a negative logistics policy.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        let settings: Settings = toml::from_str(&text)
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;

        settings
            .logistics
            .validate()
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> CalcResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Write settings as TOML
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        write_atomic(path, self.to_toml()?.as_bytes())
    }

    /// Resolve an export path against `output_dir`.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve_output(&self, path: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.logistics.daily_rate, 0.005);
        assert_eq!(settings.logistics.daily_fee, 0.0);
        assert_eq!(settings.report.company, "Forja");
        assert!(settings.output_dir.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = Settings::from_toml("[report]\nengineer = \"Ana\"\n").unwrap();
        assert_eq!(settings.report.engineer, "Ana");
        assert_eq!(settings.report.company, "Forja");
        assert_eq!(settings.logistics, LogisticsPolicy::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings {
            report: ReportSettings {
                engineer: "Ana Gómez".to_string(),
                job_id: "25-014".to_string(),
                company: "Andina".to_string(),
            },
            logistics: LogisticsPolicy {
                daily_fee: 15_000.0,
                daily_rate: 0.004,
            },
            output_dir: Some(PathBuf::from("informes")),
        };

        let text = settings.to_toml().unwrap();
        assert!(text.contains("[logistics]"));
        let roundtrip = Settings::from_toml(&text).unwrap();
        assert_eq!(roundtrip, settings);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Settings::from_toml("[logistics]\ndaily_rate = \"mucho\"").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("forja_settings_does_not_exist.toml");
        let _ = fs::remove_file(&path);

        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
        assert_eq!(Settings::load(&path).unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_save_and_load() {
        let path = env::temp_dir().join("forja_settings_roundtrip.toml");
        let mut settings = Settings::default();
        settings.report.job_id = "J-7".to_string();

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_negative_policy_rejected_on_load() {
        let path = env::temp_dir().join("forja_settings_negative.toml");
        fs::write(&path, "[logistics]\ndaily_fee = -1.0\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resolve_output() {
        let settings = Settings {
            output_dir: Some(PathBuf::from("informes")),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolve_output(Path::new("a.pdf")),
            PathBuf::from("informes").join("a.pdf")
        );
        assert_eq!(Settings::default().resolve_output(Path::new("a.pdf")), PathBuf::from("a.pdf"));
    }
}
