use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const BLUEPRINT: &str = include_str!("../folio.toml");

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub log_level: String,
    pub log_file: Option<String>,
    pub tick_rate_ms: u64,
    pub scroll_duration_ms: u64,
    pub visibility_threshold: f64,
    pub scroll_buffer: f64,
    pub show_nav: bool,
    pub content_path: Option<String>,
    pub download_dir: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let user_config_path = get_user_config_path();

        let mut builder = Config::builder()
            // 1. Built-in defaults.
            .add_source(File::from_str(BLUEPRINT, FileFormat::Toml));
        // 2. User's global config.
        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let s = builder
            // 3. Local folio.toml from CWD.
            .add_source(File::with_name("folio.toml").required(false))
            // 4. FOLIO_SCROLL_BUFFER=4 and friends.
            .add_source(Environment::with_prefix("FOLIO"))
            .build()?;

        s.try_deserialize::<Self>()?.validated()
    }

    /// Builds settings from the defaults plus one TOML override.
    #[cfg(test)]
    pub fn from_toml(overrides: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(BLUEPRINT, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let t = self.visibility_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::Message(format!(
                "visibility_threshold must be in (0, 1], got {}",
                t
            )));
        }
        Ok(self)
    }

    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(p) => PathBuf::from(shellexpand::tilde(p).into_owned()),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("folio")
                .join("folio.log"),
        }
    }
}

/// First run: writes the blueprint to the user config path so it can be edited.
/// Failures are logged and otherwise ignored.
pub fn seed_user_config() {
    let Some(path) = get_user_config_path() else {
        return;
    };
    match seed_config_at(&path) {
        Ok(true) => info!(path = %path.display(), "wrote default config"),
        Ok(false) => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not write default config"),
    }
}

fn seed_config_at(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, BLUEPRINT)?;
    Ok(true)
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("folio");
    path.push("folio.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_page_behaviour() {
        let s = Settings::from_toml("").unwrap();
        assert_eq!(s.visibility_threshold, 0.3);
        assert_eq!(s.scroll_buffer, 12.0);
        assert_eq!(s.tick_rate_ms, 200);
        assert!(s.content_path.is_none());
        assert!(s.show_nav);
    }

    #[test]
    fn overrides_replace_defaults() {
        let s = Settings::from_toml("scroll_buffer = 2.0\ndownload_dir = \"/tmp/cv\"").unwrap();
        assert_eq!(s.scroll_buffer, 2.0);
        assert_eq!(s.download_dir.as_deref(), Some("/tmp/cv"));
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        for bad in ["0.0", "-0.5", "1.5"] {
            let err = Settings::from_toml(&format!("visibility_threshold = {}", bad)).unwrap_err();
            assert!(err.to_string().contains("visibility_threshold"));
        }
        assert_eq!(Settings::from_toml("visibility_threshold = 1.0").unwrap().visibility_threshold, 1.0);
    }

    #[test]
    fn seeding_writes_blueprint_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio").join("folio.toml");
        assert!(seed_config_at(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), BLUEPRINT);

        fs::write(&path, "scroll_buffer = 1.0").unwrap();
        assert!(!seed_config_at(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "scroll_buffer = 1.0");
    }

    #[test]
    fn seeding_under_a_file_reports_the_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        assert!(seed_config_at(&blocker.join("folio.toml")).is_err());
    }

    #[test]
    fn explicit_log_file_is_used() {
        let s = Settings::from_toml("log_file = \"/tmp/folio-test.log\"").unwrap();
        assert_eq!(s.log_path(), PathBuf::from("/tmp/folio-test.log"));
    }
}
