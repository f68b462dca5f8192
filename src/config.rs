//! Runtime configuration from environment variables.
//!
//! - `ANTIVIRAL_MODEL_PATH`: model artifact file or directory
//! - `ANTIVIRAL_LOG_MODE`: `auto` (default), `file` or `stdout`
//! - `ANTIVIRAL_LOG_FILE`: log file used in file mode
//!
//! Log filtering itself follows `RUST_LOG`.

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "ANTIVIRAL_MODEL_PATH";
pub const LOG_MODE_ENV: &str = "ANTIVIRAL_LOG_MODE";
pub const LOG_FILE_ENV: &str = "ANTIVIRAL_LOG_FILE";

/// Directory searched for a known artifact name (see `MODEL_FILE_CANDIDATES`).
pub const DEFAULT_MODEL_PATH: &str = "models";
pub const DEFAULT_LOG_FILE: &str = "antiviral-sim.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether to log to a file. Writing to the terminal would corrupt the
    /// TUI's alternate screen.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            model_path: non_empty(MODEL_PATH_ENV)
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            log_mode: non_empty(LOG_MODE_ENV)
                .map(|v| LogMode::parse(v.trim()))
                .unwrap_or(LogMode::Auto),
            log_file: non_empty(LOG_FILE_ENV)
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (MODEL_PATH_ENV, "models"),
            (LOG_MODE_ENV, "stdout"),
            (LOG_FILE_ENV, "/tmp/sim.log"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.model_path, PathBuf::from("models"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/sim.log"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_default_path_finds_bundled_model() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let config = AppConfig::default();
        let loaded = crate::adapters::load_model(&root.join(&config.model_path))
            .expect("default path should resolve to the bundled model");
        assert!(loaded.source.ends_with("modelo_antiviral.json"));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert_eq!(LogMode::parse("bogus"), LogMode::Auto);
    }
}
