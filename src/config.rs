use crate::models::Settings;
use std::path::PathBuf;

pub const DEFAULT_BANK_DIR: &str = "assets/data";
pub const DEFAULT_EXPORT_DIR: &str = ".";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";
pub const DEFAULT_QUESTION_TIME: u32 = 195;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bank_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub settings: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bank_dir: PathBuf::from(DEFAULT_BANK_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            settings: Settings {
                shuffle: true,
                per_question_time: DEFAULT_QUESTION_TIME,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let path_or = |key: &str, fallback: PathBuf| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(fallback)
        };

        let shuffle = lookup("QUIZ_SHUFFLE")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.settings.shuffle);

        let per_question_time = lookup("QUIZ_QUESTION_TIME")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(defaults.settings.per_question_time);

        Self {
            bank_dir: path_or("QUIZ_BANK_DIR", defaults.bank_dir),
            export_dir: path_or("QUIZ_EXPORT_DIR", defaults.export_dir),
            log_file: path_or("QUIZ_LOG_FILE", defaults.log_file),
            settings: Settings {
                shuffle,
                per_question_time,
            },
        }
    }

    pub fn default_bank_path(&self) -> PathBuf {
        self.bank_dir.join(crate::bank::DEFAULT_BANK_FILE)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert!(config.settings.shuffle);
        assert_eq!(config.settings.per_question_time, 195);
        assert_eq!(
            config.default_bank_path(),
            PathBuf::from("assets/data/questions.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("QUIZ_BANK_DIR", "/tmp/banks"),
            ("QUIZ_EXPORT_DIR", "/tmp/out"),
            ("QUIZ_SHUFFLE", "off"),
            ("QUIZ_QUESTION_TIME", "30"),
        ]);
        assert_eq!(config.bank_dir, PathBuf::from("/tmp/banks"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert!(!config.settings.shuffle);
        assert_eq!(config.settings.per_question_time, 30);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("QUIZ_SHUFFLE", "maybe"),
            ("QUIZ_QUESTION_TIME", "-5"),
            ("QUIZ_BANK_DIR", "  "),
        ]);
        assert!(config.settings.shuffle);
        assert_eq!(config.settings.per_question_time, DEFAULT_QUESTION_TIME);
        assert_eq!(config.bank_dir, PathBuf::from(DEFAULT_BANK_DIR));
    }

    #[test]
    fn test_zero_time_disables_timer() {
        let config = config_from(&[("QUIZ_QUESTION_TIME", "0")]);
        assert_eq!(config.settings.per_question_time, 0);
    }
}
