use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod check;

/// Environment variable overriding `api_base_url` (deployment-time base URL).
pub const API_BASE_URL_ENV: &str = "WHOPS_API_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_work_baseline")]
    pub work_baseline: String,
    #[serde(default = "default_idle_minutes")]
    pub user_idle_timeout_minutes: u64,
    #[serde(default = "default_idle_minutes")]
    pub admin_idle_timeout_minutes: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_work_baseline() -> String {
    "8h".to_string()
}
fn default_idle_minutes() -> u64 {
    20
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            database: default_database(),
            work_baseline: default_work_baseline(),
            user_idle_timeout_minutes: default_idle_minutes(),
            admin_idle_timeout_minutes: default_idle_minutes(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("whops")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".whops")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("whops.conf")
    }

    /// Return the full path of the SQLite database (local storage + internal log)
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("whops.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// The base URL env override is applied last.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Self::from_yaml(&content)?
        } else {
            Config::default()
        };

        if let Ok(url) = env::var(API_BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            cfg.api_base_url = url.trim().to_string();
        }

        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Work baseline in minutes (480 for the default "8h").
    pub fn baseline_minutes(&self) -> AppResult<i64> {
        parse_duration_to_minutes(&self.work_baseline)
            .ok_or_else(|| AppError::Config(format!("invalid work_baseline: {}", self.work_baseline)))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("whops.sqlite"),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

/// Parse a duration such as "8h", "90m", "7h30m" or "07:30" into minutes.
pub fn parse_duration_to_minutes(s: &str) -> Option<i64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Some((h, m)) = s.split_once(':') {
        let h: i64 = h.parse().ok()?;
        let m: i64 = m.parse().ok()?;
        return (m < 60).then_some(h * 60 + m);
    }

    let re = regex::Regex::new(r"^(?:(\d+)h)?\s*(?:(\d+)m)?$").ok()?;
    let caps = re.captures(&s)?;
    let hours = caps.get(1).map(|m| m.as_str().parse::<i64>()).transpose().ok()?;
    let minutes = caps.get(2).map(|m| m.as_str().parse::<i64>()).transpose().ok()?;

    if hours.is_none() && minutes.is_none() {
        return None;
    }
    Some(hours.unwrap_or(0) * 60 + minutes.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_baseline_forms() {
        assert_eq!(parse_duration_to_minutes("8h"), Some(480));
        assert_eq!(parse_duration_to_minutes("7h30m"), Some(450));
        assert_eq!(parse_duration_to_minutes("90m"), Some(90));
        assert_eq!(parse_duration_to_minutes("07:45"), Some(465));
        assert_eq!(parse_duration_to_minutes(""), None);
        assert_eq!(parse_duration_to_minutes("eight"), None);
        assert_eq!(parse_duration_to_minutes("7:75"), None);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg = Config::from_yaml("api_base_url: https://api.example.test\n").unwrap();
        assert_eq!(cfg.api_base_url, "https://api.example.test");
        assert_eq!(cfg.work_baseline, "8h");
        assert_eq!(cfg.user_idle_timeout_minutes, 20);
        assert_eq!(cfg.admin_idle_timeout_minutes, 20);
        assert_eq!(cfg.baseline_minutes().unwrap(), 480);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = Config::from_yaml("user_idle_timeout_minutes: [oops").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
