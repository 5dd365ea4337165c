use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, resolve_in};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_timeout")]
    pub session_timeout_minutes: u32,
    #[serde(default = "default_warning")]
    pub session_warning_minutes: u32,
    #[serde(default = "default_username")]
    pub login_username: String,
    #[serde(default = "default_password")]
    pub login_password: String,
    #[serde(default = "default_phone")]
    pub login_phone: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_timeout() -> u32 {
    15
}
fn default_warning() -> u32 {
    2
}
fn default_username() -> String {
    "admin".to_string()
}
fn default_password() -> String {
    "admin".to_string()
}
fn default_phone() -> String {
    "1234567890".to_string()
}
fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            session_timeout_minutes: default_timeout(),
            session_warning_minutes: default_warning(),
            login_username: default_username(),
            login_password: default_password(),
            login_phone: default_phone(),
            date_format: default_date_format(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworkhistory")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rworkhistory")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworkhistory.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworkhistory.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse configuration: {e}")))?;
        if StrftimeItems::new(&cfg.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Config(format!(
                "invalid date_format: {:?}",
                cfg.date_format
            )));
        }
        cfg.database = resolve_in(&Self::config_dir(), &cfg.database)
            .to_string_lossy()
            .to_string();
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was written (or would have been, in test mode).
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => expand_tilde(&name),
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                io::Error::new(e.kind(), format!("cannot create {:?}: {e}", db_path))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }
}
