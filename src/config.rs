use dirs::config_dir;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Bucket count of the reference table.
pub const DEFAULT_BUCKET_COUNT: usize = 65366;

/// Longest word, in bytes, the dictionary and the scanner accept.
pub const LENGTH: usize = 45;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub dictionary: PathBuf,
    pub bucket_count: usize,
    pub max_word_length: usize,
}

// On-disk shape; a missing dictionary keeps the default relative to the
// working directory.
#[derive(Deserialize)]
struct ConfigFile {
    dictionary: Option<PathBuf>,
    #[serde(default = "default_bucket_count")]
    bucket_count: usize,
    #[serde(default = "default_max_word_length")]
    max_word_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            bucket_count: default_bucket_count(),
            max_word_length: default_max_word_length(),
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing fields fall back to their defaults.
    ///
    /// A relative `dictionary` path is taken relative to the directory that
    /// holds the config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let dictionary = match file.dictionary {
            Some(dictionary) => {
                let dictionary = expand_tilde(&dictionary).unwrap_or(dictionary);
                match path.parent() {
                    Some(dir) if dictionary.is_relative() => dir.join(dictionary),
                    _ => dictionary,
                }
            }
            None => default_dictionary(),
        };
        let config = Config {
            dictionary,
            bucket_count: file.bucket_count,
            max_word_length: file.max_word_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Picks the explicit file if one is given, then the per-user file if it
    /// exists, then the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("reading config from {}", path.display());
            return Config::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                debug!("reading config from {}", path.display());
                Config::from_file(path)
            }
            _ => {
                debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::Invalid {
                field: "bucket_count",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_word_length == 0 {
            return Err(ConfigError::Invalid {
                field: "max_word_length",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("dictionaries/large")
}

fn default_bucket_count() -> usize {
    DEFAULT_BUCKET_COUNT
}

fn default_max_word_length() -> usize {
    LENGTH
}

pub fn default_config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push("speller");
    path.push("config.json");
    Some(path)
}

pub fn expand_tilde<P: AsRef<Path>>(path_user_input: P) -> Option<PathBuf> {
    let p = path_user_input.as_ref();
    if !p.starts_with("~") {
        return Some(p.to_path_buf());
    }
    let home = dirs::home_dir()?;
    let rest = p.strip_prefix("~").ok()?;
    if rest.as_os_str().is_empty() {
        return Some(home);
    }
    Some(home.join(rest))
}
