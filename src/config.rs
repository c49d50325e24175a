use std::env;
use std::path::{Path, PathBuf};

use crate::error::TasquestError;

pub const APP_DIR: &str = "tasquest";
pub const DATA_FILE: &str = "tasks.json";
/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "TASQUEST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    /// Use `explicit` (from `--data` or `TASQUEST_DATA`) when given, otherwise the
    /// platform data dir.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, TasquestError> {
        let data_path = match explicit {
            Some(p) => p.to_path_buf(),
            None => default_data_path()?,
        };
        Ok(Self { data_path })
    }
}

/// `<data dir>/tasquest/tasks.json`, where the data dir is `$XDG_DATA_HOME`,
/// `$HOME/.local/share` or `%APPDATA%`, in that order.
pub fn default_data_path() -> Result<PathBuf, TasquestError> {
    data_dir_from(|key| env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from))
        .map(|dir| dir.join(APP_DIR).join(DATA_FILE))
        .ok_or_else(|| {
            TasquestError::persistence(
                "Cannot locate a data directory. Pass --data <path> or set TASQUEST_DATA.",
            )
        })
}

fn data_dir_from(lookup: impl Fn(&str) -> Option<PathBuf>) -> Option<PathBuf> {
    lookup("XDG_DATA_HOME")
        .or_else(|| lookup("HOME").map(|h| h.join(".local").join("share")))
        .or_else(|| lookup("APPDATA"))
}
