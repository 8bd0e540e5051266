//! On-disk locations for sheet-stack
//!
//! Two things are read or written outside the process: the persistence
//! config loaded at startup and the rolling log file. Both sit under one
//! app directory, `$XDG_CONFIG_HOME/sheet-stack` when that variable is set
//! and `~/.config/sheet-stack` otherwise.

use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "sheet-stack";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

fn app_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
    Some(base.join(APP_DIR))
}

/// Sheet persistence config (`SheetConfig`), if a home directory is known
pub fn config_file() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Directory receiving `sheet-stack.log`
pub fn logs_dir() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory for logs"))?;
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}
