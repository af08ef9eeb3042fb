//! Configuration for the Questweave server
//!
//! Handles data directory configuration with the following precedence:
//! 1. QUESTWEAVE_DATA_DIR environment variable
//! 2. ~/.config/questweave/data (production default)
//! 3. ./data (fallback for development)

use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "QUESTWEAVE_DATA_DIR";
const DEFAULT_CONFIG_DIR: &str = ".config/questweave/data";
const DEV_DATA_DIR: &str = "./data";
const DATABASE_FILE: &str = "questweave.db";

/// Get the data directory for persistence.
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var(DATA_DIR_ENV).ok(),
        std::env::var("HOME").ok(),
    )
}

/// Location of the SQLite database inside a data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

fn resolve_data_dir(explicit: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = explicit.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_wins() {
        let dir = resolve_data_dir(Some("/srv/qw".to_string()), Some("/home/ann".to_string()));
        assert_eq!(dir, PathBuf::from("/srv/qw"));
    }

    #[test]
    fn test_home_default() {
        let dir = resolve_data_dir(None, Some("/home/ann".to_string()));
        assert_eq!(dir, PathBuf::from("/home/ann/.config/questweave/data"));
    }

    #[test]
    fn test_dev_fallback() {
        assert_eq!(resolve_data_dir(None, None), PathBuf::from("./data"));
        assert_eq!(
            resolve_data_dir(Some(String::new()), None),
            PathBuf::from("./data")
        );
    }

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/srv/qw"));
        assert_eq!(path, PathBuf::from("/srv/qw/questweave.db"));
    }
}
