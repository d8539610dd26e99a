//! Path utilities for hedgepool.
//!
//! All data lives under `~/.hedgepool/`:
//! - `~/.hedgepool/config.toml` - main configuration
//! - `~/.hedgepool/hedgepool.db` - wager and ledger database

use std::path::PathBuf;

/// Returns the hedgepool home directory (`~/.hedgepool/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hedgepool")
}

/// Returns the default config file path (`~/.hedgepool/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.hedgepool/hedgepool.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("hedgepool.db")
}
