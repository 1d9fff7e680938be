// Planner platform abstraction
// Resolves where settings and the record database live on Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// File name of the record database inside the data directory.
pub const DATABASE_FILE: &str = "planner.db";

/// Returns the platform-specific configuration directory for Planner.
///
/// - **Linux**: `~/.config/planner` (or `$XDG_CONFIG_HOME/planner`)
/// - **macOS**: `~/Library/Application Support/Planner`
/// - **Windows**: `%APPDATA%/Planner`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for Planner.
///
/// - **Linux**: `~/.local/share/planner` (or `$XDG_DATA_HOME/planner`)
/// - **macOS**: `~/Library/Application Support/Planner`
/// - **Windows**: `%APPDATA%/Planner`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the record database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}
