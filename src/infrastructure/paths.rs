//! Filesystem location management.
//!
//! This module resolves the platform-specific data directory used for log
//! output. It wraps the `dirs` crate so the rest of the codebase never touches
//! platform path conventions directly.

use std::path::PathBuf;

/// Returns the data directory for postdeck files.
///
/// Resolves to the platform data directory (`~/.local/share/postdeck` on
/// Linux, the equivalent on macOS and Windows). Falls back to a `.postdeck`
/// directory under the current working directory when the platform directory
/// cannot be determined.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map_or_else(|| PathBuf::from(".postdeck"), |dir| dir.join("postdeck"))
}

/// Returns the log file name used by the tracing file appender.
#[must_use]
pub const fn log_file_name() -> &'static str {
    "postdeck.log"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        let dir = get_data_dir();
        assert!(dir.ends_with("postdeck") || dir.ends_with(".postdeck"));
    }
}
