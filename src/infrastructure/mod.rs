//! Infrastructure utilities for filesystem locations.
//!
//! # Modules
//!
//! - [`paths`]: Platform data directory resolution for log output

pub mod paths;

pub use paths::get_data_dir;
