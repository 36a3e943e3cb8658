//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Avatar service used when a new friend is added without a custom image
pub const DEFAULT_IMAGE_URL: &str = "https://i.pravatar.cc/48";

/// Application name
pub const APP_NAME: &str = "Eat-'n-Split";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory (under the home directory) holding the optional starting roster
pub const CONFIG_DIR_NAME: &str = ".eat-n-split";

/// Roster file read at startup, never written
pub const ROSTER_FILE_NAME: &str = "friends.yaml";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "eat-n-split.log";

/// Input poll interval for the UI loop, in milliseconds
pub const POLL_INTERVAL_MS: u64 = 50;
