//! Settings for a sync run, read from `.language-sync.json`.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Resource file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    ResourceFilesConfig,
    SyncSettings,
    ValidationError,
};
