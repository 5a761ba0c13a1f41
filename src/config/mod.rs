/// Settings file loading and environment overrides
pub mod settings;

/// Store construction from settings
pub mod storage;

pub use settings::Settings;
