use thiserror::Error;

/// Errors for the fallible outer surfaces of the tutorial (config and saved
/// progress). The step machine itself never fails; see `tutorial::controller`.

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load tutorial configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save tutorial configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine user config directory")]
    NoConfigDir,
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to load tutorial progress from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save tutorial progress to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
