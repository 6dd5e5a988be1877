//! Error types for devstack

use thiserror::Error;

/// Result type for devstack operations
pub type Result<T> = std::result::Result<T, DevstackError>;

/// Devstack error types
#[derive(Error, Debug)]
pub enum DevstackError {
    #[error("Unknown service: {0}. Run 'devstack list' to see available services")]
    UnknownService(String),

    #[error("Unknown profile: {0}. Run 'devstack list --profiles' to see available profiles")]
    UnknownProfile(String),

    #[error("Invalid port specification: {0} (expected format: service:port)")]
    InvalidPortSpec(String),

    #[error("Service not configured: {0}")]
    ServiceNotConfigured(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Docker error: {0}")]
    ExternalTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
