//! Core error types for pacekeeper-core.
//!
//! Evaluation itself never fails; these errors cover the edges of the
//! library: configuration I/O, input parsing and goal validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pacekeeper-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Metric source failed to produce a snapshot
    #[error("Metric source '{source_name}' failed: {message}")]
    MetricSource {
        source_name: String,
        message: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home/config directory could not be prepared
    #[error("Config directory unavailable at {path}: {message}")]
    DirectoryUnavailable { path: PathBuf, message: String },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the config tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Goal target must be strictly positive and finite
    #[error("Invalid target {target} for {metric} goal: must be a positive number")]
    InvalidTarget { metric: String, target: f64 },

    /// Daily step goal must be at least one step
    #[error("Daily step goal must be greater than zero")]
    ZeroDailyGoal,

    /// Unknown metric name
    #[error("Unknown metric type: {0}")]
    UnknownMetric(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
