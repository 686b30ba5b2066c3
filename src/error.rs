/// Error types for simulation runs and plan files

use std::path::PathBuf;

use thiserror::Error;

/// Configuration problems that reject a run before any sampling happens.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("trial count must be at least 1")]
    NoTrials,
    #[error("confidence level must be between 0 and 100 (got {0})")]
    ConfidenceOutOfRange(f64),
    #[error("profile '{name}' has an invalid percentage {value}")]
    InvalidPercentage { name: String, value: f64 },
    #[error("profile '{name}' must have a positive consumption multiplier (got {value})")]
    InvalidMultiplier { name: String, value: f64 },
    #[error("{attendees} attendees but no profiles to distribute them over")]
    NoProfiles { attendees: u32 },
    #[error("item id '{0}' appears more than once")]
    DuplicateItem(String),
    #[error("{0} relationship(s) given but the item list is empty")]
    RelationshipsWithoutItems(usize),
    #[error("relationship {primary} -> {secondary} must have a positive ratio (got {ratio})")]
    InvalidRatio {
        primary: String,
        secondary: String,
        ratio: f64,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("invalid simulation config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("simulation cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to access plan file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed plan file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
