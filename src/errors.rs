// src/errors.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Initialization error: {component}: {message}")]
    ComponentInitError {
        component: String,
        message: String,
    },

    #[error("Invalid item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },

    #[error("Duplicate item id '{id}'")]
    DuplicateItem { id: String },

    #[error("Unsupported fixture format for {}: expected .json, .yaml or .yml", .0.display())]
    UnsupportedFixture(PathBuf),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML deserialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
