// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for backhoe

use backhoe_host::HostError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for backhoe operations
pub type Result<T> = std::result::Result<T, BackhoeError>;

/// Errors that can occur while configuring or driving backhoe.
///
/// Loads themselves return [`HostError`] untouched: the interceptor never
/// rewraps what the host raised.
#[derive(Debug, Error)]
pub enum BackhoeError {
    /// Error raised by the module host
    #[error(transparent)]
    Host(#[from] HostError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    ConfigFile {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
