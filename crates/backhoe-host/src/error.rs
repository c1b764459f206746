// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the module host

use thiserror::Error;

/// Result type for module host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors raised while resolving, reading or evaluating modules
#[derive(Debug, Error)]
pub enum HostError {
    /// Module not found
    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),

    /// Module resolution error
    #[error("Error resolving module '{module}': {reason}")]
    ModuleResolution {
        /// Module specifier
        module: String,
        /// Reason for failure
        reason: String,
    },

    /// The module body failed while it was being evaluated
    #[error("Error evaluating module '{module}': {reason}")]
    Evaluation {
        /// Module path
        module: String,
        /// Reason for failure
        reason: String,
    },

    /// File system error
    #[error("File system error: {0}")]
    Fs(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HostError {
    /// Create an evaluation error for `module`
    pub fn evaluation(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from resolving a specifier
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::ModuleNotFound(_) | Self::ModuleResolution { .. })
    }
}
