// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration for backhoe.
//!
//! Read from `backhoe.json` in the project directory, then overridden by
//! `BACKHOE_*` environment variables:
//!
//! ```json
//! { "basePath": ".", "directories": ["services", "lib/jobs"] }
//! ```
//!
//! `BACKHOE_BASE_PATH=*` puts every module in scope;
//! `BACKHOE_NO_CACHE_DIRS=services,lib/jobs` replaces the directory list.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BackhoeError, Result};
use crate::scope::{canonicalize_existing, is_wildcard_base, NoCacheScope};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "backhoe.json";

/// Prefix of environment variables read by [`BackhoeConfig::load`]
pub const ENV_PREFIX: &str = "BACKHOE_";

/// No-cache configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackhoeConfig {
    /// Project root, or `*` for every module. Unset means every module.
    pub base_path: Option<PathBuf>,

    /// Directories under the base path whose modules are never kept cached
    pub directories: Vec<PathBuf>,
}

impl BackhoeConfig {
    /// Load configuration for the project at `project_dir`.
    ///
    /// A relative base path is taken relative to `project_dir` and
    /// canonicalized when it exists, so it lines up with resolved module ids.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        let mut config = if config_path.is_file() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.merge_env(std::env::vars());
        config.base_path = config
            .base_path
            .take()
            .map(|base| absolutize(project_dir, base));

        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BackhoeError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `BACKHOE_*` variables from `vars`. Unknown keys are skipped.
    pub fn merge_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                let config_key = config_key.to_lowercase().replace('_', "-");
                if let Err(err) = self.set(&config_key, &value) {
                    tracing::warn!("Ignoring {}: {}", key, err);
                }
            }
        }
    }

    /// Set a configuration value.
    ///
    /// Keys: `base-path`, and `no-cache-dirs` (alias `directories`), a comma
    /// separated list.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-path" => {
                let value = value.trim();
                self.base_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "no-cache-dirs" | "directories" => {
                self.directories = value
                    .split(',')
                    .map(str::trim)
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from)
                    .collect();
            }
            _ => {
                return Err(BackhoeError::Config(format!("unknown key '{}'", key)));
            }
        }
        Ok(())
    }

    /// Build the no-cache scope this configuration describes
    pub fn scope(&self) -> NoCacheScope {
        NoCacheScope::new(self.base_path.as_ref(), self.directories.iter().cloned())
    }
}

fn absolutize(project_dir: &Path, base: PathBuf) -> PathBuf {
    if is_wildcard_base(&base) {
        return base;
    }
    canonicalize_existing(project_dir.join(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backhoe_host::ModuleId;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_is_wildcard() {
        assert!(BackhoeConfig::default().scope().is_wildcard());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "basePath": "/project", "directories": ["services"] }"#).unwrap();

        let config = BackhoeConfig::from_file(&path).unwrap();

        assert_eq!(config.base_path, Some(PathBuf::from("/project")));
        assert!(config.scope().matches(&ModuleId::from("/project/services/a.js")));
        assert!(!config.scope().matches(&ModuleId::from("/project/models/a.js")));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            BackhoeConfig::from_file(&missing),
            Err(BackhoeError::ConfigFile { .. })
        ));

        let broken = dir.path().join(CONFIG_FILE);
        fs::write(&broken, "{ basePath").unwrap();
        assert!(matches!(
            BackhoeConfig::from_file(&broken),
            Err(BackhoeError::Json(_))
        ));
    }

    #[test]
    fn test_merge_env() {
        let mut config = BackhoeConfig::default();
        config.merge_env(env(&[
            ("BACKHOE_BASE_PATH", "/project"),
            ("BACKHOE_NO_CACHE_DIRS", "services, lib/jobs,,"),
            ("BACKHOE_UNKNOWN", "x"),
            ("HOME", "/root"),
        ]));

        assert_eq!(config.base_path, Some(PathBuf::from("/project")));
        assert_eq!(
            config.directories,
            vec![PathBuf::from("services"), PathBuf::from("lib/jobs")]
        );
    }

    #[test]
    fn test_wildcard_base_path() {
        let mut config = BackhoeConfig::default();
        config.set("base-path", "*").unwrap();
        config.set("directories", "services").unwrap();

        assert!(config.scope().is_wildcard());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = BackhoeConfig::default();
        assert!(matches!(
            config.set("colour", "blue"),
            Err(BackhoeError::Config(_))
        ));
    }

    #[test]
    fn test_absolutize_relative_base() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join("app")).unwrap();

        assert_eq!(absolutize(&root, PathBuf::from("app")), root.join("app"));
        assert_eq!(absolutize(&root, PathBuf::from("*")), PathBuf::from("*"));
        assert_eq!(absolutize(&root, PathBuf::from("")), PathBuf::from(""));
        assert_eq!(absolutize(&root, PathBuf::from("/abs")), PathBuf::from("/abs"));
    }

    #[test]
    fn test_load_empty_base_is_wildcard() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(
            root.join(CONFIG_FILE),
            r#"{ "basePath": "", "directories": ["services"] }"#,
        )
        .unwrap();

        let config = BackhoeConfig::load(&root).unwrap();

        assert!(config.scope().is_wildcard());
        assert!(config.scope().matches(&ModuleId::new(root.join("models/a.js"))));
    }

    #[test]
    fn test_load_resolves_relative_base() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(
            root.join(CONFIG_FILE),
            r#"{ "basePath": ".", "directories": ["services"] }"#,
        )
        .unwrap();

        let config = BackhoeConfig::load(&root).unwrap();

        assert_eq!(config.base_path, Some(root.clone()));
        assert!(config.scope().matches(&ModuleId::new(root.join("services/a.js"))));
    }
}
