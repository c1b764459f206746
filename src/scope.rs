// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! No-cache scope: which modules are eligible for forced eviction.

use backhoe_host::{ModuleId, THIRD_PARTY_DIR};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Base path value meaning "every module"
pub const WILDCARD: &str = "*";

/// The set of modules that should not stay cached between test cases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoCacheScope {
    /// Every local module is in scope
    #[default]
    Everything,
    /// Modules under `base` whose project-relative path starts with one of
    /// `directories`
    Directories {
        /// Project root
        base: PathBuf,
        /// Sub-directory prefixes, relative to `base`
        directories: Vec<PathBuf>,
    },
}

impl NoCacheScope {
    /// Build a scope from an optional base path and directory prefixes.
    ///
    /// A missing or empty base path, or [`WILDCARD`], puts everything in
    /// scope and ignores `directories`.
    pub fn new<B, I, D>(base: Option<B>, directories: I) -> Self
    where
        B: AsRef<Path>,
        I: IntoIterator<Item = D>,
        D: Into<PathBuf>,
    {
        match base {
            Some(base) if !is_wildcard_base(base.as_ref()) => {
                Self::directories(base.as_ref(), directories)
            }
            _ => NoCacheScope::Everything,
        }
    }

    /// Restrict eviction to `directories` under `base`.
    ///
    /// An existing `base` is canonicalized so it lines up with resolved
    /// module ids even when the project root sits behind a symlink.
    pub fn directories<I, D>(base: impl Into<PathBuf>, directories: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<PathBuf>,
    {
        NoCacheScope::Directories {
            base: canonicalize_existing(base.into()),
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this scope covers every module
    pub fn is_wildcard(&self) -> bool {
        matches!(self, NoCacheScope::Everything)
    }

    /// Whether `id` is in scope for forced eviction.
    ///
    /// Third-party modules never match, not even under the wildcard. A module
    /// outside `base` never matches. Directory prefixes compare whole path
    /// components, so `services` covers `services/x.js` but not
    /// `services2/x.js`.
    pub fn matches(&self, id: &ModuleId) -> bool {
        if is_third_party(id) {
            return false;
        }

        match self {
            NoCacheScope::Everything => true,
            NoCacheScope::Directories { base, directories } => {
                match id.path().strip_prefix(base) {
                    Ok(relative) => directories
                        .iter()
                        .any(|dir| relative.starts_with(trim_current_dir(dir))),
                    Err(_) => false,
                }
            }
        }
    }
}

/// Whether `id` lives inside a third-party package directory
pub fn is_third_party(id: &ModuleId) -> bool {
    id.path()
        .components()
        .any(|c| c == Component::Normal(OsStr::new(THIRD_PARTY_DIR)))
}

/// Whether `base` means "every module": empty or [`WILDCARD`]
pub(crate) fn is_wildcard_base(base: &Path) -> bool {
    let base = base.to_string_lossy();
    let base = base.trim();
    base.is_empty() || base == WILDCARD
}

/// `path` with symlinks resolved, or unchanged if it does not exist
pub(crate) fn canonicalize_existing(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap_or(path)
}

/// `./services` and `services` name the same prefix
fn trim_current_dir(dir: &Path) -> &Path {
    dir.strip_prefix(".").unwrap_or(dir)
}
