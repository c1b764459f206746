// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module cache for require()

use crate::value::Exports;
use dashmap::DashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical identity of a loadable module: its absolute, resolved path.
///
/// Two specifiers that reach the same file resolve to the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(PathBuf);

impl ModuleId {
    /// Wrap an already-canonical path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The path behind this id
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for ModuleId {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for ModuleId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for ModuleId {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl From<&str> for ModuleId {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

impl From<&ModuleId> for ModuleId {
    fn from(id: &ModuleId) -> Self {
        id.clone()
    }
}

/// Cached module entry
#[derive(Debug, Clone)]
pub struct CachedModule {
    /// The module's canonical id
    pub id: ModuleId,
    /// The module's exports
    pub exports: Exports,
    /// Child modules required by this module
    pub children: Vec<ModuleId>,
    /// Location of the module that first required this one
    pub parent: Option<PathBuf>,
}

/// Thread-safe module cache
pub struct ModuleCache {
    /// Cache mapping canonical ids to cached modules
    cache: DashMap<ModuleId, CachedModule>,
}

impl ModuleCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Get a cached module by id
    pub fn get(&self, id: &ModuleId) -> Option<CachedModule> {
        self.cache.get(id).map(|entry| entry.clone())
    }

    /// Check if a module is cached
    pub fn has(&self, id: &ModuleId) -> bool {
        self.cache.contains_key(id)
    }

    /// Add a module to the cache
    pub fn set(&self, id: ModuleId, module: CachedModule) {
        self.cache.insert(id, module);
    }

    /// Remove a module from the cache.
    ///
    /// Removing a module that is not cached returns `None`.
    pub fn delete(&self, id: &ModuleId) -> Option<CachedModule> {
        self.cache.remove(id).map(|(_, v)| v)
    }

    /// Record `child` under `parent`, if the parent is cached
    pub fn add_child(&self, parent: &ModuleId, child: ModuleId) {
        if let Some(mut entry) = self.cache.get_mut(parent) {
            if !entry.children.contains(&child) {
                entry.children.push(child);
            }
        }
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Get all cached module ids
    pub fn keys(&self) -> Vec<ModuleId> {
        self.cache.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Get the number of cached modules
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for ModuleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::sync::Arc;

    fn entry(id: &ModuleId) -> CachedModule {
        CachedModule {
            id: id.clone(),
            exports: Arc::new(Value::Null),
            children: Vec::new(),
            parent: None,
        }
    }

    #[test]
    fn test_delete_missing_is_none() {
        let cache = ModuleCache::new();
        assert!(cache.delete(&ModuleId::from("/app/missing.js")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_add_child_once() {
        let cache = ModuleCache::new();
        let parent = ModuleId::from("/app/main.js");
        let child = ModuleId::from("/app/lib.js");
        cache.set(parent.clone(), entry(&parent));

        cache.add_child(&parent, child.clone());
        cache.add_child(&parent, child.clone());

        let cached = cache.get(&parent).unwrap();
        assert_eq!(cached.children, vec![child]);
    }
}
