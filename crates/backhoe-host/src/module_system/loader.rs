// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module loader - reads and evaluates modules

use crate::error::{HostError, Result};
use crate::module_system::cache::{CachedModule, ModuleCache, ModuleId};
use crate::module_system::evaluator::{ModuleEvaluator, ModuleKind, ModuleSource, SourceEvaluator};
use crate::module_system::resolver::{ModuleResolver, ResolveResult};
use crate::value::{Exports, Value};
use std::path::Path;
use std::sync::Arc;

/// The module-loading entry point of the host.
///
/// Everything that needs a module goes through a `Loader`, so a test
/// harness can hand out a wrapping implementation instead of the native one.
pub trait Loader {
    /// Load the module `specifier` on behalf of the module at `parent`.
    ///
    /// `is_main` marks the program's entry module.
    fn load(&mut self, specifier: &str, parent: &Path, is_main: bool) -> Result<Exports>;

    /// Resolve `specifier` without loading it
    fn resolve(&self, specifier: &str, parent: &Path) -> Result<ResolveResult>;

    /// The module cache this loader serves hits from
    fn cache(&self) -> &ModuleCache;
}

impl<L: Loader + ?Sized> Loader for Box<L> {
    fn load(&mut self, specifier: &str, parent: &Path, is_main: bool) -> Result<Exports> {
        (**self).load(specifier, parent, is_main)
    }

    fn resolve(&self, specifier: &str, parent: &Path) -> Result<ResolveResult> {
        (**self).resolve(specifier, parent)
    }

    fn cache(&self) -> &ModuleCache {
        (**self).cache()
    }
}

/// The host's own loader
pub struct NativeLoader {
    /// Module resolver
    resolver: ModuleResolver,
    /// Module cache
    cache: ModuleCache,
    /// Runs module bodies
    evaluator: Box<dyn ModuleEvaluator>,
    /// The entry module, once loaded
    main: Option<ModuleId>,
}

impl NativeLoader {
    /// Create a new module loader
    pub fn new() -> Self {
        Self::with_parts(ModuleResolver::new(), SourceEvaluator)
    }

    /// Create a loader from a resolver and an evaluator
    pub fn with_parts(resolver: ModuleResolver, evaluator: impl ModuleEvaluator + 'static) -> Self {
        Self {
            resolver,
            cache: ModuleCache::new(),
            evaluator: Box::new(evaluator),
            main: None,
        }
    }

    /// Create a loader with the default resolver and a custom evaluator
    pub fn with_evaluator(evaluator: impl ModuleEvaluator + 'static) -> Self {
        Self::with_parts(ModuleResolver::new(), evaluator)
    }

    /// The entry module, if one has been loaded
    pub fn main(&self) -> Option<&ModuleId> {
        self.main.as_ref()
    }

    /// Check if a module is a built-in
    pub fn is_builtin(&self, name: &str) -> bool {
        self.resolver.is_builtin(name)
    }

    /// Load a built-in module
    fn load_builtin(&self, name: &str) -> Exports {
        // Built-in modules are registered separately
        // Return a marker that the runtime will resolve
        Arc::new(Value::String(format!("__builtin__:{}", name)))
    }

    /// Load a file-backed module, serving it from the cache when possible
    fn load_file(
        &mut self,
        id: ModuleId,
        kind: ModuleKind,
        parent: &Path,
        is_main: bool,
    ) -> Result<Exports> {
        let parent_id = ModuleId::from(parent);

        if let Some(cached) = self.cache.get(&id) {
            tracing::trace!("Cache hit for {}", id);
            self.cache.add_child(&parent_id, id.clone());
            if is_main {
                self.main = Some(id);
            }
            return Ok(cached.exports);
        }

        let source = std::fs::read_to_string(id.path())?;
        let value = self.evaluator.evaluate(&ModuleSource {
            id: &id,
            source: &source,
            kind,
        })?;
        let exports: Exports = Arc::new(value);

        self.cache.set(
            id.clone(),
            CachedModule {
                id: id.clone(),
                exports: exports.clone(),
                children: Vec::new(),
                parent: Some(parent.to_path_buf()),
            },
        );
        self.cache.add_child(&parent_id, id.clone());
        tracing::debug!("Loaded module {}", id);

        if is_main {
            self.main = Some(id);
        }

        Ok(exports)
    }
}

impl Loader for NativeLoader {
    fn load(&mut self, specifier: &str, parent: &Path, is_main: bool) -> Result<Exports> {
        match self.resolver.resolve(specifier, parent)? {
            ResolveResult::BuiltIn(name) => Ok(self.load_builtin(&name)),
            ResolveResult::File(id) => self.load_file(id, ModuleKind::Script, parent, is_main),
            ResolveResult::Json(id) => self.load_file(id, ModuleKind::Json, parent, is_main),
            ResolveResult::Native(id) => Err(HostError::ModuleResolution {
                module: id.to_string(),
                reason: "Native addons (.node) are not supported".to_string(),
            }),
        }
    }

    fn resolve(&self, specifier: &str, parent: &Path) -> Result<ResolveResult> {
        self.resolver.resolve(specifier, parent)
    }

    fn cache(&self) -> &ModuleCache {
        &self.cache
    }
}

impl Default for NativeLoader {
    fn default() -> Self {
        Self::new()
    }
}
