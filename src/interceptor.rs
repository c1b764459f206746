// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The intercepting loader

use crate::context::Backhoe;
use crate::scope::{is_third_party, NoCacheScope};
use backhoe_host::{Exports, Loader, ModuleCache, ModuleId, ResolveResult, Result};
use std::path::Path;

/// A [`Loader`] that wraps the host's original loader.
///
/// Every load is first performed by the original loader, so module bodies
/// run exactly when they would without interception. For local requests the
/// result may then be replaced by a registered mock, and in-scope modules are
/// tracked so [`clear_cache`](InterceptingLoader::clear_cache) can evict them.
pub struct InterceptingLoader<L> {
    /// The unmodified loader, kept for the whole lifetime of the interceptor
    original: L,
    context: Backhoe,
}

impl<L: Loader> InterceptingLoader<L> {
    /// Start intercepting loads made through `original`
    pub fn install(original: L, context: Backhoe) -> Self {
        tracing::debug!("Installing loader interceptor with scope {:?}", context.scope());
        Self { original, context }
    }

    /// Stop intercepting, handing back the original loader and the context.
    ///
    /// Whatever the original loader cached stays cached.
    pub fn uninstall(self) -> (L, Backhoe) {
        tracing::debug!("Uninstalling loader interceptor");
        (self.original, self.context)
    }

    /// The wrapped loader
    pub fn original(&self) -> &L {
        &self.original
    }

    /// Interception state
    pub fn context(&self) -> &Backhoe {
        &self.context
    }

    /// Mutable interception state
    pub fn context_mut(&mut self) -> &mut Backhoe {
        &mut self.context
    }

    /// Return `substitute` whenever a local load resolves to `id`
    pub fn mock(&mut self, id: impl Into<ModuleId>, substitute: impl Into<Exports>) {
        self.context.mock(id, substitute);
    }

    /// Replace the no-cache scope
    pub fn no_cache(&mut self, scope: NoCacheScope) {
        self.context.no_cache(scope);
    }

    /// Modules currently tracked for eviction, oldest first
    pub fn tracked(&self) -> impl Iterator<Item = &ModuleId> {
        self.context.tracked().iter()
    }

    pub(crate) fn evict(&self, id: &ModuleId) {
        if self.original.cache().delete(id).is_some() {
            tracing::debug!("Evicted {} from the module cache", id);
        }
    }
}

/// Whether `specifier` is a local reference (`./x`, `../x`).
///
/// Only local requests are mocked or tracked; package names pass through.
pub fn is_local_request(specifier: &str) -> bool {
    specifier.starts_with('.')
}

impl<L: Loader> Loader for InterceptingLoader<L> {
    fn load(&mut self, specifier: &str, parent: &Path, is_main: bool) -> Result<Exports> {
        let mut exports = self.original.load(specifier, parent, is_main)?;

        if !is_local_request(specifier) {
            tracing::trace!("Passing through '{}'", specifier);
            return Ok(exports);
        }

        let resolved = self.original.resolve(specifier, parent)?;
        let Some(id) = resolved.id() else {
            return Ok(exports);
        };

        if is_third_party(id) {
            tracing::trace!("Leaving third-party module {} alone", id);
            return Ok(exports);
        }

        if let Some(mock) = self.context.get_mock(id) {
            tracing::debug!("Substituting mock for {}", id);
            exports = mock;
        }

        if self.context.scope().matches(id) && self.context.tracked_mut().track(id.clone()) {
            tracing::debug!("Tracking {} for cache eviction", id);
        }

        Ok(exports)
    }

    fn resolve(&self, specifier: &str, parent: &Path) -> Result<ResolveResult> {
        self.original.resolve(specifier, parent)
    }

    fn cache(&self) -> &ModuleCache {
        self.original.cache()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_request() {
        assert!(is_local_request("./a"));
        assert!(is_local_request("../lib/a.js"));
        assert!(is_local_request(".."));
        assert!(!is_local_request("lodash"));
        assert!(!is_local_request("node:fs"));
        assert!(!is_local_request("/abs/path.js"));
        assert!(!is_local_request("@scope/pkg"));
    }
}
