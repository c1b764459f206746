// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interception state owned by the test harness

use crate::config::BackhoeConfig;
use crate::interceptor::InterceptingLoader;
use crate::mocks::MockRegistry;
use crate::scope::{canonicalize_existing, NoCacheScope};
use crate::tracked::TrackedModules;
use backhoe_host::{Exports, Loader, ModuleId};

/// Everything the interceptor consults on each load: the no-cache scope,
/// the registered mocks and the modules tracked for eviction.
#[derive(Debug, Default)]
pub struct Backhoe {
    scope: NoCacheScope,
    mocks: MockRegistry,
    tracked: TrackedModules,
}

impl Backhoe {
    /// Create a context with the given no-cache scope
    pub fn new(scope: NoCacheScope) -> Self {
        Self {
            scope,
            mocks: MockRegistry::new(),
            tracked: TrackedModules::new(),
        }
    }

    /// Create a context from loaded configuration
    pub fn from_config(config: &BackhoeConfig) -> Self {
        Self::new(config.scope())
    }

    /// Replace the no-cache scope. The previous scope is discarded, not merged.
    ///
    /// Modules already tracked stay tracked.
    pub fn no_cache(&mut self, scope: NoCacheScope) {
        tracing::debug!("No-cache scope set to {:?}", scope);
        self.scope = scope;
    }

    /// The active no-cache scope
    pub fn scope(&self) -> &NoCacheScope {
        &self.scope
    }

    /// Return `substitute` whenever a load resolves to `id`.
    ///
    /// An `id` that exists on disk is canonicalized first, matching how loads
    /// resolve.
    pub fn mock(&mut self, id: impl Into<ModuleId>, substitute: impl Into<Exports>) {
        let id = id.into();
        let id = ModuleId::new(canonicalize_existing(id.path().to_path_buf()));
        tracing::debug!("Mocking {}", id);
        self.mocks.mock(id, substitute);
    }

    /// Whether a mock is registered for `id`
    pub fn is_mocked(&self, id: &ModuleId) -> bool {
        self.mocks.is_mocked(id)
    }

    /// The mock registered for `id`
    pub fn get_mock(&self, id: &ModuleId) -> Option<Exports> {
        self.mocks.get(id)
    }

    /// Registered mocks
    pub fn mocks(&self) -> &MockRegistry {
        &self.mocks
    }

    /// Modules tracked for eviction
    pub fn tracked(&self) -> &TrackedModules {
        &self.tracked
    }

    pub(crate) fn mocks_mut(&mut self) -> &mut MockRegistry {
        &mut self.mocks
    }

    pub(crate) fn tracked_mut(&mut self) -> &mut TrackedModules {
        &mut self.tracked
    }

    /// Wrap `loader` so that loads go through this context
    pub fn install<L: Loader>(self, loader: L) -> InterceptingLoader<L> {
        InterceptingLoader::install(loader, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backhoe_host::Value;

    #[test]
    fn test_no_cache_replaces_scope() {
        let mut backhoe = Backhoe::new(NoCacheScope::directories("/project", ["services"]));

        backhoe.no_cache(NoCacheScope::directories("/project", ["models"]));

        assert_eq!(
            backhoe.scope(),
            &NoCacheScope::directories("/project", ["models"])
        );
        assert!(!backhoe.scope().matches(&ModuleId::from("/project/services/a.js")));
    }

    #[test]
    fn test_default_scope_is_wildcard() {
        assert!(Backhoe::default().scope().is_wildcard());
    }

    #[test]
    fn test_mock_lookup() {
        let mut backhoe = Backhoe::default();
        let id = ModuleId::from("/project/db.js");

        backhoe.mock(&id, Value::from("fake db"));

        assert!(backhoe.is_mocked(&id));
        assert_eq!(backhoe.get_mock(&id).as_deref(), Some(&Value::from("fake db")));
        assert_eq!(backhoe.mocks().len(), 1);
    }
}
