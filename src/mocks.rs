// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Mock registry

use backhoe_host::{Exports, ModuleId};
use std::collections::HashMap;

/// Substitute exports keyed by canonical module id.
///
/// There is deliberately no per-module removal: mocks are dropped all at
/// once with [`MockRegistry::clear`].
#[derive(Debug, Default)]
pub struct MockRegistry {
    mocks: HashMap<ModuleId, Exports>,
}

impl MockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `substitute` for `id`, replacing any earlier mock
    pub fn mock(&mut self, id: impl Into<ModuleId>, substitute: impl Into<Exports>) {
        self.mocks.insert(id.into(), substitute.into());
    }

    /// Whether a mock is registered for `id`
    pub fn is_mocked(&self, id: &ModuleId) -> bool {
        self.mocks.contains_key(id)
    }

    /// The mock registered for `id`
    pub fn get(&self, id: &ModuleId) -> Option<Exports> {
        self.mocks.get(id).cloned()
    }

    /// Drop every mock
    pub fn clear(&mut self) {
        self.mocks.clear();
    }

    /// Number of registered mocks
    pub fn len(&self) -> usize {
        self.mocks.len()
    }

    /// Whether no mocks are registered
    pub fn is_empty(&self) -> bool {
        self.mocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backhoe_host::Value;
    use std::sync::Arc;

    #[test]
    fn test_last_write_wins() {
        let mut registry = MockRegistry::new();
        let id = ModuleId::from("/project/services/a.js");

        registry.mock(&id, Value::from("first"));
        registry.mock(&id, Value::from("second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&id).as_deref(), Some(&Value::from("second")));
    }

    #[test]
    fn test_get_returns_registered_handle() {
        let mut registry = MockRegistry::new();
        let id = ModuleId::from("/project/services/a.js");
        let fake: Exports = Arc::new(Value::object([("fake", Value::from(true))]));

        registry.mock(id.clone(), fake.clone());

        assert!(registry.is_mocked(&id));
        assert!(Arc::ptr_eq(&registry.get(&id).unwrap(), &fake));
        assert!(!registry.is_mocked(&ModuleId::from("/project/services/b.js")));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut registry = MockRegistry::new();
        registry.mock("/project/a.js", Value::Null);

        registry.clear();
        assert!(registry.is_empty());
        registry.clear();
        assert!(registry.is_empty());
    }
}
