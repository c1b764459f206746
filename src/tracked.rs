// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Modules eligible for forced cache eviction

use backhoe_host::ModuleId;

/// Insertion-ordered, duplicate-free set of module ids
#[derive(Debug, Clone, Default)]
pub struct TrackedModules {
    modules: Vec<ModuleId>,
}

impl TrackedModules {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `id`. Returns false if it was already tracked.
    pub fn track(&mut self, id: ModuleId) -> bool {
        if self.modules.contains(&id) {
            return false;
        }
        self.modules.push(id);
        true
    }

    /// Whether `id` is tracked
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains(id)
    }

    /// Stop tracking `id`. Returns false if it was not tracked.
    pub fn untrack(&mut self, id: &ModuleId) -> bool {
        match self.modules.iter().position(|m| m == id) {
            Some(index) => {
                self.modules.remove(index);
                true
            }
            None => false,
        }
    }

    /// Tracked ids in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.iter()
    }

    /// Remove and return every tracked id, oldest first
    pub fn take_all(&mut self) -> Vec<ModuleId> {
        std::mem::take(&mut self.modules)
    }

    /// Number of tracked modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut tracked = TrackedModules::new();
        let id = ModuleId::from("/project/services/a.js");

        assert!(tracked.track(id.clone()));
        for _ in 0..5 {
            assert!(!tracked.track(id.clone()));
        }

        assert_eq!(tracked.len(), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut tracked = TrackedModules::new();
        for path in ["/p/c.js", "/p/a.js", "/p/b.js", "/p/a.js"] {
            tracked.track(ModuleId::from(path));
        }

        let order: Vec<String> = tracked.iter().map(ToString::to_string).collect();
        assert_eq!(order, ["/p/c.js", "/p/a.js", "/p/b.js"]);

        let drained = tracked.take_all();
        assert_eq!(drained.len(), 3);
        assert!(tracked.is_empty());
    }

    #[test]
    fn test_untrack() {
        let mut tracked = TrackedModules::new();
        let a = ModuleId::from("/p/a.js");
        let b = ModuleId::from("/p/b.js");
        tracked.track(a.clone());
        tracked.track(b.clone());

        assert!(tracked.untrack(&a));
        assert!(!tracked.untrack(&a));
        assert!(!tracked.contains(&a));
        assert!(tracked.contains(&b));
    }
}
