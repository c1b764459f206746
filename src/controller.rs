// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Cache and mock clearing

use crate::interceptor::InterceptingLoader;
use backhoe_host::{Loader, ModuleId};

impl<L: Loader> InterceptingLoader<L> {
    /// Evict modules from the module cache so their next load runs them again.
    ///
    /// With `Some(id)` only that module is evicted, tracked or not, and it is
    /// no longer tracked afterwards. With `None` every tracked module is
    /// evicted in the order it was first tracked and the tracked set is
    /// emptied. Modules that are not cached are skipped silently.
    pub fn clear_cache(&mut self, id: Option<&ModuleId>) {
        match id {
            Some(id) => {
                self.evict(id);
                self.context_mut().tracked_mut().untrack(id);
            }
            None => {
                let tracked = self.context_mut().tracked_mut().take_all();
                tracing::debug!("Clearing {} tracked modules", tracked.len());
                for id in &tracked {
                    self.evict(id);
                }
            }
        }
    }

    /// Drop every registered mock
    pub fn clear_mocks(&mut self) {
        self.context_mut().mocks_mut().clear();
    }

    /// Clear the tracked cache entries, then the mocks
    pub fn clear(&mut self) {
        self.clear_cache(None);
        self.clear_mocks();
    }
}
