// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CommonJS module system
//!
//! - Node.js resolution algorithm
//! - Module cache keyed by canonical path
//! - The [`Loader`] seam, with the native implementation
//! - `require()`, `require.resolve()` and `require.cache`

mod cache;
mod evaluator;
mod loader;
mod require;
mod resolver;

pub use cache::{CachedModule, ModuleCache, ModuleId};
pub use evaluator::{ModuleEvaluator, ModuleKind, ModuleSource, SourceEvaluator};
pub use loader::{Loader, NativeLoader};
pub use require::{require, require_cache, require_resolve};
pub use resolver::{ModuleResolver, ResolveResult, BUILTIN_MODULES, THIRD_PARTY_DIR};
