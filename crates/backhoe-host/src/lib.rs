// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # backhoe-host
//!
//! A small CommonJS-style module host: the runtime whose loader `backhoe`
//! intercepts.
//!
//! - Node.js module resolution (relative files, extensions, `index.*`,
//!   `package.json` `main`, `node_modules` lookup, built-ins)
//! - A module cache keyed by canonical [`ModuleId`]
//! - The [`Loader`] trait and its [`NativeLoader`] implementation
//! - `require()` helpers that work against any [`Loader`]
//!
//! ```rust,ignore
//! use backhoe_host::{require, NativeLoader};
//! use std::path::Path;
//!
//! let mut loader = NativeLoader::new();
//! let config = require(&mut loader, "./config.json", Path::new("/app/main.js"))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod module_system;
pub mod value;

// Re-exports
pub use error::{HostError, Result};
pub use module_system::{
    require, require_cache, require_resolve, CachedModule, Loader, ModuleCache, ModuleEvaluator,
    ModuleId, ModuleKind, ModuleResolver, ModuleSource, NativeLoader, ResolveResult,
    SourceEvaluator, BUILTIN_MODULES, THIRD_PARTY_DIR,
};
pub use value::{Exports, Value};
