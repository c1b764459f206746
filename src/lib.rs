// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # backhoe
//!
//! Cache busting and module mocking for CommonJS-style module loaders.
//!
//! backhoe wraps a host [`Loader`] in an [`InterceptingLoader`] that:
//!
//! - always performs the real load first, so module bodies run exactly as
//!   they would without interception
//! - substitutes registered mocks for local modules, matched by canonical id
//! - tracks local modules inside the configured [`NoCacheScope`] so they can
//!   be evicted from the module cache between test cases
//!
//! Third-party modules (anything under `node_modules`) are never mocked,
//! tracked or evicted.
//!
//! **Do not use this in production.** It exists to give test suites fresh
//! module state and injectable fakes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backhoe::{Backhoe, NoCacheScope};
//! use backhoe_host::{Loader, NativeLoader, Value};
//!
//! let scope = NoCacheScope::directories("/project", ["services"]);
//! let mut loader = Backhoe::new(scope).install(NativeLoader::new());
//!
//! loader.mock("/project/services/mailer.js", Value::object([("sent", Value::from(false))]));
//! let mailer = loader.load("./mailer", Path::new("/project/services/signup.js"), false)?;
//!
//! // Between test cases
//! loader.clear();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
mod controller;
pub mod error;
pub mod interceptor;
pub mod mocks;
pub mod scope;
pub mod tracked;

// Re-exports
pub use backhoe_host::{Exports, Loader, ModuleId, NativeLoader, Value};
pub use config::BackhoeConfig;
pub use context::Backhoe;
pub use error::{BackhoeError, Result};
pub use interceptor::{is_local_request, InterceptingLoader};
pub use mocks::MockRegistry;
pub use scope::{is_third_party, NoCacheScope, WILDCARD};
pub use tracked::TrackedModules;

/// Version of backhoe
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
