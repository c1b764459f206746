// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CommonJS require() implementation

use crate::error::Result;
use crate::module_system::loader::Loader;
use crate::module_system::resolver::ResolveResult;
use crate::value::{Exports, Value};
use std::path::Path;

/// The require() function for CommonJS modules.
///
/// Goes through whichever [`Loader`] the caller hands in.
pub fn require(loader: &mut dyn Loader, specifier: &str, parent_path: &Path) -> Result<Exports> {
    loader.load(specifier, parent_path, false)
}

/// require.resolve() - get the resolved path without loading
pub fn require_resolve(loader: &dyn Loader, specifier: &str, parent_path: &Path) -> Result<String> {
    match loader.resolve(specifier, parent_path)? {
        ResolveResult::BuiltIn(name) => Ok(name),
        ResolveResult::File(id) | ResolveResult::Json(id) | ResolveResult::Native(id) => {
            Ok(id.to_string())
        }
    }
}

/// require.cache - snapshot of the module cache, keyed by path
pub fn require_cache(loader: &dyn Loader) -> Value {
    let cache = loader.cache();

    Value::Object(
        cache
            .keys()
            .into_iter()
            .filter_map(|id| {
                cache
                    .get(&id)
                    .map(|module| (id.to_string(), (*module.exports).clone()))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_system::loader::NativeLoader;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_require_and_cache_snapshot() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("answer.json"), "42").unwrap();
        let parent = root.join("main.js");

        let mut loader = NativeLoader::new();
        let answer = require(&mut loader, "./answer", &parent).unwrap();
        assert_eq!(*answer, Value::Number(42.0));

        let resolved = require_resolve(&loader, "./answer", &parent).unwrap();
        let expected = root.join("answer.json").display().to_string();
        assert_eq!(resolved, expected);

        let snapshot = require_cache(&loader);
        assert_eq!(snapshot.get(&expected), Some(&Value::Number(42.0)));
        assert_eq!(require_resolve(&loader, "path", &parent).unwrap(), "path");
    }
}
