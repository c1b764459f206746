// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module path resolution (Node.js algorithm)

use crate::error::{HostError, Result};
use crate::module_system::cache::ModuleId;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Built-in module names
pub const BUILTIN_MODULES: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "crypto",
    "events",
    "fs",
    "http",
    "https",
    "module",
    "net",
    "os",
    "path",
    "process",
    "querystring",
    "stream",
    "string_decoder",
    "timers",
    "url",
    "util",
    "zlib",
];

/// Directory that third-party packages are installed into
pub const THIRD_PARTY_DIR: &str = "node_modules";

const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Result of module resolution
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveResult {
    /// Built-in module (fs, path, http, etc.)
    BuiltIn(String),
    /// File module (resolved path)
    File(ModuleId),
    /// JSON file
    Json(ModuleId),
    /// Native addon (.node file)
    Native(ModuleId),
}

impl ResolveResult {
    /// Canonical id of a file-backed module. Built-ins have none.
    pub fn id(&self) -> Option<&ModuleId> {
        match self {
            ResolveResult::BuiltIn(_) => None,
            ResolveResult::File(id) | ResolveResult::Json(id) | ResolveResult::Native(id) => {
                Some(id)
            }
        }
    }
}

/// Module resolver implementing the Node.js resolution algorithm
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    /// File extensions to try, in order
    extensions: Vec<String>,
}

impl ModuleResolver {
    /// Create a new module resolver
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Create a resolver that tries `extensions` (e.g. `".ts"`) in order
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| {
                    let e = e.into();
                    if e.starts_with('.') {
                        e
                    } else {
                        format!(".{}", e)
                    }
                })
                .collect(),
        }
    }

    /// Check if a module is a built-in
    pub fn is_builtin(&self, name: &str) -> bool {
        // Handle node: prefix
        let name = name.strip_prefix("node:").unwrap_or(name);
        BUILTIN_MODULES.contains(&name)
    }

    /// Resolve a module specifier relative to the module at `parent_path`
    pub fn resolve(&self, specifier: &str, parent_path: &Path) -> Result<ResolveResult> {
        if specifier.is_empty() {
            return Err(HostError::ModuleResolution {
                module: specifier.to_string(),
                reason: "empty module specifier".to_string(),
            });
        }

        // Handle node: prefix for built-ins
        let specifier = specifier.strip_prefix("node:").unwrap_or(specifier);

        if self.is_builtin(specifier) {
            return Ok(ResolveResult::BuiltIn(specifier.to_string()));
        }

        // Check if relative or absolute path
        if specifier == "."
            || specifier == ".."
            || specifier.starts_with("./")
            || specifier.starts_with("../")
            || specifier.starts_with('/')
            || (cfg!(windows) && specifier.chars().nth(1) == Some(':'))
        {
            return self.resolve_file(specifier, parent_path);
        }

        // Otherwise, resolve as node_modules package
        self.resolve_node_modules(specifier, parent_path)
    }

    /// Resolve a file path
    fn resolve_file(&self, specifier: &str, parent_path: &Path) -> Result<ResolveResult> {
        let parent_dir = parent_path.parent().unwrap_or(Path::new("."));
        let path = parent_dir.join(specifier);

        // "./dir/", "." and ".." only ever name directories
        let names_directory = specifier.ends_with('/')
            || specifier.ends_with("/.")
            || specifier.ends_with("/..")
            || specifier == "."
            || specifier == "..";
        if !names_directory {
            if let Some(found) = self.try_file(&path) {
                return self.categorize_file(&found);
            }
        }

        // Try as directory with index file
        if path.is_dir() {
            return self.resolve_directory(&path);
        }

        Err(HostError::ModuleNotFound(specifier.to_string()))
    }

    /// Try `path` as-is, then with each extension appended
    fn try_file(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() {
            return Some(path.to_path_buf());
        }

        let filename = path.file_name()?.to_string_lossy().to_string();
        self.extensions
            .iter()
            .map(|ext| path.with_file_name(format!("{}{}", filename, ext)))
            .find(|candidate| candidate.is_file())
    }

    /// Resolve a directory (look for package.json main or index.js)
    fn resolve_directory(&self, dir: &Path) -> Result<ResolveResult> {
        let package_json_path = dir.join("package.json");
        if package_json_path.is_file() {
            let content = std::fs::read_to_string(&package_json_path)?;
            let pkg: PackageJson = serde_json::from_str(&content)?;
            if let Some(main) = pkg.main {
                let main_path = dir.join(&main);
                if let Some(found) = self.try_file(&main_path) {
                    return self.categorize_file(&found);
                }
                if main_path.is_dir() {
                    return self.resolve_index(&main_path);
                }
            }
        }

        self.resolve_index(dir)
    }

    /// Try index files in a directory
    fn resolve_index(&self, dir: &Path) -> Result<ResolveResult> {
        for ext in &self.extensions {
            let index = dir.join(format!("index{}", ext));
            if index.is_file() {
                return self.categorize_file(&index);
            }
        }

        Err(HostError::ModuleNotFound(dir.display().to_string()))
    }

    /// Resolve a module from node_modules
    fn resolve_node_modules(&self, specifier: &str, parent_path: &Path) -> Result<ResolveResult> {
        let (package_name, subpath) = self.parse_package_specifier(specifier);

        // Walk up directory tree looking for node_modules
        let mut current = parent_path.parent();
        while let Some(dir) = current {
            let package_dir = dir.join(THIRD_PARTY_DIR).join(package_name);

            if package_dir.exists() {
                match subpath {
                    Some(sub) => {
                        let subpath_full = package_dir.join(sub);
                        if let Some(found) = self.try_file(&subpath_full) {
                            return self.categorize_file(&found);
                        }
                        if subpath_full.is_dir() {
                            return self.resolve_directory(&subpath_full);
                        }
                    }
                    None => return self.resolve_directory(&package_dir),
                }
            }

            current = dir.parent();
        }

        Err(HostError::ModuleNotFound(specifier.to_string()))
    }

    /// Parse a package specifier into name and optional subpath
    fn parse_package_specifier<'a>(&self, specifier: &'a str) -> (&'a str, Option<&'a str>) {
        if specifier.starts_with('@') {
            // Scoped package: @scope/name or @scope/name/subpath
            if let Some(slash_pos) = specifier[1..].find('/') {
                let after_scope = &specifier[slash_pos + 2..];
                if let Some(subpath_pos) = after_scope.find('/') {
                    let name_end = slash_pos + 2 + subpath_pos;
                    return (&specifier[..name_end], Some(&specifier[name_end + 1..]));
                }
            }
            (specifier, None)
        } else if let Some(slash_pos) = specifier.find('/') {
            (&specifier[..slash_pos], Some(&specifier[slash_pos + 1..]))
        } else {
            (specifier, None)
        }
    }

    /// Categorize a file by extension
    fn categorize_file(&self, path: &Path) -> Result<ResolveResult> {
        let id = ModuleId::new(path.canonicalize()?);

        match id.path().extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(ResolveResult::Json(id)),
            Some("node") => Ok(ResolveResult::Native(id)),
            _ => Ok(ResolveResult::File(id)),
        }
    }
}

impl Default for ModuleResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal package.json structure for resolution
#[derive(Debug, Deserialize)]
struct PackageJson {
    main: Option<String>,
}
