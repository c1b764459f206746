// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module evaluation - turns a module's source into its exports

use crate::error::Result;
use crate::module_system::cache::ModuleId;
use crate::value::Value;

/// How a module's source should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Script module
    Script,
    /// JSON document
    Json,
}

/// A module that has been located and read, ready to evaluate
#[derive(Debug, Clone, Copy)]
pub struct ModuleSource<'a> {
    /// Canonical id of the module
    pub id: &'a ModuleId,
    /// File contents
    pub source: &'a str,
    /// How to interpret `source`
    pub kind: ModuleKind,
}

/// Runs a module body and produces its exports.
///
/// Called once per uncached load, so module-level side effects happen
/// exactly when the loader actually executes the module.
pub trait ModuleEvaluator {
    /// Evaluate `module` and return its exports
    fn evaluate(&self, module: &ModuleSource<'_>) -> Result<Value>;
}

impl<F> ModuleEvaluator for F
where
    F: Fn(&ModuleSource<'_>) -> Result<Value>,
{
    fn evaluate(&self, module: &ModuleSource<'_>) -> Result<Value> {
        self(module)
    }
}

/// Default evaluator.
///
/// JSON modules export the parsed document. Script modules export
/// `{ filename, source }`; hosts that embed an engine plug in their own
/// [`ModuleEvaluator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceEvaluator;

impl ModuleEvaluator for SourceEvaluator {
    fn evaluate(&self, module: &ModuleSource<'_>) -> Result<Value> {
        match module.kind {
            ModuleKind::Json => {
                let json: serde_json::Value = serde_json::from_str(module.source)?;
                Ok(Value::from(json))
            }
            ModuleKind::Script => Ok(Value::object([
                ("filename", Value::from(module.id.to_string())),
                ("source", Value::from(module.source)),
            ])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;

    #[test]
    fn test_json_module() {
        let id = ModuleId::from("/app/config.json");
        let module = ModuleSource {
            id: &id,
            source: r#"{ "port": 8080 }"#,
            kind: ModuleKind::Json,
        };

        let value = SourceEvaluator.evaluate(&module).unwrap();
        assert_eq!(value.get("port"), Some(&Value::Number(8080.0)));
    }

    #[test]
    fn test_invalid_json_module() {
        let id = ModuleId::from("/app/broken.json");
        let module = ModuleSource {
            id: &id,
            source: "{ port: ",
            kind: ModuleKind::Json,
        };

        let err = SourceEvaluator.evaluate(&module).unwrap_err();
        assert!(matches!(err, HostError::JsonParse(_)));
    }

    #[test]
    fn test_script_module() {
        let id = ModuleId::from("/app/index.js");
        let module = ModuleSource {
            id: &id,
            source: "module.exports = 1;",
            kind: ModuleKind::Script,
        };

        let value = SourceEvaluator.evaluate(&module).unwrap();
        assert_eq!(value.get("filename").and_then(Value::as_str), Some("/app/index.js"));
        assert_eq!(
            value.get("source").and_then(Value::as_str),
            Some("module.exports = 1;")
        );
    }
}
