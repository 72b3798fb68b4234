//! The parsed configuration document and its module map.
//!
//! A [`ConfigDocument`] wraps the interpolation-resolved value tree of one
//! YAML file. The only structure the engine relies on is the optional
//! top-level `modules` mapping: each entry is a named graph node carrying a
//! `cls` type tag and a `config` payload. The payload is either an inline
//! mapping, or a string naming another YAML file relative to the document.
//!
//! Two reserved module names, [`RESERVED_MODULES`] (`entry` and `exit`), are
//! structurally different from ordinary nodes and are never treated as
//! reference sources. Modules tagged [`LAZY_CLS`] (`ComposableModel`) keep
//! their `config` reference unexpanded so a client can drill into them later
//! via [`fetch_subgraph`](crate::subgraph::fetch_subgraph).
//!
//! After a successful resolution the diagnostic key [`RESOLVED_PATH_KEY`]
//! (`_resolved_config_path`) names the concrete backend location a reference
//! resolved to.

use serde_yaml::{Mapping, Value};

use crate::core::{NetvizError, Result};
use crate::interpolate;

/// Top-level key holding the module map.
pub const MODULES_KEY: &str = "modules";
/// Per-module key holding the type tag.
pub const CLS_KEY: &str = "cls";
/// Per-module key holding the inline payload or reference string.
pub const CONFIG_KEY: &str = "config";
/// Diagnostic key recording the concrete location a reference resolved to.
pub const RESOLVED_PATH_KEY: &str = "_resolved_config_path";
/// The `cls` value marking a module whose reference stays unexpanded.
pub const LAZY_CLS: &str = "ComposableModel";
/// Module names excluded from reference scanning.
pub const RESERVED_MODULES: &[&str] = &["entry", "exit"];

/// A parsed, interpolation-resolved YAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Parse YAML text and resolve its interpolation expressions.
    ///
    /// # Errors
    ///
    /// Returns [`NetvizError::DocumentParse`] for malformed YAML and
    /// [`NetvizError::Interpolation`] when a `${a.b.c}` expression cannot be
    /// resolved within the document.
    pub fn parse(text: &str) -> Result<Self> {
        let mut root: Value =
            serde_yaml::from_str(text).map_err(|e| NetvizError::DocumentParse {
                reason: e.to_string(),
            })?;
        interpolate::resolve_interpolations(&mut root)?;
        Ok(Self { root })
    }

    /// Wrap an already-parsed value tree.
    #[must_use]
    pub const fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Borrow the underlying value tree.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Mutably borrow the underlying value tree.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Consume the document, yielding the value tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// The `modules` mapping, if the document has one.
    #[must_use]
    pub fn modules(&self) -> Option<&Mapping> {
        self.root.get(MODULES_KEY).and_then(Value::as_mapping)
    }

    /// Mutable access to the `modules` mapping.
    pub fn modules_mut(&mut self) -> Option<&mut Mapping> {
        self.root.get_mut(MODULES_KEY).and_then(Value::as_mapping_mut)
    }

    /// Serialize back to YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`NetvizError::Yaml`] if the tree cannot be serialized.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }
}

/// True for the structurally-different `entry`/`exit` modules.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_MODULES.contains(&name)
}

/// True when the module keeps its reference unexpanded by design.
#[must_use]
pub fn is_lazy(module: &Value) -> bool {
    module.get(CLS_KEY).and_then(Value::as_str) == Some(LAZY_CLS)
}

/// The module's `config` field when it is still an unresolved reference.
#[must_use]
pub fn config_reference(module: &Value) -> Option<&str> {
    module.get(CONFIG_KEY).and_then(Value::as_str)
}

/// Replace the module's `config` payload in place.
///
/// No-op when the module is not a mapping.
pub fn set_config(module: &mut Value, config: Value) {
    if let Some(map) = module.as_mapping_mut() {
        map.insert(Value::String(CONFIG_KEY.to_string()), config);
    }
}

/// Attach the diagnostic `_resolved_config_path` key.
pub fn set_resolved_path(module: &mut Value, location: &str) {
    if let Some(map) = module.as_mapping_mut() {
        map.insert(
            Value::String(RESOLVED_PATH_KEY.to_string()),
            Value::String(location.to_string()),
        );
    }
}
