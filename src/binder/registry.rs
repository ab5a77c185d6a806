//! Loaded-module and loaded-type registries.
//!
//! The binder never reaches for process-wide state; it is handed a registry
//! that can list the modules currently available and resolve a qualified type
//! name. [`InMemoryRegistry`] is a plain implementation of both.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::signature::TypeSignature;

/// A loaded module: its logical name and full versioned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleIdentity {
    pub logical_name: String,
    pub full_name: String,
}

impl ModuleIdentity {
    /// Build an identity from a full identifier such as
    /// `Bar, Version=2.0.0.0, Culture=neutral, PublicKeyToken=null`.
    ///
    /// ```
    /// use versioned_codec::binder::ModuleIdentity;
    ///
    /// let module = ModuleIdentity::parse("Bar, Version=2.0.0.0, Culture=neutral");
    /// assert_eq!(module.logical_name, "Bar");
    /// assert_eq!(module.full_name, "Bar, Version=2.0.0.0, Culture=neutral");
    /// ```
    pub fn parse(full_name: &str) -> Self {
        Self {
            logical_name: logical_module_name(full_name).to_string(),
            full_name: full_name.trim().to_string(),
        }
    }
}

/// Module name with version, culture and key qualifiers stripped.
pub fn logical_module_name(reference: &str) -> &str {
    reference.split(',').next().unwrap_or(reference).trim()
}

/// Source of the modules currently available.
pub trait ModuleRegistry {
    /// Snapshot of the loaded modules at call time.
    fn loaded_modules(&self) -> Vec<ModuleIdentity>;
}

/// Resolves a qualified type name to a loaded type.
pub trait TypeResolver {
    type Handle;

    /// `None` when no loaded type matches.
    fn resolve_type(&self, qualified_name: &str) -> Option<Self::Handle>;
}

impl<R: ModuleRegistry + ?Sized> ModuleRegistry for &R {
    fn loaded_modules(&self) -> Vec<ModuleIdentity> {
        (**self).loaded_modules()
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    type Handle = R::Handle;

    fn resolve_type(&self, qualified_name: &str) -> Option<Self::Handle> {
        (**self).resolve_type(qualified_name)
    }
}

/// A type registered in an [`InMemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadedType {
    pub signature: TypeSignature,
}

impl LoadedType {
    pub fn qualified_name(&self) -> String {
        self.signature.serialize()
    }
}

/// Registry of modules and types held in memory.
///
/// Types are keyed by their serialized qualified name, so a lookup must use
/// the module's full current identifier, which is exactly what the binder
/// produces.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    modules: Vec<ModuleIdentity>,
    types: HashMap<String, LoadedType>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module by its full identifier. Re-registering a logical
    /// name replaces the earlier version.
    pub fn with_module(mut self, full_name: &str) -> Self {
        self.load_module(full_name);
        self
    }

    pub fn load_module(&mut self, full_name: &str) {
        let module = ModuleIdentity::parse(full_name);
        self.modules
            .retain(|existing| existing.logical_name != module.logical_name);
        self.modules.push(module);
    }

    pub fn unload_module(&mut self, logical_name: &str) {
        self.modules
            .retain(|existing| existing.logical_name != logical_name);
        self.types.retain(|_, loaded| {
            loaded
                .signature
                .module_reference
                .as_deref()
                .map(logical_module_name)
                != Some(logical_name)
        });
    }

    /// Register a type under its qualified name (name plus module identifier).
    pub fn with_type(mut self, qualified_name: &str) -> Self {
        self.load_type(qualified_name);
        self
    }

    pub fn load_type(&mut self, qualified_name: &str) {
        let signature = TypeSignature::parse(qualified_name);
        self.types
            .insert(signature.serialize(), LoadedType { signature });
    }
}

impl ModuleRegistry for InMemoryRegistry {
    fn loaded_modules(&self) -> Vec<ModuleIdentity> {
        self.modules.clone()
    }
}

impl TypeResolver for InMemoryRegistry {
    type Handle = LoadedType;

    fn resolve_type(&self, qualified_name: &str) -> Option<LoadedType> {
        self.types.get(qualified_name).cloned()
    }
}
