//! Cross-version module binder.
//!
//! Payloads record the qualified name of the types they were written with,
//! including the exact module version. When the module has since been
//! upgraded, that name no longer resolves. The binder rewrites every module
//! reference in a type signature (including those of nested generic
//! parameters) to the identifier of whichever version of that module is
//! loaded now, matching on the logical module name only.
//!
//! # Example
//!
//! ```
//! use versioned_codec::binder::{InMemoryRegistry, ModuleBinder};
//!
//! let registry = InMemoryRegistry::new()
//!     .with_module("Bar, Version=1.3.0.0")
//!     .with_type("Foo, Bar, Version=1.3.0.0");
//! let binder = ModuleBinder::new(registry);
//!
//! assert_eq!(binder.rebind("Foo", "Bar, Version=1.2.0.0"), "Foo, Bar, Version=1.3.0.0");
//! assert!(binder.bind_type("Foo", "Bar, Version=1.2.0.0").is_some());
//! assert!(binder.bind_type("Missing", "Bar, Version=1.2.0.0").is_none());
//! ```

mod registry;

pub use registry::*;

use log::{debug, trace};

use crate::signature::TypeSignature;

/// Rewrites module references against an injected [`ModuleRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ModuleBinder<R> {
    registry: R,
}

impl<R: ModuleRegistry> ModuleBinder<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Rewrite every module reference in `signature` to the loaded version.
    ///
    /// References to modules that are not loaded are left as written; only
    /// `module_reference` fields are touched.
    pub fn bind_signature(&self, signature: &mut TypeSignature) {
        let loaded = self.registry.loaded_modules();
        signature.walk_mut(&mut |node: &mut TypeSignature| {
            let Some(reference) = node.module_reference.as_deref() else {
                return;
            };
            if reference.is_empty() {
                return;
            }
            let logical = logical_module_name(reference);
            match loaded.iter().find(|module| module.logical_name == logical) {
                Some(module) if module.full_name != reference => {
                    debug!(
                        "binding {} from {reference:?} to {:?}",
                        node.name, module.full_name
                    );
                    node.module_reference = Some(module.full_name.clone());
                }
                Some(_) => {}
                None => trace!("module {logical:?} is not loaded, leaving {} unbound", node.name),
            }
        });
    }

    /// Qualified name of `name` with every module reference bound.
    pub fn rebind(&self, name: &str, module_reference: &str) -> String {
        let mut signature = TypeSignature::parse(&qualify(name, module_reference));
        self.bind_signature(&mut signature);
        signature.serialize()
    }
}

impl<R: ModuleRegistry + TypeResolver> ModuleBinder<R> {
    /// Bind `name` as written against `module_reference` and resolve it.
    ///
    /// Returns `None` when the bound name does not resolve; callers choose
    /// the fallback.
    pub fn bind_type(&self, name: &str, module_reference: &str) -> Option<R::Handle> {
        let qualified = self.rebind(name, module_reference);
        let handle = self.registry.resolve_type(&qualified);
        if handle.is_none() {
            debug!("no loaded type matches {qualified:?}");
        }
        handle
    }
}

fn qualify(name: &str, module_reference: &str) -> String {
    if module_reference.trim().is_empty() {
        name.to_string()
    } else {
        format!("{name}, {module_reference}")
    }
}
