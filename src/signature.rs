//! Type signature parsing and serialization.
//!
//! A qualified type name such as
//!
//! ```text
//! Namespace.Outer+Inner`1[[Arg, ArgModule]][], Module, Version=1.0.0.0
//! ```
//!
//! is split into a [`TypeSignature`] tree: a name, an optional module
//! reference, an optional array specifier and an ordered list of generic
//! parameters, each itself a signature. [`TypeSignature::serialize`] is the
//! exact inverse of [`TypeSignature::parse`] for everything it produces.
//!
//! Strings that do not have this shape are never rejected: they parse to a
//! signature whose name is the whole input.

use std::fmt;
use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Name, optional `[[...]]` generic blob, array ranks and an optional module tail.
static SIGNATURE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^(?P<name>[^\[\],]+)(?:\[(?P<generics>\[.*\])\])?(?P<arrays>(?:\[[,*]*\])*)(?:,\s*(?P<module>.+))?$",
    )
    .expect("signature pattern is valid")
});

/// Parsed form of a qualified type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSignature {
    pub name: String,
    pub module_reference: Option<String>,
    pub array_specifier: Option<String>,
    pub generic_parameters: Vec<TypeSignature>,
}

impl TypeSignature {
    /// Signature with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_module(mut self, module_reference: impl Into<String>) -> Self {
        self.module_reference = Some(module_reference.into());
        self
    }

    pub fn with_array(mut self, array_specifier: impl Into<String>) -> Self {
        self.array_specifier = Some(array_specifier.into());
        self
    }

    pub fn with_generic(mut self, parameter: TypeSignature) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    /// Parse a qualified type name.
    ///
    /// ```
    /// use versioned_codec::signature::TypeSignature;
    ///
    /// let sig = TypeSignature::parse("Foo`1[[System.Int32, mscorlib]][], Bar");
    /// assert_eq!(sig.name, "Foo`1");
    /// assert_eq!(sig.module_reference.as_deref(), Some("Bar"));
    /// assert_eq!(sig.array_specifier.as_deref(), Some("[]"));
    /// assert_eq!(sig.generic_parameters[0].name, "System.Int32");
    /// assert_eq!(sig.generic_parameters[0].module_reference.as_deref(), Some("mscorlib"));
    /// ```
    pub fn parse(input: &str) -> Self {
        let Some(captures) = SIGNATURE_SHAPE.captures(input) else {
            trace!("signature {input:?} is not a qualified type name, keeping it opaque");
            return Self::named(input);
        };

        let non_empty = |group: &str| {
            captures
                .name(group)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let arguments = match captures.name("generics") {
            Some(generics) => match split_generic_arguments(generics.as_str()) {
                Some(arguments) => arguments,
                None => {
                    trace!("signature {input:?} has unbalanced generic brackets, keeping it opaque");
                    return Self::named(input);
                }
            },
            None => Vec::new(),
        };
        let generic_parameters = arguments
            .iter()
            .map(|argument| Self::parse(argument))
            .collect();

        Self {
            name: captures["name"].to_string(),
            module_reference: non_empty("module"),
            array_specifier: non_empty("arrays"),
            generic_parameters,
        }
    }

    /// Render the signature back to a qualified type name.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Visit this signature and every nested generic parameter, depth first.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut TypeSignature)) {
        visit(self);
        for parameter in &mut self.generic_parameters {
            parameter.walk_mut(visit);
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.generic_parameters.is_empty() {
            f.write_str("[")?;
            for (index, parameter) in self.generic_parameters.iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                write!(f, "[{parameter}]")?;
            }
            f.write_str("]")?;
        }
        if let Some(arrays) = &self.array_specifier {
            f.write_str(arrays)?;
        }
        if let Some(module) = &self.module_reference {
            write!(f, ", {module}")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeSignature {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

/// Split a `[A],[B[C]]` blob into its top-level entries.
///
/// Brackets are counted rather than commas split, so nested argument lists
/// and module references containing commas stay inside their entry.
/// Returns `None` when the brackets do not close.
fn split_generic_arguments(blob: &str) -> Option<Vec<String>> {
    let mut arguments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in blob.chars() {
        match c {
            '[' => {
                depth += 1;
                if depth > 1 {
                    current.push(c);
                }
            }
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    arguments.push(std::mem::take(&mut current));
                } else {
                    current.push(c);
                }
            }
            _ if depth > 0 => current.push(c),
            _ => {}
        }
    }
    (depth == 0 && current.is_empty()).then_some(arguments)
}
