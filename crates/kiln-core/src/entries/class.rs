//! Class definition entry.
//!
//! A [`ClassDefinition`] is created by the registry when a class is
//! registered and is immutable afterwards.

use std::fmt;

use crate::{QualifiedName, TypeHash};

use super::ClassProperty;

/// Index of a class definition in the registry arena.
///
/// The registry interns one definition per qualified name, so comparing ids
/// is comparing definitions by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque runtime handle of a compiled class (its class entry expression).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassHandle(String);

impl ClassHandle {
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// The handle for a user class: `<namespace>_<name>_ce`, lowercased.
    pub fn for_user_class(name: &QualifiedName) -> Self {
        Self(format!("{}_ce", name.symbol_prefix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a class comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassSource {
    /// Declared in the sources being compiled.
    User,
    /// Provided by the host runtime.
    Internal,
}

/// Registry entry for a class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinition {
    /// Arena identity.
    pub id: ClassId,
    /// Fully qualified name.
    pub name: QualifiedName,
    /// Case-insensitive name hash.
    pub type_hash: TypeHash,
    /// Runtime class entry.
    pub handle: ClassHandle,
    pub source: ClassSource,
    /// Declared parent name, as written.
    pub extends_name: Option<QualifiedName>,
    /// Resolved parent definition.
    pub extends: Option<ClassId>,
    /// Properties declared on this class (not inherited ones).
    pub properties: Vec<ClassProperty>,
}

impl ClassDefinition {
    /// Create a class definition with no parent and no properties.
    pub fn new(id: ClassId, name: QualifiedName, handle: ClassHandle, source: ClassSource) -> Self {
        let type_hash = name.to_type_hash();
        Self {
            id,
            name,
            type_hash,
            handle,
            source,
            extends_name: None,
            extends: None,
            properties: Vec::new(),
        }
    }

    /// The fully qualified name as a string.
    pub fn complete_name(&self) -> String {
        self.name.to_string()
    }

    /// The declared parent's name, if any.
    pub fn extends_class(&self) -> Option<&QualifiedName> {
        self.extends_name.as_ref()
    }

    pub fn is_internal(&self) -> bool {
        self.source == ClassSource::Internal
    }

    /// Find a property declared directly on this class.
    pub fn find_own_property(&self, name: &str) -> Option<&ClassProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}
