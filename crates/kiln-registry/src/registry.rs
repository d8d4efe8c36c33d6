//! ClassRegistry - read-only view of every class known to a compilation.
//!
//! # Storage Model
//!
//! - **Arena**: every [`ClassDefinition`] lives in a single `Vec`, addressed
//!   by [`ClassId`]. One definition exists per qualified name, so identity
//!   comparisons can compare ids.
//! - **Name tables**: user classes and internal (host runtime) classes are
//!   indexed separately by the case-insensitive [`TypeHash`] of their name.
//!
//! # Thread Safety
//!
//! The registry is populated single-threaded by the earlier compiler passes.
//! Afterwards it is only read, and can be shared by reference across
//! compilation units running in parallel.
//!
//! # Example
//!
//! ```
//! use kiln_registry::{ClassDecl, ClassRegistry};
//! use kiln_core::{QualifiedName, Visibility};
//!
//! let mut registry = ClassRegistry::new();
//! registry
//!     .register_class(ClassDecl::user("Foo").static_property("count", Visibility::Public))
//!     .unwrap();
//!
//! let foo = registry.get_class_definition(&QualifiedName::global("foo")).unwrap();
//! assert!(registry.has_property(foo.id, "count"));
//! ```

use rustc_hash::FxHashMap;

use kiln_core::{
    ClassDefinition, ClassId, ClassProperty, ClassSource, QualifiedName, RegistrationError,
    TypeHash,
};

use crate::ClassDecl;

/// Class and property registry.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Arena of definitions, indexed by `ClassId`.
    classes: Vec<ClassDefinition>,
    /// User classes by name hash.
    user: FxHashMap<TypeHash, ClassId>,
    /// Internal classes by name hash.
    internal: FxHashMap<TypeHash, ClassId>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class.
    ///
    /// The parent, if declared, must already be registered (user classes are
    /// checked before internal ones).
    pub fn register_class(&mut self, decl: ClassDecl) -> Result<ClassId, RegistrationError> {
        let hash = decl.name.to_type_hash();
        if self.user.contains_key(&hash) || self.internal.contains_key(&hash) {
            return Err(RegistrationError::DuplicateClass(decl.name.to_string()));
        }

        let extends = match &decl.extends {
            Some(parent) => Some(self.lookup_any(parent).ok_or_else(|| {
                RegistrationError::UnknownParent {
                    class: decl.name.to_string(),
                    parent: parent.to_string(),
                }
            })?),
            None => None,
        };

        let id = ClassId(self.classes.len() as u32);
        let mut definition = ClassDefinition::new(id, decl.name, decl.handle, decl.source);
        definition.extends_name = decl.extends;
        definition.extends = extends;

        for property in decl.properties {
            if definition.find_own_property(&property.name).is_some() {
                return Err(RegistrationError::DuplicateProperty {
                    class: definition.complete_name(),
                    property: property.name,
                });
            }
            definition.properties.push(ClassProperty::new(
                property.name,
                property.is_static,
                property.visibility,
                id,
            ));
        }

        log::trace!(
            "registered {:?} class {} as {:?}",
            definition.source,
            definition.name,
            id
        );

        match definition.source {
            ClassSource::User => self.user.insert(hash, id),
            ClassSource::Internal => self.internal.insert(hash, id),
        };
        self.classes.push(definition);

        Ok(id)
    }

    // ==========================================================================
    // Class Lookup
    // ==========================================================================

    /// Get a definition by id.
    pub fn get(&self, id: ClassId) -> Option<&ClassDefinition> {
        self.classes.get(id.index())
    }

    /// Check if a user class with this name exists.
    pub fn is_class(&self, name: &QualifiedName) -> bool {
        self.user.contains_key(&name.to_type_hash())
    }

    /// Check if an internal class with this name exists.
    pub fn is_internal_class(&self, name: &QualifiedName) -> bool {
        self.internal.contains_key(&name.to_type_hash())
    }

    /// Get a user class by name.
    pub fn get_class_definition(&self, name: &QualifiedName) -> Option<&ClassDefinition> {
        self.user
            .get(&name.to_type_hash())
            .and_then(|id| self.get(*id))
    }

    /// Get an internal class by name.
    pub fn get_internal_class_definition(&self, name: &QualifiedName) -> Option<&ClassDefinition> {
        self.internal
            .get(&name.to_type_hash())
            .and_then(|id| self.get(*id))
    }

    fn lookup_any(&self, name: &QualifiedName) -> Option<ClassId> {
        let hash = name.to_type_hash();
        self.user
            .get(&hash)
            .or_else(|| self.internal.get(&hash))
            .copied()
    }

    /// Get the resolved parent of a class.
    pub fn extends_class_definition(&self, class: &ClassDefinition) -> Option<&ClassDefinition> {
        class.extends.and_then(|id| self.get(id))
    }

    /// Get the inheritance chain for a class (excluding the class itself).
    ///
    /// Returns base classes from immediate parent to root.
    pub fn base_class_chain(&self, id: ClassId) -> Vec<&ClassDefinition> {
        let mut chain = Vec::new();
        let mut current = self.get(id);

        while let Some(class) = current
            && let Some(base) = self.extends_class_definition(class)
        {
            chain.push(base);
            current = Some(base);
        }

        chain
    }

    // ==========================================================================
    // Property Lookup
    // ==========================================================================

    /// Find a property on a class or any of its ancestors.
    ///
    /// Own properties shadow inherited ones.
    pub fn get_property(&self, id: ClassId, name: &str) -> Option<&ClassProperty> {
        let own = self.get(id)?;
        own.find_own_property(name).or_else(|| {
            self.base_class_chain(id)
                .into_iter()
                .find_map(|base| base.find_own_property(name))
        })
    }

    /// Check if a class or any of its ancestors declares a property.
    pub fn has_property(&self, id: ClassId, name: &str) -> bool {
        self.get_property(id, name).is_some()
    }

    // ==========================================================================
    // Iteration
    // ==========================================================================

    /// Iterate over all classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.iter()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
