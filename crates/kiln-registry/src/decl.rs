//! Class declarations fed to the registry.

use kiln_core::{ClassHandle, ClassSource, QualifiedName, Visibility};

/// A property as declared, before the registry assigns its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
    pub is_static: bool,
    pub visibility: Visibility,
}

/// Builder describing a class to register.
///
/// # Example
///
/// ```
/// use kiln_registry::ClassDecl;
/// use kiln_core::Visibility;
///
/// let decl = ClassDecl::user("App\\Counter")
///     .extends("App\\Base")
///     .static_property("count", Visibility::Public)
///     .property("label", Visibility::Protected);
/// assert_eq!(decl.properties().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub(crate) name: QualifiedName,
    pub(crate) source: ClassSource,
    pub(crate) handle: ClassHandle,
    pub(crate) extends: Option<QualifiedName>,
    pub(crate) properties: Vec<PropertyDecl>,
}

impl ClassDecl {
    /// Declare a class from the sources being compiled.
    ///
    /// Its runtime handle is derived from the qualified name.
    pub fn user(name: &str) -> Self {
        let name = QualifiedName::from_qualified_string(name);
        let handle = ClassHandle::for_user_class(&name);
        Self {
            name,
            source: ClassSource::User,
            handle,
            extends: None,
            properties: Vec::new(),
        }
    }

    /// Declare a class provided by the host runtime with an explicit handle.
    pub fn internal(name: &str, handle: impl Into<String>) -> Self {
        Self {
            name: QualifiedName::from_qualified_string(name),
            source: ClassSource::Internal,
            handle: ClassHandle::new(handle),
            extends: None,
            properties: Vec::new(),
        }
    }

    /// Set the parent class by fully qualified name.
    pub fn extends(mut self, parent: &str) -> Self {
        self.extends = Some(QualifiedName::from_qualified_string(parent));
        self
    }

    /// Add a static property.
    pub fn static_property(self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.with_property(name, true, visibility)
    }

    /// Add an instance property.
    pub fn property(self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.with_property(name, false, visibility)
    }

    fn with_property(
        mut self,
        name: impl Into<String>,
        is_static: bool,
        visibility: Visibility,
    ) -> Self {
        self.properties.push(PropertyDecl {
            name: name.into(),
            is_static,
            visibility,
        });
        self
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }
}
