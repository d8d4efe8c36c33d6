use crate::Visibility;

use super::ClassId;

/// A property declared on a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassProperty {
    /// Property name.
    pub name: String,
    /// Class-level (`static`) rather than per-instance storage.
    pub is_static: bool,
    pub visibility: Visibility,
    /// The class that declares this property. Lookup key only.
    pub declaring_class: ClassId,
}

impl ClassProperty {
    pub fn new(
        name: impl Into<String>,
        is_static: bool,
        visibility: Visibility,
        declaring_class: ClassId,
    ) -> Self {
        Self {
            name: name.into(),
            is_static,
            visibility,
            declaring_class,
        }
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_private(&self) -> bool {
        self.visibility.is_private()
    }
}
