//! Registry entry types for classes and their properties.

mod class;
mod property;

pub use class::{ClassDefinition, ClassHandle, ClassId, ClassSource};
pub use property::ClassProperty;
