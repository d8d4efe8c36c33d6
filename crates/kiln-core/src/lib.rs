//! Core types shared by the kiln compiler crates.
//!
//! - [`Span`]: source locations for diagnostics
//! - [`TypeHash`] and [`QualifiedName`]: class identity
//! - [`Visibility`]: member access modifiers
//! - [`CompiledExpression`], [`ExprType`], [`VariableKind`]: the value/type model
//! - [`entries`]: class and property definitions
//! - [`error`]: the error hierarchy

pub mod entries;
pub mod error;
mod expr;
mod qualified_name;
mod span;
mod type_hash;
mod variable_kind;
mod visibility;

pub use entries::{ClassDefinition, ClassHandle, ClassId, ClassProperty, ClassSource};
pub use error::{CompilationError, KilnError, RegistrationError};
pub use expr::{CompiledExpression, ExprType};
pub use qualified_name::QualifiedName;
pub use span::Span;
pub use type_hash::TypeHash;
pub use variable_kind::VariableKind;
pub use visibility::Visibility;
