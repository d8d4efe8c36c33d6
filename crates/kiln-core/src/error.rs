//! Unified error types for kiln.
//!
//! ## Error Hierarchy
//!
//! ```text
//! KilnError (top-level wrapper)
//! ├── RegistrationError - Class registry construction errors
//! └── CompilationError  - Statement lowering errors
//! ```
//!
//! Every [`CompilationError`] names the statement that caused it through its
//! span, so the statement dispatcher can report a diagnostic and decide
//! whether to keep compiling the unit.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating the class registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A class with this name already exists.
    #[error("duplicate class: {0}")]
    DuplicateClass(String),

    /// The declared parent has not been registered.
    #[error("class '{class}' extends unknown class '{parent}'")]
    UnknownParent {
        /// The class being registered.
        class: String,
        /// The parent name as declared.
        parent: String,
    },

    /// A property was declared twice on the same class.
    #[error("duplicate property '{property}' in class '{class}'")]
    DuplicateProperty {
        /// The class name.
        class: String,
        /// The duplicated property name.
        property: String,
    },
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors raised while lowering a statement.
///
/// All of these abort lowering of the current statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    /// The class reference names no known user or internal class.
    #[error("at {span}: cannot locate class '{name}'")]
    UnresolvedClass {
        /// The normalized class name.
        name: String,
        /// The offending statement.
        span: Span,
    },

    /// `parent` was used in a class without a base class.
    #[error(
        "at {span}: cannot assign static property '{property}' on parent because class {class_name} does not extend any class"
    )]
    NoParent {
        /// The property being assigned.
        property: String,
        /// The class being compiled.
        class_name: String,
        /// The offending statement.
        span: Span,
    },

    /// The resolved class declares no property of that name.
    #[error("at {span}: class '{class_name}' does not have a property called '{property}'")]
    UnknownProperty {
        /// The resolved class.
        class_name: String,
        /// The missing property.
        property: String,
        /// The offending statement.
        span: Span,
    },

    /// The property exists but is an instance property.
    #[error("at {span}: cannot access non-static property '{class_name}::{property}'")]
    NotStatic {
        /// The resolved class.
        class_name: String,
        /// The instance property.
        property: String,
        /// The offending statement.
        span: Span,
    },

    /// A private property was accessed outside its declaring class.
    #[error(
        "at {span}: cannot access private static property '{class_name}::{property}' out of its declaring context"
    )]
    PrivateAccessViolation {
        /// The resolved class.
        class_name: String,
        /// The private property.
        property: String,
        /// The offending statement.
        span: Span,
    },

    /// The expression (or referenced variable) has a type lowering does not handle.
    #[error("at {span}: unknown type {type_name}")]
    UnsupportedExpressionType {
        /// The unrecognized tag.
        type_name: String,
        /// The offending statement.
        span: Span,
    },

    /// A variable was read that the symbol table does not know.
    #[error("at {span}: cannot read variable '{name}' because it wasn't defined")]
    UnknownVariable {
        /// The variable name.
        name: String,
        /// Where the variable was referenced.
        span: Span,
    },

    /// A variable was redeclared in the same unit.
    #[error("at {new_span}: variable '{name}' redeclared (originally declared at {original_span})")]
    VariableRedeclaration {
        /// The variable name.
        name: String,
        /// Where the variable was originally declared.
        original_span: Span,
        /// Where the redeclaration occurred.
        new_span: Span,
    },

    /// `self` or `parent` used while no class is being compiled.
    #[error("at {span}: cannot use '{keyword}' outside of a class context")]
    OutsideClass {
        /// `self` or `parent`.
        keyword: String,
        /// The offending statement.
        span: Span,
    },

    /// An operation this backend does not lower.
    #[error("at {span}: {message}")]
    InvalidOperation {
        /// Description of what's invalid.
        message: String,
        /// The offending statement.
        span: Span,
    },

    /// An internal invariant was broken.
    #[error("internal compiler error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl CompilationError {
    /// Get the span of the statement that caused this error.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::UnresolvedClass { span, .. } => *span,
            CompilationError::NoParent { span, .. } => *span,
            CompilationError::UnknownProperty { span, .. } => *span,
            CompilationError::NotStatic { span, .. } => *span,
            CompilationError::PrivateAccessViolation { span, .. } => *span,
            CompilationError::UnsupportedExpressionType { span, .. } => *span,
            CompilationError::UnknownVariable { span, .. } => *span,
            CompilationError::VariableRedeclaration { new_span, .. } => *new_span,
            CompilationError::OutsideClass { span, .. } => *span,
            CompilationError::InvalidOperation { span, .. } => *span,
            CompilationError::Internal { .. } => Span::default(),
        }
    }
}

// ============================================================================
// Top-level
// ============================================================================

/// Top-level error wrapping every phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KilnError {
    /// A registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A compilation error.
    #[error(transparent)]
    Compilation(#[from] CompilationError),
}
