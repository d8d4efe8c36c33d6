//! Scope resolution of class references in static member syntax.
//!
//! Maps the class part of `Name::$prop`, `self::$prop`, or `parent::$prop`
//! to a concrete [`ClassDefinition`].

use kiln_core::{ClassDefinition, CompilationError, Span};

use crate::context::CompilationContext;

type Result<T> = std::result::Result<T, CompilationError>;

/// Syntactic class reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRef<'s> {
    /// `self`: the class being compiled.
    SelfClass,
    /// `parent`: the declared parent of the class being compiled.
    Parent,
    /// A class name, relative or absolute.
    Named(&'s str),
}

impl<'s> ClassRef<'s> {
    /// Classify a class reference token.
    pub fn parse(token: &'s str) -> Self {
        match token {
            "self" => ClassRef::SelfClass,
            "parent" => ClassRef::Parent,
            name => ClassRef::Named(name),
        }
    }
}

/// Resolve a class reference for an assignment to `property`.
///
/// `property` only feeds the `NoParent` diagnostic.
pub fn resolve_class<'a>(
    ctx: &CompilationContext<'a>,
    class_ref: ClassRef<'_>,
    property: &str,
    span: Span,
) -> Result<&'a ClassDefinition> {
    match class_ref {
        ClassRef::Named(name) => {
            let full_name = ctx.full_name(name);
            let registry = ctx.registry();
            let definition = if registry.is_class(&full_name) {
                registry.get_class_definition(&full_name)
            } else if registry.is_internal_class(&full_name) {
                registry.get_internal_class_definition(&full_name)
            } else {
                None
            };
            definition.ok_or_else(|| CompilationError::UnresolvedClass {
                name: full_name.to_string(),
                span,
            })
        }
        ClassRef::SelfClass => current_class(ctx, "self", span),
        ClassRef::Parent => {
            let class = current_class(ctx, "parent", span)?;
            ctx.registry()
                .extends_class_definition(class)
                .ok_or_else(|| CompilationError::NoParent {
                    property: property.to_string(),
                    class_name: class.complete_name(),
                    span,
                })
        }
    }
}

fn current_class<'a>(
    ctx: &CompilationContext<'a>,
    keyword: &str,
    span: Span,
) -> Result<&'a ClassDefinition> {
    ctx.current_class()
        .ok_or_else(|| CompilationError::OutsideClass {
            keyword: keyword.to_string(),
            span,
        })
}
