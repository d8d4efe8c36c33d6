//! Access checks for static property assignment.

use kiln_core::{ClassDefinition, ClassProperty, CompilationError, Span};

use crate::context::CompilationContext;

type Result<T> = std::result::Result<T, CompilationError>;

/// Find `property` on `class` and check it may be assigned statically from
/// the class being compiled.
///
/// Checks run in order and stop at the first failure:
/// 1. the property exists on the class or an ancestor,
/// 2. it is static,
/// 3. if private, the class being compiled is both the class named by the
///    statement and the property's declaring class.
///
/// The private check compares class identities: a subclass of the declaring
/// class is rejected, and so is the declaring class reaching the property
/// through a subclass name.
pub fn validate_static_property<'a>(
    ctx: &CompilationContext<'a>,
    class: &'a ClassDefinition,
    property: &str,
    span: Span,
) -> Result<&'a ClassProperty> {
    let definition = ctx
        .registry()
        .get_property(class.id, property)
        .ok_or_else(|| CompilationError::UnknownProperty {
            class_name: class.complete_name(),
            property: property.to_string(),
            span,
        })?;

    if !definition.is_static() {
        return Err(CompilationError::NotStatic {
            class_name: class.complete_name(),
            property: property.to_string(),
            span,
        });
    }

    let current = ctx.current_class().map(|c| c.id);
    if definition.is_private()
        && (current != Some(class.id) || current != Some(definition.declaring_class))
    {
        return Err(CompilationError::PrivateAccessViolation {
            class_name: class.complete_name(),
            property: property.to_string(),
            span,
        });
    }

    Ok(definition)
}
