//! Class registry for kiln.
//!
//! Holds the class definitions produced by the registration pass and answers
//! the lookups statement lowering needs: class by name, parent chain, and
//! property by name.

mod decl;
mod registry;

pub use decl::{ClassDecl, PropertyDecl};
pub use registry::ClassRegistry;
