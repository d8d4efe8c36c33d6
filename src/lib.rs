//! Kiln: a native code backend for a class-based scripting language.
//!
//! This crate re-exports the workspace crates behind one entry point:
//!
//! - [`core`]: spans, names, the value/type model, errors
//! - [`registry`]: class and property registration and lookup
//! - [`compiler`]: per-unit compilation context and statement lowering
//!
//! # Example
//!
//! ```
//! use kiln::prelude::*;
//!
//! let mut registry = ClassRegistry::new();
//! let counter = registry
//!     .register_class(ClassDecl::user("Counter").static_property("count", Visibility::Public))
//!     .unwrap();
//!
//! let config = CodegenConfig::new();
//! let mut ctx = CompilationContext::for_class(&registry, &config, counter);
//! let stmt = LetStatement::new(Span::new(1, 1, 16)).assign(Assignment::new(
//!     AssignTarget::static_property("self", "count"),
//!     CompiledExpression::int(5),
//!     Span::new(1, 5, 12),
//! ));
//! StmtCompiler::new(&mut ctx).compile_let(&stmt).unwrap();
//!
//! assert!(ctx.render().contains("kiln_update_static_property_ce(counter_ce, SL(\"count\"), _0 TSRMLS_CC);"));
//! ```

pub use kiln_compiler as compiler;
pub use kiln_core as core;
pub use kiln_registry as registry;

pub mod prelude {
    pub use kiln_compiler::{
        AssignTarget, Assignment, ClassRef, CodegenConfig, CodegenProperty, CompilationContext,
        Instruction, LetStatement, StmtCompiler, StoreValue,
    };
    pub use kiln_core::{
        ClassId, CompilationError, CompiledExpression, ExprType, KilnError, RegistrationError,
        Span, VariableKind, Visibility,
    };
    pub use kiln_registry::{ClassDecl, ClassRegistry};
}
