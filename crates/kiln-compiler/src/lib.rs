//! Kiln Compiler
//!
//! Lowers statements of a class-based scripting language into calls against
//! a native runtime's value and object-model primitives.
//!
//! ## Architecture
//!
//! - **Registration**: classes are registered with their parents and
//!   properties in a [`kiln_registry::ClassRegistry`], shared read-only by
//!   every unit
//! - **Lowering**: each function or method body is compiled in its own
//!   [`CompilationContext`], which owns its symbol table, emitter and headers
//!
//! ## Modules
//!
//! - [`access`]: Visibility and staticness checks for property assignment
//! - [`config`]: Code generation switches
//! - [`context`]: Per-unit compilation state with namespace-aware resolution
//! - [`emit`]: Typed runtime calls and their rendering
//! - [`resolve`]: `self` / `parent` / named class resolution
//! - [`stmt`]: Statement compiler, including static property assignment
//! - [`symbol_table`]: Variables and temporaries of one unit

pub mod access;
pub mod config;
pub mod context;
pub mod emit;
pub mod resolve;
pub mod stmt;
pub mod symbol_table;

pub use access::validate_static_property;
pub use config::{CodegenConfig, CodegenProperty};
pub use context::CompilationContext;
pub use emit::{CodeEmitter, EmittedLine, HeadersManager, Instruction, StoreValue};
pub use resolve::{ClassRef, resolve_class};
pub use stmt::static_property::StaticPropertyTarget;
pub use stmt::{AssignTarget, Assignment, LetStatement, StmtCompiler};
pub use symbol_table::{SymbolTable, VarId, Variable, VariableFlags};

// Re-export CompilationError from core for convenience
pub use kiln_core::CompilationError;
