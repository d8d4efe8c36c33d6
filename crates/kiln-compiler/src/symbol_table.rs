//! Symbol table for one compilation unit.
//!
//! This module provides `SymbolTable` for tracking the variables of a single
//! function or method body. It handles:
//! - User variable declaration and lookup for read
//! - Temporary allocation from per-purpose pools, recycling idle temporaries
//! - Per-variable lifecycle flags (idle, reusable, must-init-null)
//! - Rendering of the unit's declarations
//!
//! Variables live in an arena addressed by [`VarId`]. Marking a variable idle
//! is a state transition on its entry, never a free.

use bitflags::bitflags;
use kiln_core::{CompilationError, Span, VariableKind};
use rustc_hash::FxHashMap;

type Result<T> = std::result::Result<T, CompilationError>;

// ============================================================================
// Types
// ============================================================================

bitflags! {
    /// Lifecycle state of a variable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VariableFlags: u8 {
        /// Introduced by the compiler rather than named by the user.
        const TEMPORAL = 1 << 0;
        /// Value consumed; storage may be recycled.
        const IDLE = 1 << 1;
        /// May be handed out again once idle.
        const REUSABLE = 1 << 2;
        /// Declared with the runtime's empty sentinel.
        const MUST_INIT_NULL = 1 << 3;
        /// Registered for memory-manager cleanup.
        const TRACKED = 1 << 4;
        /// Holds a value.
        const INITIALIZED = 1 << 5;
    }
}

/// Handle of a variable in the symbol table arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

/// Pool a temporary was allocated from; recycling never crosses pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TempPool {
    NonTracked,
    Write,
}

/// A variable of the unit being compiled.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    kind: VariableKind,
    flags: VariableFlags,
    pool: Option<TempPool>,
    uses: u32,
    span: Span,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn flags(&self) -> VariableFlags {
        self.flags
    }

    pub fn is_temporal(&self) -> bool {
        self.flags.contains(VariableFlags::TEMPORAL)
    }

    pub fn is_idle(&self) -> bool {
        self.flags.contains(VariableFlags::IDLE)
    }

    pub fn is_reusable(&self) -> bool {
        self.flags.contains(VariableFlags::REUSABLE)
    }

    pub fn must_init_null(&self) -> bool {
        self.flags.contains(VariableFlags::MUST_INIT_NULL)
    }

    pub fn is_tracked(&self) -> bool {
        self.flags.contains(VariableFlags::TRACKED)
    }

    /// Number of times the variable was handed out or read.
    pub fn uses(&self) -> u32 {
        self.uses
    }

    /// Where a user variable was declared (default span for temporaries).
    pub fn span(&self) -> Span {
        self.span
    }

    /// Render the C declaration of this variable.
    pub fn declaration(&self) -> String {
        let star = if self.kind.is_pointer() { "*" } else { "" };
        let init = match (self.must_init_null(), self.kind.is_pointer()) {
            (true, true) => " = NULL",
            (true, false) => " = 0",
            (false, _) => "",
        };
        format!("{} {}{}{};", self.kind.c_type(), star, self.name, init)
    }
}

// ============================================================================
// SymbolTable
// ============================================================================

/// Variables of one compilation unit.
///
/// Not shared between units; each unit owns its table.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Arena of all variables in allocation order
    variables: Vec<Variable>,
    /// Variables by name, temporaries included
    by_name: FxHashMap<String, VarId>,
    /// Counter for temporary names (`_0`, `_1`, ...)
    next_temp: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // User Variables
    // ==========================================================================

    /// Declare a user variable.
    ///
    /// Returns an error if the name is already declared in this unit.
    pub fn add_variable(
        &mut self,
        kind: VariableKind,
        name: impl Into<String>,
        span: Span,
    ) -> Result<VarId> {
        let name = name.into();
        if let Some(existing) = self.by_name.get(&name) {
            return Err(CompilationError::VariableRedeclaration {
                original_span: self.variables[existing.0 as usize].span,
                name,
                new_span: span,
            });
        }

        let id = self.push(Variable {
            name: name.clone(),
            kind,
            flags: VariableFlags::INITIALIZED,
            pool: None,
            uses: 0,
            span,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Look up a variable for reading.
    pub fn get_variable_for_read(&mut self, name: &str, span: Span) -> Result<VarId> {
        let id = *self
            .by_name
            .get(name)
            .ok_or_else(|| CompilationError::UnknownVariable {
                name: name.to_string(),
                span,
            })?;
        self.variables[id.0 as usize].uses += 1;
        Ok(id)
    }

    /// Check if a variable is declared.
    pub fn has_variable(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    // ==========================================================================
    // Temporaries
    // ==========================================================================

    /// Allocate a temporary that is not registered for cleanup.
    ///
    /// Recycles an idle reusable temporary of the same kind when one exists.
    pub fn get_temp_non_tracked_variable(&mut self, kind: VariableKind) -> VarId {
        self.temp(kind, TempPool::NonTracked)
    }

    /// Allocate a tracked temporary to write into.
    ///
    /// Recycles an idle reusable temporary of the same kind when one exists.
    pub fn get_temp_variable_for_write(&mut self, kind: VariableKind) -> VarId {
        self.temp(kind, TempPool::Write)
    }

    fn temp(&mut self, kind: VariableKind, pool: TempPool) -> VarId {
        if let Some(index) = self.variables.iter().position(|v| {
            v.pool == Some(pool)
                && v.kind == kind
                && v.flags
                    .contains(VariableFlags::IDLE | VariableFlags::REUSABLE)
        }) {
            let variable = &mut self.variables[index];
            variable.flags.remove(VariableFlags::IDLE);
            variable.uses += 1;
            log::trace!("reusing idle temporary {} ({})", variable.name, kind);
            return VarId(index as u32);
        }

        let mut flags = VariableFlags::TEMPORAL | VariableFlags::REUSABLE;
        match pool {
            TempPool::NonTracked => flags |= VariableFlags::INITIALIZED,
            TempPool::Write => flags |= VariableFlags::TRACKED,
        }

        let name = format!("_{}", self.next_temp);
        self.next_temp += 1;
        log::trace!("allocated temporary {} ({}, {:?})", name, kind, pool);

        let id = self.push(Variable {
            name: name.clone(),
            kind,
            flags,
            pool: Some(pool),
            uses: 1,
            span: Span::default(),
        });
        self.by_name.insert(name, id);
        id
    }

    fn push(&mut self, variable: Variable) -> VarId {
        let id = VarId(self.variables.len() as u32);
        self.variables.push(variable);
        id
    }

    // ==========================================================================
    // State Transitions
    // ==========================================================================

    /// Mark a variable's value as consumed (or live again).
    pub fn set_idle(&mut self, id: VarId, idle: bool) -> Result<()> {
        let variable = self.get_mut(id)?;
        log::trace!("variable {} idle={}", variable.name, idle);
        variable.flags.set(VariableFlags::IDLE, idle);
        Ok(())
    }

    pub fn set_reusable(&mut self, id: VarId, reusable: bool) -> Result<()> {
        self.get_mut(id)?
            .flags
            .set(VariableFlags::REUSABLE, reusable);
        Ok(())
    }

    pub fn set_must_init_null(&mut self, id: VarId, must_init_null: bool) -> Result<()> {
        self.get_mut(id)?
            .flags
            .set(VariableFlags::MUST_INIT_NULL, must_init_null);
        Ok(())
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    pub fn get(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.0 as usize)
    }

    /// Get a variable, treating a stale handle as an internal error.
    pub fn variable(&self, id: VarId) -> Result<&Variable> {
        self.get(id).ok_or_else(|| stale(id))
    }

    fn get_mut(&mut self, id: VarId) -> Result<&mut Variable> {
        self.variables.get_mut(id.0 as usize).ok_or_else(|| stale(id))
    }

    /// Number of temporaries created (recycled ones count once).
    pub fn temp_count(&self) -> u32 {
        self.next_temp
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over all variables in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// Declarations of every variable, in allocation order.
    pub fn declarations(&self) -> Vec<String> {
        self.variables.iter().map(Variable::declaration).collect()
    }
}

fn stale(id: VarId) -> CompilationError {
    CompilationError::Internal {
        message: format!("unknown variable handle {:?}", id),
    }
}

// ============================================================================
// Tests
// ============================================================================
