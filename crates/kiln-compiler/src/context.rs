//! CompilationContext - ambient state for the unit being compiled.
//!
//! A context bundles the read-only inputs shared across units (class
//! registry, codegen config) with the mutable per-unit state (symbol table,
//! emitter, headers, loop nesting). Each unit gets its own context; the
//! registry may be shared by parallel units.

use kiln_core::{ClassDefinition, ClassId, QualifiedName};
use kiln_registry::ClassRegistry;
use rustc_hash::FxHashMap;

use crate::config::CodegenConfig;
use crate::emit::{CodeEmitter, HeadersManager};
use crate::symbol_table::SymbolTable;

/// Compilation state for one function or method body.
pub struct CompilationContext<'a> {
    registry: &'a ClassRegistry,
    config: &'a CodegenConfig,
    /// Class whose method is being compiled
    current_class: Option<ClassId>,
    /// Namespace used to qualify relative class names
    namespace: Vec<String>,
    /// `use` imports, keyed by lowercased alias
    aliases: FxHashMap<String, QualifiedName>,
    symbols: SymbolTable,
    emitter: CodeEmitter,
    headers: HeadersManager,
    /// Number of enclosing loops
    loop_depth: u32,
}

impl<'a> CompilationContext<'a> {
    /// Create a context for code outside any class.
    pub fn new(registry: &'a ClassRegistry, config: &'a CodegenConfig) -> Self {
        Self {
            registry,
            config,
            current_class: None,
            namespace: Vec::new(),
            aliases: FxHashMap::default(),
            symbols: SymbolTable::new(),
            emitter: CodeEmitter::new(),
            headers: HeadersManager::new(),
            loop_depth: 0,
        }
    }

    /// Create a context for a method of `class`.
    ///
    /// Relative class names resolve against the class's own namespace.
    pub fn for_class(
        registry: &'a ClassRegistry,
        config: &'a CodegenConfig,
        class: ClassId,
    ) -> Self {
        let mut ctx = Self::new(registry, config);
        ctx.current_class = Some(class);
        if let Some(definition) = registry.get(class) {
            ctx.namespace = definition.name.namespace.clone();
        }
        ctx
    }

    /// Override the namespace (`App\Models`).
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace
            .split(QualifiedName::SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    /// Import a class name: `use App\Models\User` or, with `alias`,
    /// `use App\Models\User as Account`.
    ///
    /// The import is always absolute. Without an alias the last segment is
    /// bound.
    pub fn add_use(&mut self, import: &str, alias: Option<&str>) {
        let target = QualifiedName::from_qualified_string(import);
        let alias = alias.unwrap_or(target.simple_name()).to_ascii_lowercase();
        log::trace!("alias {} => {}", alias, target);
        self.aliases.insert(alias, target);
    }

    /// Resolve an alias (case-insensitive).
    pub fn alias(&self, alias: &str) -> Option<&QualifiedName> {
        self.aliases.get(&alias.to_ascii_lowercase())
    }

    // ==========================================================================
    // Shared Inputs
    // ==========================================================================

    pub fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    pub fn config(&self) -> &'a CodegenConfig {
        self.config
    }

    /// The class being compiled, if any.
    pub fn current_class(&self) -> Option<&'a ClassDefinition> {
        self.current_class.and_then(|id| self.registry.get(id))
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Normalize a class name to its fully qualified form.
    ///
    /// A leading `\` marks an absolute name. Otherwise a first segment
    /// matching a `use` alias is replaced by the imported name, and anything
    /// else is relative to the current namespace.
    pub fn full_name(&self, name: &str) -> QualifiedName {
        let qualified = QualifiedName::from_qualified_string(name);
        if name.starts_with(QualifiedName::SEPARATOR) {
            return qualified;
        }

        let first = qualified
            .namespace
            .first()
            .unwrap_or(&qualified.name)
            .as_str();
        if let Some(target) = self.alias(first) {
            if qualified.namespace.is_empty() {
                return target.clone();
            }
            let mut namespace = target.namespace.clone();
            namespace.push(target.name.clone());
            namespace.extend(qualified.namespace.iter().skip(1).cloned());
            return QualifiedName::new(qualified.name, namespace);
        }

        let mut namespace = self.namespace.clone();
        namespace.extend(qualified.namespace);
        QualifiedName::new(qualified.name, namespace)
    }

    // ==========================================================================
    // Per-unit State
    // ==========================================================================

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn emitter(&self) -> &CodeEmitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut CodeEmitter {
        &mut self.emitter
    }

    pub fn headers(&self) -> &HeadersManager {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeadersManager {
        &mut self.headers
    }

    // ==========================================================================
    // Loop Tracking
    // ==========================================================================

    /// Enter a loop body.
    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    /// Leave a loop body.
    pub fn exit_loop(&mut self) {
        self.loop_depth = self.loop_depth.saturating_sub(1);
    }

    /// Whether the statement being compiled is lexically inside a loop.
    pub fn inside_cycle(&self) -> bool {
        self.loop_depth > 0
    }

    pub fn loop_depth(&self) -> u32 {
        self.loop_depth
    }

    // ==========================================================================
    // Output
    // ==========================================================================

    /// Render the unit: headers, then declarations, then code.
    pub fn render(&self) -> String {
        let mut out = self.headers.render();
        if !self.headers.is_empty() {
            out.push('\n');
        }
        for declaration in self.symbols.declarations() {
            out.push_str(&declaration);
            out.push('\n');
        }
        if !self.symbols.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.emitter.render(self.config));
        out
    }
}
