//! Code generation switches.

use rustc_hash::FxHashMap;

/// A tunable code generation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodegenProperty {
    /// Use the cached static-property store form inside loops.
    CacheStaticPropertiesInLoops,
    /// Append the thread-safety trailer to runtime calls that take it.
    ThreadSafeArguments,
    /// Spaces per indentation level in rendered output.
    IndentWidth,
}

impl CodegenProperty {
    pub fn default_value(&self) -> usize {
        match self {
            CodegenProperty::CacheStaticPropertiesInLoops => 1,
            CodegenProperty::ThreadSafeArguments => 1,
            CodegenProperty::IndentWidth => 4,
        }
    }
}

/// Property values for one compilation; unset properties use their defaults.
#[derive(Debug, Clone, Default)]
pub struct CodegenConfig {
    values: FxHashMap<CodegenProperty, usize>,
}

impl CodegenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a property (builder style).
    pub fn with(mut self, property: CodegenProperty, value: usize) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: CodegenProperty, value: usize) {
        self.values.insert(property, value);
    }

    pub fn get(&self, property: CodegenProperty) -> usize {
        self.values
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.default_value())
    }

    /// A property counts as enabled when its value is non-zero.
    pub fn is_enabled(&self, property: CodegenProperty) -> bool {
        self.get(property) != 0
    }
}
