//! Runtime header declarations required by emitted code.

use rustc_hash::FxHashSet;

/// Object-model runtime facility (static and instance property access).
pub const OBJECT_HEADER: &str = "kernel/object";

/// Ordered, deduplicated set of required headers.
///
/// Headers render in first-declaration order, ahead of the code using them.
#[derive(Debug, Default)]
pub struct HeadersManager {
    order: Vec<String>,
    seen: FxHashSet<String>,
}

impl HeadersManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dependency. Returns `false` if it was already declared.
    pub fn add(&mut self, header: &str) -> bool {
        if !self.seen.insert(header.to_string()) {
            return false;
        }
        self.order.push(header.to_string());
        true
    }

    pub fn contains(&self, header: &str) -> bool {
        self.seen.contains(header)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Render `#include` lines.
    pub fn render(&self) -> String {
        self.order
            .iter()
            .map(|h| format!("#include \"{h}.h\"\n"))
            .collect()
    }
}
