use std::fmt;

use crate::TypeHash;

/// Fully qualified class name used as the identity key during compilation.
///
/// Namespaces are separated by `\`. A leading separator marks an absolute
/// name and is dropped when parsing.
///
/// # Examples
///
/// ```
/// use kiln_core::QualifiedName;
///
/// let user = QualifiedName::global("User");
/// assert_eq!(user.to_string(), "User");
///
/// let model = QualifiedName::new("User", vec!["App".into(), "Models".into()]);
/// assert_eq!(model.to_string(), "App\\Models\\User");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "User")
    pub name: String,
    /// Namespace path (e.g., ["App", "Models"]), empty for the global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Namespace separator.
    pub const SEPARATOR: char = '\\';

    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Parse a qualified string such as `App\Models\User`.
    ///
    /// The last segment is the name, the rest is the namespace. A leading
    /// separator is ignored: `\App\User` == `App\User`.
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split(Self::SEPARATOR)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            None => Self::global(""),
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Compute the case-insensitive identity hash of this name.
    pub fn to_type_hash(&self) -> TypeHash {
        TypeHash::from_name(&self.to_string())
    }

    /// Runtime symbol prefix: lowercased segments joined by `_`.
    ///
    /// `App\Models\User` becomes `app_models_user`.
    pub fn symbol_prefix(&self) -> String {
        self.namespace
            .iter()
            .chain(std::iter::once(&self.name))
            .map(|s| s.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ns in &self.namespace {
            write!(f, "{}{}", ns, Self::SEPARATOR)?;
        }
        write!(f, "{}", self.name)
    }
}
