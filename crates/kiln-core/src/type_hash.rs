//! Deterministic hash-based class identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a class's fully qualified
//! name. Class names are case-insensitive, so the name is folded to lowercase
//! before hashing: `Foo\Bar` and `foo\bar` produce the same hash.
//!
//! # Examples
//!
//! ```
//! use kiln_core::TypeHash;
//!
//! let a = TypeHash::from_name("App\\Models\\User");
//! let b = TypeHash::from_name("app\\models\\user");
//! assert_eq!(a, b);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Domain marker for class hashes
    pub const CLASS: u64 = 0x2fac10b63a6cc57c;
}

/// A deterministic 64-bit hash identifying a class.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a hash from a fully qualified class name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        let folded = name.trim_start_matches('\\').to_ascii_lowercase();
        TypeHash(hash_constants::CLASS ^ xxh64(folded.as_bytes(), 0))
    }

    /// Check if this is the empty hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw 64-bit value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
