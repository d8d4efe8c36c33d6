//! Compiled expression values handed to statement lowering.
//!
//! The expression sub-compiler reduces every right-hand side to a
//! [`CompiledExpression`]: a type tag from the closed [`ExprType`] set plus
//! the code fragment that produces the value.

use std::fmt;

/// Result kind of a compiled expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprType {
    Null,
    Int,
    Uint,
    Long,
    Ulong,
    Char,
    Uchar,
    Double,
    Bool,
    String,
    Istring,
    EmptyArray,
    Array,
    /// The value lives in a variable; the code fragment is its name.
    Variable,
}

impl ExprType {
    /// The tag's source-level name.
    pub fn name(self) -> &'static str {
        match self {
            ExprType::Null => "null",
            ExprType::Int => "int",
            ExprType::Uint => "uint",
            ExprType::Long => "long",
            ExprType::Ulong => "ulong",
            ExprType::Char => "char",
            ExprType::Uchar => "uchar",
            ExprType::Double => "double",
            ExprType::Bool => "bool",
            ExprType::String => "string",
            ExprType::Istring => "istring",
            ExprType::EmptyArray => "empty-array",
            ExprType::Array => "array",
            ExprType::Variable => "variable",
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An already-evaluated expression.
///
/// Produced once by the expression compiler and consumed once by lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    ty: ExprType,
    code: String,
    boolean_code: Option<String>,
}

impl CompiledExpression {
    /// Create an expression with an explicit tag and code fragment.
    pub fn new(ty: ExprType, code: impl Into<String>) -> Self {
        Self {
            ty,
            code: code.into(),
            boolean_code: None,
        }
    }

    pub fn null() -> Self {
        Self::new(ExprType::Null, "null")
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprType::Int, value.to_string())
    }

    pub fn uint(value: u64) -> Self {
        Self::new(ExprType::Uint, value.to_string())
    }

    pub fn long(value: i64) -> Self {
        Self::new(ExprType::Long, value.to_string())
    }

    /// A string literal. `literal` is the already-escaped string body.
    pub fn string(literal: impl Into<String>) -> Self {
        Self::new(ExprType::String, literal)
    }

    /// A boolean literal, with its truth value pre-rendered as `1`/`0`.
    pub fn bool(value: bool) -> Self {
        Self {
            ty: ExprType::Bool,
            code: if value { "true" } else { "false" }.to_string(),
            boolean_code: Some(if value { "1" } else { "0" }.to_string()),
        }
    }

    pub fn empty_array() -> Self {
        Self::new(ExprType::EmptyArray, "array()")
    }

    /// A reference to a variable by name.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(ExprType::Variable, name)
    }

    /// The expression's type tag.
    pub fn ty(&self) -> ExprType {
        self.ty
    }

    /// The code fragment that produces the value.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The rendered truth value; falls back to the plain code fragment.
    pub fn boolean_code(&self) -> &str {
        self.boolean_code.as_deref().unwrap_or(&self.code)
    }
}
