//! Storage kinds of compiler variables.

use std::fmt;

/// How a variable is stored in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Int,
    Uint,
    Long,
    Ulong,
    Char,
    Uchar,
    Double,
    Bool,
    String,
    Array,
    /// A dynamically typed value cell.
    Variable,
    /// A resolved static-property slot used by cached stores.
    PropertyInfo,
}

impl VariableKind {
    /// The kind's source-level name.
    pub fn name(self) -> &'static str {
        match self {
            VariableKind::Int => "int",
            VariableKind::Uint => "uint",
            VariableKind::Long => "long",
            VariableKind::Ulong => "ulong",
            VariableKind::Char => "char",
            VariableKind::Uchar => "uchar",
            VariableKind::Double => "double",
            VariableKind::Bool => "bool",
            VariableKind::String => "string",
            VariableKind::Array => "array",
            VariableKind::Variable => "variable",
            VariableKind::PropertyInfo => "zend_property_info",
        }
    }

    /// The C declaration type.
    pub fn c_type(self) -> &'static str {
        match self {
            VariableKind::Int => "int",
            VariableKind::Uint => "unsigned int",
            VariableKind::Long => "long",
            VariableKind::Ulong => "unsigned long",
            VariableKind::Char => "char",
            VariableKind::Uchar => "unsigned char",
            VariableKind::Double => "double",
            VariableKind::Bool => "zend_bool",
            VariableKind::String | VariableKind::Array | VariableKind::Variable => "zval",
            VariableKind::PropertyInfo => "zend_property_info",
        }
    }

    /// Whether the declaration is a pointer.
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            VariableKind::String
                | VariableKind::Array
                | VariableKind::Variable
                | VariableKind::PropertyInfo
        )
    }

    /// Integer-family kinds box into a long value cell.
    pub fn is_integer_family(self) -> bool {
        matches!(
            self,
            VariableKind::Int
                | VariableKind::Uint
                | VariableKind::Long
                | VariableKind::Ulong
                | VariableKind::Char
                | VariableKind::Uchar
        )
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
