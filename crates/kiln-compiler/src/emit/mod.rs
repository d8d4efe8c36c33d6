//! Instruction emitter for the kiln backend.
//!
//! The [`CodeEmitter`] is an append-only, ordered sink of [`Instruction`]s:
//! calls against the host runtime's fixed set of value and object-model
//! primitives. Instructions are kept typed until [`CodeEmitter::render`]
//! turns them into C statements.
//!
//! # Example
//!
//! ```
//! use kiln_compiler::emit::{CodeEmitter, Instruction};
//! use kiln_compiler::CodegenConfig;
//!
//! let mut emitter = CodeEmitter::new();
//! emitter.set_line(3);
//! emitter.output(Instruction::BoxLong { target: "_0".into(), value: "5".into() });
//!
//! assert_eq!(emitter.render(&CodegenConfig::new()), "ZVAL_LONG(_0, 5);\n");
//! ```

mod headers;

pub use headers::{HeadersManager, OBJECT_HEADER};

use kiln_core::ClassHandle;

use crate::config::{CodegenConfig, CodegenProperty};

/// Value stored into a static property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    /// The shared null singleton.
    Null,
    /// The shared true singleton.
    True,
    /// The shared false singleton.
    False,
    /// A value cell held in a variable.
    Variable(String),
}

impl StoreValue {
    fn render(&self) -> String {
        match self {
            StoreValue::Null => "KILN_GLOBAL(global_null)".to_string(),
            StoreValue::True => "KILN_GLOBAL(global_true)".to_string(),
            StoreValue::False => "KILN_GLOBAL(global_false)".to_string(),
            StoreValue::Variable(name) => name.clone(),
        }
    }
}

/// A single runtime call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Allocate a fresh value cell that is not reference counted yet.
    InitNonReferenced { target: String },
    /// Materialize a long value into a cell.
    BoxLong { target: String, value: String },
    /// Materialize a boolean value into a cell.
    BoxBool { target: String, value: String },
    /// Copy a string literal into a cell the cell owns.
    CopyString { target: String, literal: String },
    /// Initialize a cell as a fresh empty array.
    InitArray { target: String },
    /// Store a value into a class's static property.
    ///
    /// With `cache`, the runtime remembers the resolved slot in that variable
    /// across calls.
    UpdateStaticProperty {
        class: ClassHandle,
        property: String,
        value: StoreValue,
        cache: Option<String>,
    },
    /// Pre-rendered text from another code generator.
    Raw(String),
}

impl Instruction {
    /// Render as a C statement.
    pub fn render(&self, config: &CodegenConfig) -> String {
        let tsrm = if config.is_enabled(CodegenProperty::ThreadSafeArguments) {
            " TSRMLS_CC"
        } else {
            ""
        };

        match self {
            Instruction::InitNonReferenced { target } => {
                format!("KILN_INIT_ZVAL_NREF({target});")
            }
            Instruction::BoxLong { target, value } => format!("ZVAL_LONG({target}, {value});"),
            Instruction::BoxBool { target, value } => format!("ZVAL_BOOL({target}, {value});"),
            Instruction::CopyString { target, literal } => {
                format!("ZVAL_STRING({target}, \"{literal}\", 1);")
            }
            Instruction::InitArray { target } => format!("array_init({target});"),
            Instruction::UpdateStaticProperty {
                class,
                property,
                value,
                cache: None,
            } => format!(
                "kiln_update_static_property_ce({class}, SL(\"{property}\"), {}{tsrm});",
                value.render()
            ),
            Instruction::UpdateStaticProperty {
                class,
                property,
                value,
                cache: Some(cache),
            } => format!(
                "kiln_update_static_property_ce_cache({class}, SL(\"{property}\"), {}, &{cache}{tsrm});",
                value.render()
            ),
            Instruction::Raw(text) => text.clone(),
        }
    }
}

/// An instruction with its source line and indentation level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedLine {
    pub instruction: Instruction,
    pub line: u32,
    pub level: u32,
}

/// Emits instructions for one compilation unit.
#[derive(Debug)]
pub struct CodeEmitter {
    lines: Vec<EmittedLine>,
    /// Current source line for debug info
    current_line: u32,
    /// Current indentation level
    level: u32,
}

impl CodeEmitter {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            current_line: 1,
            level: 0,
        }
    }

    /// Set current source line.
    ///
    /// All subsequent instructions will be associated with this line number.
    pub fn set_line(&mut self, line: u32) {
        self.current_line = line;
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    pub fn increase_level(&mut self) {
        self.level += 1;
    }

    pub fn decrease_level(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Append an instruction.
    pub fn output(&mut self, instruction: Instruction) {
        self.lines.push(EmittedLine {
            instruction,
            line: self.current_line,
            level: self.level,
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Emitted lines in emission order.
    pub fn lines(&self) -> &[EmittedLine] {
        &self.lines
    }

    /// Emitted instructions in emission order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.lines.iter().map(|l| &l.instruction)
    }

    /// Render every instruction, one per line, indented by level.
    pub fn render(&self, config: &CodegenConfig) -> String {
        let width = config.get(CodegenProperty::IndentWidth);
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&" ".repeat(width * line.level as usize));
            out.push_str(&line.instruction.render(config));
            out.push('\n');
        }
        out
    }

    /// Consume the emitter, returning its lines.
    pub fn finish(self) -> Vec<EmittedLine> {
        self.lines
    }
}

impl Default for CodeEmitter {
    fn default() -> Self {
        Self::new()
    }
}
