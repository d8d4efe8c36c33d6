//! Statement compilation.
//!
//! A `let` statement carries one or more assignments. Each is routed by its
//! target; static property targets go to [`static_property`].

pub mod static_property;

use kiln_core::{CompilationError, CompiledExpression, Span};

use crate::context::CompilationContext;
use crate::resolve::ClassRef;

type Result<T> = std::result::Result<T, CompilationError>;

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignTarget {
    /// `Class::$property`, with the class part as written.
    StaticProperty { class: String, property: String },
    /// `$name`
    Variable { name: String },
    /// `$object->name`
    Property { object: String, name: String },
    /// `$variable[...]`
    ArrayIndex { variable: String },
}

impl AssignTarget {
    pub fn static_property(class: impl Into<String>, property: impl Into<String>) -> Self {
        AssignTarget::StaticProperty {
            class: class.into(),
            property: property.into(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            AssignTarget::StaticProperty { .. } => "static property",
            AssignTarget::Variable { .. } => "variable",
            AssignTarget::Property { .. } => "property",
            AssignTarget::ArrayIndex { .. } => "array index",
        }
    }
}

/// One `target = expr` with its already compiled right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: AssignTarget,
    pub expr: CompiledExpression,
    pub span: Span,
}

impl Assignment {
    pub fn new(target: AssignTarget, expr: CompiledExpression, span: Span) -> Self {
        Self { target, expr, span }
    }
}

/// `let a = x, b = y;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetStatement {
    pub assignments: Vec<Assignment>,
    pub span: Span,
}

impl LetStatement {
    pub fn new(span: Span) -> Self {
        Self {
            assignments: Vec::new(),
            span,
        }
    }

    pub fn assign(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }
}

/// Compiles statements into a [`CompilationContext`].
pub struct StmtCompiler<'c, 'a> {
    ctx: &'c mut CompilationContext<'a>,
}

impl<'c, 'a> StmtCompiler<'c, 'a> {
    pub fn new(ctx: &'c mut CompilationContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CompilationContext<'a> {
        self.ctx
    }

    /// Compile every assignment of a `let`, in order.
    ///
    /// Stops at the first failing assignment; earlier ones stay emitted.
    pub fn compile_let(&mut self, stmt: &LetStatement) -> Result<()> {
        for assignment in &stmt.assignments {
            self.compile_assignment(assignment)?;
        }
        Ok(())
    }

    fn compile_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        match &assignment.target {
            AssignTarget::StaticProperty { class, property } => static_property::assign(
                self.ctx,
                ClassRef::parse(class),
                property,
                &assignment.expr,
                assignment.span,
            ),
            other => Err(CompilationError::InvalidOperation {
                message: format!("assignment to a {} is not supported", other.describe()),
                span: assignment.span,
            }),
        }
    }

    /// Compile a loop body.
    ///
    /// The loop is exited again even when `body` fails.
    pub fn with_loop<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.ctx.enter_loop();
        let result = body(self);
        self.ctx.exit_loop();
        result
    }
}
