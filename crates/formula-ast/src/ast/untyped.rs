//! Untyped syntax tree produced by the parser.
//!
//! Only syntactic structure and source locations; types are attached by the
//! checker, which turns a [`Program`] into a [`TyProgram`](super::TyProgram)
//! with one annotated node per node here.
//!
//! Operators are kept as [`ExprKind::Binary`] / [`ExprKind::Unary`] so
//! diagnostics can point at them, but they carry no semantics of their own:
//! the checker treats them as calls to [`BinaryOp::function_name`] and
//! [`UnaryOp::function_name`].

use crate::foundation::{Span, Value};

/// Untyped expression with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Expression variant
    pub kind: ExprKind,
    /// Source location
    pub span: Span,
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Literal payload if this is a literal, looking through a negation.
    pub fn as_literal(&self) -> Option<Value> {
        match &self.kind {
            ExprKind::Literal(value) => Some(*value),
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => match operand.as_literal()? {
                Value::Int(i) => Some(Value::Int(-i)),
                Value::Float(f) => Some(Value::Float(-f)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Untyped expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric or boolean literal
    Literal(Value),
    /// Variable reference
    Name(String),
    /// Call by name
    Call {
        /// Function name as written
        name: String,
        /// Arguments in call order
        args: Vec<Expr>,
    },
    /// Binary operator
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
    /// Unary operator
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },
    /// Parenthesized component list `(x, y, z)`
    Vector(Vec<Expr>),
}

/// Binary operators, each standing for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `^`
    Pow,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `and`
    And,
    /// `or`
    Or,
}

impl BinaryOp {
    /// Name of the function this operator calls.
    pub fn function_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Pow => "pow",
            BinaryOp::Lt => "less_than",
            BinaryOp::Le => "less_equal",
            BinaryOp::Gt => "greater_than",
            BinaryOp::Ge => "greater_equal",
            BinaryOp::Eq => "equal",
            BinaryOp::Ne => "not_equal",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

/// Unary operators, each standing for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `not x` / `!x`
    Not,
}

impl UnaryOp {
    /// Name of the function this operator calls.
    pub fn function_name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Not => "not",
        }
    }
}

/// Assignment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Variable name
    pub name: String,
    /// Source location of the name
    pub span: Span,
}

/// Untyped top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// Statement variant
    pub kind: StmtKind,
    /// Source location
    pub span: Span,
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Bare expression
    Expr(Expr),
    /// `a = expr`, or the structured form `a, b = expr`
    Assign {
        /// One target, or several for structured assignment
        targets: Vec<Target>,
        /// Right-hand side
        value: Expr,
    },
}

/// Parsed source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Stmt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: Value) -> Expr {
        Expr::new(ExprKind::Literal(value), Span::zero(0))
    }

    #[test]
    fn test_as_literal_folds_negation() {
        let neg = Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(lit(Value::Float(2.5))),
            },
            Span::zero(0),
        );
        assert_eq!(neg.as_literal(), Some(Value::Float(-2.5)));
        assert_eq!(lit(Value::Int(3)).as_literal(), Some(Value::Int(3)));
    }

    #[test]
    fn test_as_literal_rejects_non_literals() {
        let name = Expr::new(ExprKind::Name("x".into()), Span::zero(0));
        assert_eq!(name.as_literal(), None);

        let not_bool = Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(lit(Value::Bool(true))),
            },
            Span::zero(0),
        );
        assert_eq!(not_bool.as_literal(), None);
    }

    #[test]
    fn test_operator_function_names() {
        assert_eq!(BinaryOp::Add.function_name(), "add");
        assert_eq!(BinaryOp::Ge.function_name(), "greater_equal");
        assert_eq!(UnaryOp::Not.function_name(), "not");
    }
}
