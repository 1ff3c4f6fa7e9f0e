//! Predicate expression tree.

use std::fmt;

use crate::types::Value;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }

    /// Applies the operator to an ordering result. `None` (unordered, e.g.
    /// NaN) satisfies only `!=`.
    pub fn holds(self, ordering: Option<std::cmp::Ordering>) -> bool {
        use std::cmp::Ordering::*;
        match (self, ordering) {
            (CmpOp::Ne, None) => true,
            (_, None) => false,
            (CmpOp::Lt, Some(o)) => o == Less,
            (CmpOp::Le, Some(o)) => o != Greater,
            (CmpOp::Gt, Some(o)) => o == Greater,
            (CmpOp::Ge, Some(o)) => o != Less,
            (CmpOp::Eq, Some(o)) => o == Equal,
            (CmpOp::Ne, Some(o)) => o != Equal,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Literal operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(Value),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(v) => write!(f, "{}", v),
            Literal::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// Parsed predicate expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Comparison {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    /// Unary minus on a numeric operand
    Negate(Box<Expr>),
    Literal(Literal),
    ColumnRef(String),
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::ColumnRef(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Number(Value::Int(value)))
    }

    pub fn float(value: f64) -> Self {
        Expr::Literal(Literal::Number(Value::Float(value)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(value.into()))
    }

    pub fn compare(left: Expr, op: CmpOp, right: Expr) -> Self {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// Column names referenced anywhere in the expression, in order of appearance.
    pub fn column_refs(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_columns(&mut names);
        names
    }

    fn collect_columns<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::ColumnRef(name) => names.push(name),
            Expr::Literal(_) => {}
            Expr::Negate(inner) | Expr::Not(inner) => inner.collect_columns(names),
            Expr::And(l, r) | Expr::Or(l, r) => {
                l.collect_columns(names);
                r.collect_columns(names);
            }
            Expr::Comparison { left, right, .. } => {
                left.collect_columns(names);
                right.collect_columns(names);
            }
        }
    }

    /// Short description for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Expr::ColumnRef(name) => format!("column '{}'", name),
            Expr::Literal(Literal::Number(v)) => format!("number {}", v),
            Expr::Literal(Literal::Str(s)) => format!("string literal {:?}", s),
            Expr::Negate(_) => format!("numeric expression '{}'", self),
            _ => format!("boolean expression '{}'", self),
        }
    }
}

/// Fully parenthesized rendering.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::And(l, r) => write!(f, "({} and {})", l, r),
            Expr::Or(l, r) => write!(f, "({} or {})", l, r),
            Expr::Not(inner) => write!(f, "(not {})", inner),
            Expr::Negate(inner) => write!(f, "-{}", inner),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::ColumnRef(name) if is_plain_identifier(name) => f.write_str(name),
            Expr::ColumnRef(name) => write!(f, "`{}`", name),
        }
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !matches!(name, "and" | "or" | "not")
}
