//! Predicate binding and row evaluation.
//!
//! Evaluation runs in two phases. Binding resolves every column reference
//! against the table and type-checks each node; only a fully bound predicate
//! is run against the rows, so a failing query never yields partial output.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::table::{ColumnData, Table};
use crate::types::Value;

use super::error::QueryError;
use super::expr::{CmpOp, Expr, Literal};

/// Filters `table` down to the rows where `expr` holds.
///
/// All columns are kept and rows stay in their original order.
pub fn evaluate(table: &Table, expr: &Expr) -> Result<Table, QueryError> {
    let predicate = bind(table, expr)?;
    let indices = matching_rows(&predicate, table.num_rows());
    tracing::debug!(
        predicate = %expr,
        scanned = table.num_rows(),
        matched = indices.len(),
        "predicate evaluated"
    );
    Ok(table.take_rows(&indices))
}

#[cfg(not(feature = "parallel"))]
fn matching_rows(predicate: &Predicate<'_>, rows: usize) -> Vec<usize> {
    (0..rows).filter(|&row| predicate.matches(row)).collect()
}

#[cfg(feature = "parallel")]
fn matching_rows(predicate: &Predicate<'_>, rows: usize) -> Vec<usize> {
    (0..rows)
        .into_par_iter()
        .filter(|&row| predicate.matches(row))
        .collect()
}

/// Boolean node with columns resolved.
#[derive(Debug)]
enum Predicate<'t> {
    Compare {
        op: CmpOp,
        left: Operand<'t>,
        right: Operand<'t>,
    },
    And(Box<Predicate<'t>>, Box<Predicate<'t>>),
    Or(Box<Predicate<'t>>, Box<Predicate<'t>>),
    Not(Box<Predicate<'t>>),
    /// Comparison between two constants, folded at bind time
    Const(bool),
}

/// Numeric value source with columns resolved.
#[derive(Debug)]
enum Operand<'t> {
    Column(&'t ColumnData),
    Number(Value),
    Neg(Box<Operand<'t>>),
}

impl Predicate<'_> {
    fn matches(&self, row: usize) -> bool {
        match self {
            Predicate::Compare { op, left, right } => {
                op.holds(compare_values(left.value(row), right.value(row)))
            }
            Predicate::And(l, r) => l.matches(row) && r.matches(row),
            Predicate::Or(l, r) => l.matches(row) || r.matches(row),
            Predicate::Not(inner) => !inner.matches(row),
            Predicate::Const(value) => *value,
        }
    }
}

impl Operand<'_> {
    fn value(&self, row: usize) -> Value {
        match self {
            Operand::Column(ColumnData::Int64(v)) => Value::Int(v[row]),
            Operand::Column(ColumnData::Float64(v)) => Value::Float(v[row]),
            Operand::Number(v) => *v,
            Operand::Neg(inner) => inner.value(row).negate(),
        }
    }
}

/// `Int` against `Int` compares exactly; anything else compares as `f64`.
fn compare_values(left: Value, right: Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(&b)),
        (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    }
}

fn bind<'t>(table: &'t Table, expr: &Expr) -> Result<Predicate<'t>, QueryError> {
    // Report missing columns ahead of any type error
    if let Some(missing) = expr
        .column_refs()
        .into_iter()
        .find(|name| table.column(name).is_none())
    {
        return Err(QueryError::UnknownColumn {
            column: missing.to_string(),
        });
    }
    bind_predicate(table, expr)
}

fn bind_predicate<'t>(table: &'t Table, expr: &Expr) -> Result<Predicate<'t>, QueryError> {
    match expr {
        Expr::And(l, r) => Ok(Predicate::And(
            Box::new(bind_predicate(table, l)?),
            Box::new(bind_predicate(table, r)?),
        )),
        Expr::Or(l, r) => Ok(Predicate::Or(
            Box::new(bind_predicate(table, l)?),
            Box::new(bind_predicate(table, r)?),
        )),
        Expr::Not(inner) => Ok(Predicate::Not(Box::new(bind_predicate(table, inner)?))),
        Expr::Comparison { op, left, right } => bind_comparison(table, *op, left, right),
        other => Err(QueryError::mismatch("boolean expression", other.describe())),
    }
}

fn bind_comparison<'t>(
    table: &'t Table,
    op: CmpOp,
    left: &Expr,
    right: &Expr,
) -> Result<Predicate<'t>, QueryError> {
    match (left, right) {
        (Expr::Literal(Literal::Str(a)), Expr::Literal(Literal::Str(b))) => {
            Ok(Predicate::Const(op.holds(Some(a.cmp(b)))))
        }
        (Expr::Literal(Literal::Str(_)), other) | (other, Expr::Literal(Literal::Str(_))) => {
            Err(QueryError::mismatch("string", other.describe()))
        }
        _ => {
            let left = bind_operand(table, left)?;
            let right = bind_operand(table, right)?;
            match (&left, &right) {
                (Operand::Number(a), Operand::Number(b)) => {
                    Ok(Predicate::Const(op.holds(compare_values(*a, *b))))
                }
                _ => Ok(Predicate::Compare { op, left, right }),
            }
        }
    }
}

fn bind_operand<'t>(table: &'t Table, expr: &Expr) -> Result<Operand<'t>, QueryError> {
    match expr {
        Expr::ColumnRef(name) => table
            .column(name)
            .map(|c| Operand::Column(&c.data))
            .ok_or_else(|| QueryError::UnknownColumn {
                column: name.clone(),
            }),
        Expr::Literal(Literal::Number(v)) => Ok(Operand::Number(*v)),
        Expr::Negate(inner) => match bind_operand(table, inner)? {
            Operand::Number(v) => Ok(Operand::Number(v.negate())),
            operand => Ok(Operand::Neg(Box::new(operand))),
        },
        other => Err(QueryError::mismatch("numeric operand", other.describe())),
    }
}
