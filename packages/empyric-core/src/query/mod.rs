//! Boolean predicate queries over tables.
//!
//! Predicates use a subset of the pandas `DataFrame.query` syntax:
//! comparisons (`<`, `<=`, `>`, `>=`, `==`, `!=`, chainable), combined with
//! `and`/`&`, `or`/`|` and `not`/`~`. Column names that are not plain
//! identifiers can be written in backticks.
//!
//! ```
//! use empyric_core::query;
//! use empyric_core::table::{Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::int("SiO2", vec![50, 55]),
//!     Column::int("MgO", vec![4, 6]),
//! ])
//! .unwrap();
//! let result = query::filter(&table, "SiO2 > 50").unwrap();
//! assert_eq!(result.num_rows(), 1);
//! ```

mod error;
mod eval;
mod expr;
mod lexer;
mod parser;

#[cfg(test)]
mod tests;

pub use error::QueryError;
pub use eval::evaluate;
pub use expr::{CmpOp, Expr, Literal};
pub use parser::{parse, MAX_DEPTH};

use crate::table::Table;

/// Parses `predicate` and evaluates it against `table`.
pub fn filter(table: &Table, predicate: &str) -> Result<Table, QueryError> {
    let expr = parse(predicate)?;
    evaluate(table, &expr)
}
