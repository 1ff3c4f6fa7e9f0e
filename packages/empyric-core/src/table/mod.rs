//! Table and column definitions.

mod column;
#[allow(clippy::module_inception)]
mod table;

pub use column::{Column, ColumnData};
pub use table::Table;
