//! Core storage and query engine for empyric.
//!
//! Stores two-dimensional numeric tables as compressed datasets inside a
//! hierarchical single-file container, and filters them with boolean
//! predicate expressions.
//!
//! ```no_run
//! use empyric_core::{DatasetStore, StoreConfig, Table, Column};
//!
//! # fn main() -> Result<(), empyric_core::StoreError> {
//! let store = DatasetStore::new(StoreConfig::new("geochem_data.h5"));
//! let table = Table::new(vec![
//!     Column::int("SiO2", vec![50, 55]),
//!     Column::int("MgO", vec![4, 6]),
//! ])?;
//! store.save(&table, "geochem", "samples")?;
//! let high_silica = store.query("geochem", "samples", "SiO2 > 50")?;
//! println!("{}", high_silica);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod io_utils;
pub mod query;
pub mod store;
pub mod table;
pub mod types;

pub use config::{StoreConfig, DEFAULT_CONTAINER_FILE};
pub use container::{AttrValue, Attributes, FileSource, MemorySource};
pub use error::StoreError;
pub use query::{Expr, QueryError};
pub use store::{DatasetStore, NodeEntry, NodeKind};
pub use table::{Column, ColumnData, Table};
pub use types::{DType, Value};
