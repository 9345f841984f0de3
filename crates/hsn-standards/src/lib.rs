#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod loader;
pub mod paths;

pub use crate::error::TableError;
pub use crate::loader::{
    CsvTableLoader, LoadedTable, MemoryTable, TableLayout, TableLoader, TableSource,
    read_code_table,
};
pub use crate::paths::{DEFAULT_TABLE_PATH, TABLE_ENV_VAR, resolve_table_path, table_path};
