//! Dataset types (nouns)
//!
//! Column metadata, cell values and materialized row snapshots, plus the
//! CSV ingestion helpers that produce them.

mod column;
mod ingest;
mod snapshot;
mod value;

pub use column::{ColumnMetadata, ColumnType, ParseColumnTypeError};
pub use ingest::{extract_index_cols, infer_columns, parse_value, read_csv};
pub use snapshot::{DatasetMeta, DatasetSnapshot, Row};
pub use value::Value;
