//! Dataset metadata and materialized row snapshots

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::column::ColumnMetadata;
use super::ingest::{infer_columns, read_csv};
use super::value::Value;
use crate::error::ParseError;

/// One dataset record: column name to cell value
pub type Row = BTreeMap<String, Value>;

/// Descriptive metadata of a dataset, as handed over by the dataset store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl DatasetMeta {
    pub fn new(id: i64, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            id,
            columns,
            ..Default::default()
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric columns in declaration order
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter().filter(|c| c.data_type.is_numeric())
    }
}

/// Metadata plus the rows of a dataset, materialized for a single query
#[derive(Debug, Clone, Default)]
pub struct DatasetSnapshot {
    pub meta: DatasetMeta,
    pub rows: Vec<Row>,
}

impl DatasetSnapshot {
    pub fn new(meta: DatasetMeta, rows: Vec<Row>) -> Self {
        Self { meta, rows }
    }

    /// Load a snapshot from a CSV file with a header row, inferring column
    /// types from the cells
    pub fn from_csv_path<P: AsRef<Path>>(
        id: i64,
        path: P,
        index_columns: Option<&[String]>,
    ) -> Result<Self, ParseError> {
        let path_str = path.as_ref().display().to_string();
        let file = std::fs::File::open(&path).map_err(|e| ParseError::Io {
            path: path_str,
            source: e,
        })?;
        let (headers, rows) = read_csv(file)?;
        let columns = infer_columns(&headers, &rows, index_columns);

        let slug = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());

        Ok(Self {
            meta: DatasetMeta {
                id,
                slug: slug.clone(),
                name: slug,
                columns,
                ..Default::default()
            },
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
