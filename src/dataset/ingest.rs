//! CSV ingestion: cell parsing and column type inference

use regex::Regex;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::LazyLock;

use super::column::{ColumnMetadata, ColumnType};
use super::snapshot::Row;
use super::value::Value;
use crate::error::ParseError;

static INT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("Invalid regex"));
static FLOAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.\d+$").expect("Invalid regex"));
static INDEX_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)year|年度|month|code|コード").expect("Invalid regex"));

/// Convert a raw CSV cell into a typed value.
///
/// Blank cells become `Null`; plain integers and decimals become numbers
/// (an integer too large for i64 stays text); anything else is trimmed text.
pub fn parse_value(cell: &str) -> Value {
    let stripped = cell.trim();
    if stripped.is_empty() {
        return Value::Null;
    }
    if INT_PATTERN.is_match(stripped) {
        if let Ok(i) = stripped.parse::<i64>() {
            return Value::Int(i);
        }
    } else if FLOAT_PATTERN.is_match(stripped) {
        if let Ok(f) = stripped.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::Text(stripped.to_string())
}

/// Infer column metadata from parsed rows.
///
/// A column is `number` when it holds at least one number and no text.
/// Index columns are the ones listed in `index_columns`, or, when no list is
/// given, those whose name looks like a year/month/code key.
pub fn infer_columns(
    headers: &[String],
    rows: &[Row],
    index_columns: Option<&[String]>,
) -> Vec<ColumnMetadata> {
    if rows.is_empty() {
        return Vec::new();
    }

    headers
        .iter()
        .map(|name| {
            let (mut numbers, mut texts) = (0usize, 0usize);
            for value in rows.iter().filter_map(|r| r.get(name)) {
                match value {
                    Value::Int(_) | Value::Float(_) => numbers += 1,
                    Value::Text(_) => texts += 1,
                    Value::Null => {}
                }
            }

            let data_type = if numbers > 0 && texts == 0 {
                ColumnType::Number
            } else {
                ColumnType::Text
            };
            let is_index = match index_columns {
                Some(list) => list.iter().any(|c| c == name),
                None => INDEX_NAME_PATTERN.is_match(name),
            };

            ColumnMetadata {
                name: name.clone(),
                data_type,
                description: None,
                is_index,
            }
        })
        .collect()
}

/// Pick the non-null index column values out of a row
pub fn extract_index_cols(row: &Row, columns: &[ColumnMetadata]) -> BTreeMap<String, Value> {
    columns
        .iter()
        .filter(|c| c.is_index)
        .filter_map(|c| match row.get(&c.name) {
            Some(value) if !value.is_null() => Some((c.name.clone(), value.clone())),
            _ => None,
        })
        .collect()
}

/// Read a headed CSV document into its header list and parsed rows
pub fn read_csv<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Row>), ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record.get(i).map(parse_value).unwrap_or(Value::Null);
                (header.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok((headers, rows))
}
