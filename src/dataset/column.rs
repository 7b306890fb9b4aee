//! Column metadata supplied by the dataset store

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Inferred type of a dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Free text, or a column mixing text and numbers
    Text,
    /// Integers and/or floats only
    Number,
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Number => write!(f, "number"),
        }
    }
}

/// Error when parsing a column type string
#[derive(Debug, Clone)]
pub struct ParseColumnTypeError {
    pub input: String,
}

impl fmt::Display for ParseColumnTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid column type '{}': expected text or number", self.input)
    }
}

impl std::error::Error for ParseColumnTypeError {}

impl FromStr for ColumnType {
    type Err = ParseColumnTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "string" | "varchar" => Ok(ColumnType::Text),
            "number" | "numeric" | "int" | "integer" | "float" | "double" => Ok(ColumnType::Number),
            _ => Err(ParseColumnTypeError {
                input: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ColumnType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// A column of a dataset with its inferred type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    #[serde(default)]
    pub data_type: ColumnType,
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the column identifies a row (year, code, ...)
    #[serde(default)]
    pub is_index: bool,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            description: None,
            is_index: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Number)
    }

    pub fn indexed(mut self) -> Self {
        self.is_index = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
