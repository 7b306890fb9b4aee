//! Error types for loading configuration, datasets and training sets

use thiserror::Error;

/// Errors that can occur while parsing files or text into nlquery types
#[derive(Debug, Error)]
pub enum ParseError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// YAML deserialization error
    #[error("Invalid YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
    /// JSON deserialization error
    #[error("Invalid JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    /// CSV decoding error
    #[error("Invalid CSV: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    /// A document that must be a JSON array was something else
    #[error("Expected a JSON list of {what}")]
    NotAList { what: &'static str },
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io {
            path: String::new(),
            source: err,
        }
    }
}

/// Read a file to a string, tagging IO failures with the path
pub(crate) fn read_to_string<P: AsRef<std::path::Path>>(path: P) -> Result<String, ParseError> {
    let path_str = path.as_ref().display().to_string();
    std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })
}
