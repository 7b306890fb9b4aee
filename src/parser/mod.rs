//! Config parser (verb module)
//!
//! Transforms YAML files into an [`EngineConfig`].

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::{read_to_string, ParseError};

/// Parse an engine config from a YAML file
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ParseError> {
    parse_config_str(&read_to_string(path)?)
}

/// Parse an engine config from a YAML string.
///
/// An empty document yields the default config.
pub fn parse_config_str(yaml: &str) -> Result<EngineConfig, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MetricKeywords;
    use crate::summarizer::Locale;

    #[test]
    fn test_parse_config_fixture() {
        let config = parse_config_file("tests/test_data/config.yaml").unwrap();

        assert_eq!(config.fallback_tag, "heuristics-v1");
        assert_eq!(config.summarizer.locale, Locale::En);
        assert_eq!(config.generator.default_limit, Some(50));
        assert_eq!(config.generator.metric_keywords.avg, vec!["average", "mean", "平均"]);
        // sections not in the file keep their defaults
        assert_eq!(config.generator.metric_keywords.sum, MetricKeywords::default().sum);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config_str("").unwrap(), EngineConfig::default());
        assert_eq!(parse_config_str("summarizer: {}\n").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_config_str("generator: [1, 2").unwrap_err();
        assert!(matches!(err, ParseError::Yaml { .. }));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        assert!(parse_config_str("summarizer:\n  locale: fr\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_config_file("tests/test_data/missing.yaml").unwrap_err();
        assert!(matches!(err, ParseError::Io { path, .. } if path.ends_with("missing.yaml")));
    }
}
