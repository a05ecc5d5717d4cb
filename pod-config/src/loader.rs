//! Configuration loader implementations.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::schema::ConfigDocument;

/// The supplied bytes were not a well-formed pod document.
///
/// Covers both invalid YAML syntax and documents with the wrong shape, such as
/// a scalar where a mapping is expected.
#[derive(Debug, Error)]
#[error("invalid pod document: {source}")]
pub struct ParseError {
    #[from]
    source: serde_yaml::Error,
}

impl ParseError {
    /// Returns the one-based line and column of the failure, when known.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        self.source
            .location()
            .map(|location| (location.line(), location.column()))
    }
}

impl ConfigDocument {
    /// Parses a pod document from raw bytes.
    ///
    /// No field is required: an empty or `null` document yields
    /// [`ConfigDocument::default`]. Values are not validated here; the
    /// assembler decides what an unknown data source tag means.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the bytes are not valid YAML or do not match
    /// the document shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("empty pod document, using zero values");
            return Ok(Self::default());
        }

        let document = serde_yaml::from_slice::<Option<Self>>(bytes)?.unwrap_or_default();
        debug!(
            name = %document.name,
            version = %document.version,
            datasource = %document.datasource.kind,
            "parsed pod document"
        );
        Ok(document)
    }
}

impl FromStr for ConfigDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataSourceSection;
    use pod_primitives::Model;

    const FULL: &str = r#"
name: pod-a
version: "1.2.0"
datasource:
  name: clicks
  type: kafka
  brokers:
    - localhost:9092
    - localhost:9093
  topic: events
preprocessor:
  filename: p.py
  type: script
model:
  name: classifier
  filename: model.onnx
endpoint:
  name: sink
  type: http
  url: http://localhost:8080/out
  fields:
    label: class
    score: confidence
"#;

    #[test]
    fn parses_every_section() {
        let document: ConfigDocument = FULL.parse().unwrap();

        assert_eq!(document.name, "pod-a");
        assert_eq!(document.version, "1.2.0");
        assert_eq!(document.datasource.name, "clicks");
        assert_eq!(document.datasource.kind, "kafka");
        assert_eq!(
            document.datasource.brokers,
            vec!["localhost:9092".to_owned(), "localhost:9093".to_owned()]
        );
        assert_eq!(document.datasource.topic, "events");
        assert_eq!(document.datasource.group_id, None);
        assert_eq!(document.preprocessor.filename, "p.py");
        assert_eq!(document.preprocessor.kind, "script");
        assert_eq!(document.model.name, "classifier");
        assert_eq!(document.model.filename, "model.onnx");
        assert_eq!(document.endpoint.kind, "http");
        assert_eq!(document.endpoint.url, "http://localhost:8080/out");
        assert_eq!(
            document.endpoint.fields.get("score").map(String::as_str),
            Some("confidence")
        );
    }

    #[test]
    fn absent_sections_take_zero_values() {
        let document = ConfigDocument::from_slice(b"name: bare\nmodel:\n").unwrap();

        assert_eq!(document.name, "bare");
        assert!(document.version.is_empty());
        assert_eq!(document.datasource, DataSourceSection::default());
        assert_eq!(document.model, Model::default());
        assert!(document.endpoint.fields.is_empty());
    }

    #[test]
    fn empty_document_is_all_defaults() {
        assert_eq!(
            ConfigDocument::from_slice(b"").unwrap(),
            ConfigDocument::default()
        );
        assert_eq!(
            ConfigDocument::from_slice(b"  \n\n").unwrap(),
            ConfigDocument::default()
        );
    }

    #[test]
    fn null_document_is_all_defaults() {
        for source in ["~", "null\n", "---\n~\n"] {
            assert_eq!(
                ConfigDocument::from_slice(source.as_bytes()).unwrap(),
                ConfigDocument::default(),
                "document {source:?}"
            );
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let document = ConfigDocument::from_slice(b"name: x\nreplicas: 3\n").unwrap();
        assert_eq!(document.name, "x");
    }

    #[test]
    fn reads_optional_group_id() {
        let document = ConfigDocument::from_slice(
            b"datasource:\n  type: kafka\n  topic: events\n  group_id: pods\n",
        )
        .unwrap();
        assert_eq!(document.datasource.group_id.as_deref(), Some("pods"));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = ConfigDocument::from_slice(b"name: [unterminated\nversion: 1\n")
            .expect_err("flow sequence is never closed");
        assert!(err.to_string().starts_with("invalid pod document"));
    }

    #[test]
    fn rejects_scalar_where_mapping_expected() {
        let err = ConfigDocument::from_slice(b"name: pod\ndatasource: kafka\n")
            .expect_err("datasource must be a mapping");
        assert!(err.to_string().starts_with("invalid pod document"));
    }

    #[test]
    fn rejects_scalar_where_list_expected() {
        ConfigDocument::from_slice(b"datasource:\n  brokers: localhost:9092\n")
            .expect_err("brokers must be a sequence");
    }
}
