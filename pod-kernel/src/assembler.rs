//! Document-to-pod assembly pipeline.

use std::path::Path;

use pod_config::ConfigDocument;
use pod_datasource::DataSourceRegistry;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::error::{AssembleError, AssembleResult};
use crate::Pod;

const IN_MEMORY_PATH: &str = "<memory>";

/// Builds pods from pod documents.
///
/// The pipeline is linear and fail-fast: open, read, parse, resolve the data
/// source, populate the pod. Nothing is retried and no partially built pod is
/// ever returned.
#[derive(Debug, Clone)]
pub struct PodAssembler {
    registry: DataSourceRegistry,
}

impl Default for PodAssembler {
    fn default() -> Self {
        Self::with_registry(DataSourceRegistry::with_defaults())
    }
}

impl PodAssembler {
    /// Creates an assembler with every built-in data source backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assembler resolving data sources through `registry`.
    #[must_use]
    pub fn with_registry(registry: DataSourceRegistry) -> Self {
        Self { registry }
    }

    /// Returns the data source registry.
    #[must_use]
    pub fn registry(&self) -> &DataSourceRegistry {
        &self.registry
    }

    /// Assembles a pod from the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::Open`], [`AssembleError::Read`] or
    /// [`AssembleError::Parse`] for the step that failed. An unrecognised data
    /// source type is not an error; the pod is returned without one.
    pub async fn assemble(&self, path: impl AsRef<Path>) -> AssembleResult<Pod> {
        let path = path.as_ref();
        let bytes = read_document(path).await?;
        self.build(path, &bytes)
    }

    /// Assembles a pod from an in-memory document.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::Parse`] (with the path `<memory>`) when the
    /// bytes are not a valid pod document.
    pub fn assemble_slice(&self, bytes: &[u8]) -> AssembleResult<Pod> {
        self.build(Path::new(IN_MEMORY_PATH), bytes)
    }

    fn build(&self, path: &Path, bytes: &[u8]) -> AssembleResult<Pod> {
        let document = ConfigDocument::from_slice(bytes).map_err(|source| AssembleError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let data_source = self.registry.build(&document.datasource);
        let pod = Pod::from_document(document, data_source);

        info!(
            path = %path.display(),
            name = %pod.name(),
            version = %pod.version(),
            datasource = ?pod.data_source().map(|source| source.metadata().backend()),
            "assembled pod"
        );
        Ok(pod)
    }
}

async fn read_document(path: &Path) -> AssembleResult<Vec<u8>> {
    let mut file = File::open(path)
        .await
        .map_err(|source| AssembleError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .await
        .map_err(|source| AssembleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), len = bytes.len(), "read pod document");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssembleErrorKind;

    #[test]
    fn in_memory_parse_errors_use_placeholder_path() {
        let err = PodAssembler::new()
            .assemble_slice(b"name: [oops\n")
            .expect_err("unterminated flow sequence");

        assert_eq!(err.kind(), AssembleErrorKind::Parse);
        assert_eq!(err.path(), Path::new("<memory>"));
        assert!(err.to_string().starts_with("error while parsing <memory>"));
    }

    #[test]
    fn empty_registry_never_builds_a_source() {
        let assembler = PodAssembler::with_registry(DataSourceRegistry::new());
        let pod = assembler
            .assemble_slice(b"name: p\ndatasource:\n  type: kafka\n  topic: events\n")
            .unwrap();

        assert!(pod.data_source().is_none());
    }
}
