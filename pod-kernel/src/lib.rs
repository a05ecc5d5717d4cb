//! Pod assembly runtime.
//!
//! A [`Pod`] bundles a live data source with the descriptors of the stages
//! that consume its data. [`PodAssembler`] builds one from a YAML document:
//!
//! ```no_run
//! # async fn run() -> Result<(), pod_kernel::AssembleError> {
//! let pod = pod_kernel::assemble("pod.yaml").await?;
//! if let Some(source) = pod.data_source() {
//!     let _payload = source.fetch().await;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::pedantic)]

mod assembler;
mod error;

use std::fmt;
use std::path::Path;

use pod_config::ConfigDocument;
use pod_datasource::DataSource;
use pod_primitives::{Endpoint, Model, Preprocessor};

pub use assembler::PodAssembler;
pub use error::{AssembleError, AssembleErrorKind, AssembleResult};

/// Assembled pod: a data source plus the descriptors of its downstream stages.
///
/// The pod owns its data source for its whole lifetime. The source is absent
/// when the document named a data source type no backend recognises.
pub struct Pod {
    name: String,
    version: String,
    data_source: Option<Box<dyn DataSource>>,
    preprocessor: Preprocessor,
    model: Model,
    endpoint: Endpoint,
}

impl fmt::Debug for Pod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pod")
            .field("name", &self.name)
            .field("version", &self.version)
            .field(
                "data_source",
                &self.data_source.as_ref().map(|source| source.metadata()),
            )
            .field("preprocessor", &self.preprocessor)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Pod {
    pub(crate) fn from_document(
        document: ConfigDocument,
        data_source: Option<Box<dyn DataSource>>,
    ) -> Self {
        let ConfigDocument {
            name,
            version,
            datasource: _,
            preprocessor,
            model,
            endpoint,
        } = document;

        Self {
            name,
            version,
            data_source,
            preprocessor,
            model,
            endpoint,
        }
    }

    /// Returns the pod name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pod version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the data source, if the document named a known backend.
    #[must_use]
    pub fn data_source(&self) -> Option<&dyn DataSource> {
        self.data_source.as_deref()
    }

    /// Returns the preprocessing stage descriptor.
    #[must_use]
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Returns the model descriptor.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the output endpoint descriptor.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

/// Assembles a pod from the document at `path` with the default backends.
///
/// # Errors
///
/// See [`PodAssembler::assemble`].
pub async fn assemble(path: impl AsRef<Path>) -> AssembleResult<Pod> {
    PodAssembler::new().assemble(path).await
}
