//! Registry mapping data source tags to backend constructors.

use std::collections::HashMap;
use std::fmt;

use pod_config::DataSourceSection;
use thiserror::Error;
use tracing::{debug, warn};

use crate::kafka::{KafkaConfig, KafkaDataSource};
use crate::traits::DataSource;

/// Constructor turning a `datasource` section into a live data source.
pub type DataSourceFactory = fn(&DataSourceSection) -> Box<dyn DataSource>;

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Closed set of data source backends known to the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataSourceKind {
    /// Kafka topic consumer, tag `kafka`.
    Kafka,
}

impl DataSourceKind {
    /// Every backend kind, in tag order.
    pub const ALL: [Self; 1] = [Self::Kafka];

    /// Resolves a document tag. Matching is exact; unknown or empty tags
    /// return `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Returns the tag used in pod documents.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Kafka => "kafka",
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Errors surfaced while configuring the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A factory for this backend is already registered.
    #[error("data source backend `{kind}` already registered")]
    Duplicate {
        /// Backend that was registered twice.
        kind: DataSourceKind,
    },
}

/// Maps backend kinds to the factories that construct them.
#[derive(Clone, Default)]
pub struct DataSourceRegistry {
    factories: HashMap<DataSourceKind, DataSourceFactory>,
}

impl fmt::Debug for DataSourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.factories.keys().map(|kind| kind.tag()).collect();
        f.debug_struct("DataSourceRegistry")
            .field("registered", &kinds)
            .finish()
    }
}

impl DataSourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in backend registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut factories = HashMap::new();
        factories.insert(DataSourceKind::Kafka, kafka_factory as DataSourceFactory);
        Self { factories }
    }

    /// Registers a factory for a backend.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the backend already has one.
    pub fn register(
        &mut self,
        kind: DataSourceKind,
        factory: DataSourceFactory,
    ) -> RegistryResult<()> {
        if self.factories.contains_key(&kind) {
            return Err(RegistryError::Duplicate { kind });
        }
        self.factories.insert(kind, factory);
        Ok(())
    }

    /// Installs a factory for a backend, returning the one it replaced.
    pub fn replace(
        &mut self,
        kind: DataSourceKind,
        factory: DataSourceFactory,
    ) -> Option<DataSourceFactory> {
        self.factories.insert(kind, factory)
    }

    /// Returns `true` when the backend has a factory.
    #[must_use]
    pub fn contains(&self, kind: DataSourceKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Builds the data source described by a `datasource` section.
    ///
    /// An unrecognised tag is not an error: the pod simply has no data
    /// source. The same applies to a known tag with no registered factory.
    #[must_use]
    pub fn build(&self, section: &DataSourceSection) -> Option<Box<dyn DataSource>> {
        let Some(kind) = DataSourceKind::from_tag(&section.kind) else {
            warn!(
                tag = %section.kind,
                name = %section.name,
                "unknown data source type, pod will have no data source"
            );
            return None;
        };

        let Some(factory) = self.factories.get(&kind) else {
            warn!(%kind, "no factory registered for data source type");
            return None;
        };

        debug!(%kind, name = %section.name, "constructing data source");
        Some(factory(section))
    }
}

fn kafka_factory(section: &DataSourceSection) -> Box<dyn DataSource> {
    Box::new(KafkaDataSource::new(KafkaConfig::from_section(section)))
}
