//! Data sources feeding a pod.
//!
//! A data source is a capability: something that can be asked for the next
//! unit of raw data. [`traits`] defines the shared interface, [`kafka`] the
//! message-queue backend, and [`registry`] the mapping from the `type` tag of
//! a pod document to a backend constructor.

#![warn(missing_docs, clippy::pedantic)]

pub mod kafka;
pub mod registry;
pub mod traits;

pub use kafka::{KafkaConfig, KafkaDataSource};
pub use registry::{DataSourceFactory, DataSourceKind, DataSourceRegistry, RegistryError};
pub use traits::{DataSource, DataSourceMetadata, FetchError, FetchResult};
