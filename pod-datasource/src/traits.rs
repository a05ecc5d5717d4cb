//! Shared data source trait and error types.

use async_trait::async_trait;
use bytes::Bytes;
use rdkafka::error::KafkaError;
use thiserror::Error;

/// Result alias used by data sources.
pub type FetchResult<T> = Result<T, FetchError>;

/// Error returned when a data source cannot produce its next unit of data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The Kafka consumer could not be created or failed to read a message.
    #[error("error while fetching from kafka topic `{topic}`: {source}")]
    Kafka {
        /// Topic the consumer is bound to.
        topic: String,
        /// Underlying client error.
        #[source]
        source: KafkaError,
    },
}

impl FetchError {
    /// Convenience constructor for Kafka transport failures.
    #[must_use]
    pub fn kafka(topic: impl Into<String>, source: KafkaError) -> Self {
        Self::Kafka {
            topic: topic.into(),
            source,
        }
    }
}

/// Describes a data source instance without touching its transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSourceMetadata {
    backend: &'static str,
    name: String,
    addresses: Vec<String>,
    stream: String,
}

impl DataSourceMetadata {
    /// Creates metadata for the supplied backend tag and source name.
    #[must_use]
    pub fn new(backend: &'static str, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
            addresses: Vec::new(),
            stream: String::new(),
        }
    }

    /// Sets the network addresses the source reads from.
    #[must_use]
    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = addresses;
        self
    }

    /// Sets the stream (topic, queue, ...) the source is bound to.
    #[must_use]
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    /// Returns the backend tag (e.g. "kafka").
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        self.backend
    }

    /// Returns the configured source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the network addresses.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Returns the stream the source is bound to.
    #[must_use]
    pub fn stream(&self) -> &str {
        &self.stream
    }
}

/// Trait implemented by all data source backends.
///
/// Implementations add no synchronization of their own; concurrent calls to
/// [`DataSource::fetch`] are only as safe as the backend client allows.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Returns metadata describing the source.
    fn metadata(&self) -> &DataSourceMetadata;

    /// Waits for the next unit of raw data and returns its bytes.
    ///
    /// There is no timeout: the call waits until data arrives or the
    /// transport fails. Wrap it in `tokio::time::timeout` for a bound.
    async fn fetch(&self) -> FetchResult<Bytes>;
}
