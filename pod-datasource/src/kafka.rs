//! Kafka consumer backend.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use pod_config::DataSourceSection;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::{KafkaError, KafkaResult};
use rdkafka::message::Message;
use rdkafka::{Offset, TopicPartitionList};
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::traits::{DataSource, DataSourceMetadata, FetchError, FetchResult};

/// Backend tag reported in [`DataSourceMetadata`].
pub const BACKEND: &str = "kafka";

/// Smallest batch the broker should return for a fetch (10 KB).
pub const DEFAULT_MIN_BYTES: usize = 10_000;

/// Largest batch the broker may return for a fetch (10 MB).
pub const DEFAULT_MAX_BYTES: usize = 10_000_000;

const DIRECT_PARTITION: i32 = 0;

/// Configuration for the Kafka data source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KafkaConfig {
    name: String,
    brokers: Vec<String>,
    topic: String,
    group_id: Option<String>,
    min_bytes: usize,
    max_bytes: usize,
}

impl KafkaConfig {
    /// Creates a configuration for the supplied brokers and topic using the
    /// default fetch sizes.
    #[must_use]
    pub fn new(brokers: Vec<String>, topic: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            brokers,
            topic: topic.into(),
            group_id: None,
            min_bytes: DEFAULT_MIN_BYTES,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Builds the configuration from the `datasource` section of a pod document.
    #[must_use]
    pub fn from_section(section: &DataSourceSection) -> Self {
        let mut config = Self::new(section.brokers.clone(), section.topic.clone())
            .with_name(section.name.clone());
        if let Some(group_id) = &section.group_id {
            config = config.with_group_id(group_id.clone());
        }
        config
    }

    /// Sets the human-readable source name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Joins a consumer group instead of reading partition 0 directly.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Overrides the minimum and maximum fetch sizes in bytes.
    #[must_use]
    pub fn with_fetch_bytes(mut self, min_bytes: usize, max_bytes: usize) -> Self {
        self.min_bytes = min_bytes;
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the broker addresses.
    #[must_use]
    pub fn brokers(&self) -> &[String] {
        &self.brokers
    }

    /// Returns the topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the consumer group, if any.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// Returns the minimum fetch size in bytes.
    #[must_use]
    pub const fn min_bytes(&self) -> usize {
        self.min_bytes
    }

    /// Returns the maximum fetch size in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Renders the rdkafka client configuration for the consumer.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", self.brokers.join(","))
            .set("fetch.min.bytes", self.min_bytes.to_string())
            .set("fetch.max.bytes", self.max_bytes.to_string())
            .set("enable.partition.eof", "false")
            .set("auto.offset.reset", "earliest");

        match &self.group_id {
            Some(group_id) => {
                config.set("group.id", group_id);
            }
            None => {
                // librdkafka refuses manual assignment without a group id. The
                // placeholder group never commits, so no offsets are stored.
                config
                    .set("group.id", self.placeholder_group_id())
                    .set("enable.auto.commit", "false");
            }
        }
        config
    }

    /// Group id used for a direct partition read: `pod-<name>`, falling back
    /// to `pod-<topic>` when the source is unnamed.
    #[must_use]
    pub fn placeholder_group_id(&self) -> String {
        let suffix = if self.name.is_empty() {
            &self.topic
        } else {
            &self.name
        };
        format!("pod-{suffix}")
    }
}

/// Data source reading messages from a Kafka topic.
///
/// Construction never connects. The consumer is created on the first
/// [`DataSource::fetch`] and reused afterwards, so invalid settings and an
/// empty broker list surface as [`FetchError`]. Unreachable brokers do not:
/// `fetch` keeps waiting while the client retries.
pub struct KafkaDataSource {
    config: KafkaConfig,
    metadata: DataSourceMetadata,
    consumer: OnceCell<StreamConsumer>,
}

impl fmt::Debug for KafkaDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KafkaDataSource")
            .field("config", &self.config)
            .field("connected", &self.consumer.initialized())
            .finish_non_exhaustive()
    }
}

impl KafkaDataSource {
    /// Creates a data source from the supplied configuration.
    #[must_use]
    pub fn new(config: KafkaConfig) -> Self {
        let metadata = DataSourceMetadata::new(BACKEND, config.name.clone())
            .with_addresses(config.brokers.clone())
            .with_stream(config.topic.clone());

        Self {
            config,
            metadata,
            consumer: OnceCell::new(),
        }
    }

    /// Returns the configuration the consumer is built from.
    #[must_use]
    pub fn config(&self) -> &KafkaConfig {
        &self.config
    }

    fn connect(&self) -> KafkaResult<StreamConsumer> {
        debug!(
            brokers = ?self.config.brokers,
            topic = %self.config.topic,
            group_id = ?self.config.group_id,
            "creating kafka consumer"
        );
        if self.config.brokers.is_empty() {
            return Err(KafkaError::ClientCreation(
                "no kafka brokers configured".to_owned(),
            ));
        }
        let consumer: StreamConsumer = self.config.client_config().create()?;

        if self.config.group_id.is_some() {
            consumer.subscribe(&[self.config.topic.as_str()])?;
        } else {
            let mut assignment = TopicPartitionList::new();
            assignment.add_partition_offset(
                &self.config.topic,
                DIRECT_PARTITION,
                Offset::Beginning,
            )?;
            consumer.assign(&assignment)?;
        }

        info!(topic = %self.config.topic, "kafka consumer ready");
        Ok(consumer)
    }
}

#[async_trait]
impl DataSource for KafkaDataSource {
    fn metadata(&self) -> &DataSourceMetadata {
        &self.metadata
    }

    async fn fetch(&self) -> FetchResult<Bytes> {
        let consumer = self
            .consumer
            .get_or_try_init(|| async { self.connect() })
            .await
            .map_err(|err| {
                error!(topic = %self.config.topic, error = %err, "failed to create kafka consumer");
                FetchError::kafka(self.config.topic.clone(), err)
            })?;

        let message = consumer
            .recv()
            .await
            .map_err(|err| FetchError::kafka(self.config.topic.clone(), err))?;

        Ok(message
            .payload()
            .map(Bytes::copy_from_slice)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> KafkaConfig {
        KafkaConfig::new(
            vec!["localhost:9092".to_owned(), "localhost:9093".to_owned()],
            "events",
        )
    }

    #[test]
    fn client_config_carries_brokers_and_fetch_bounds() {
        let config = events().client_config();

        assert_eq!(
            config.get("bootstrap.servers"),
            Some("localhost:9092,localhost:9093")
        );
        assert_eq!(config.get("fetch.min.bytes"), Some("10000"));
        assert_eq!(config.get("fetch.max.bytes"), Some("10000000"));
        assert_eq!(config.get("group.id"), Some("pod-events"));
        assert_eq!(config.get("enable.auto.commit"), Some("false"));
    }

    #[test]
    fn placeholder_group_prefers_source_name() {
        let config = events().with_name("clicks");
        assert_eq!(config.placeholder_group_id(), "pod-clicks");
        assert_eq!(config.client_config().get("group.id"), Some("pod-clicks"));
    }

    #[test]
    fn group_id_enables_group_consumption() {
        let config = events().with_group_id("pods").client_config();

        assert_eq!(config.get("group.id"), Some("pods"));
        assert_eq!(config.get("enable.auto.commit"), None);
    }

    #[tokio::test]
    async fn direct_read_consumer_is_created_and_assigned() {
        let source = KafkaDataSource::new(KafkaConfig::new(
            vec!["127.0.0.1:1".to_owned()],
            "events",
        ));

        source
            .connect()
            .expect("partition 0 is assigned without a reachable broker");
    }

    #[tokio::test]
    async fn group_consumer_is_created_and_subscribed() {
        let source = KafkaDataSource::new(
            KafkaConfig::new(vec!["127.0.0.1:1".to_owned()], "events").with_group_id("pods"),
        );

        source
            .connect()
            .expect("subscribing does not contact the broker");
    }

    #[tokio::test]
    async fn empty_broker_list_fails_first_fetch() {
        let source = KafkaDataSource::new(KafkaConfig::new(Vec::new(), "events"));

        let err = source.fetch().await.expect_err("no brokers to read from");
        assert!(err.to_string().contains("no kafka brokers configured"));
        assert!(!source.consumer.initialized());
    }

    #[test]
    fn from_section_copies_document_fields() {
        let section = DataSourceSection {
            name: "clicks".into(),
            kind: "kafka".into(),
            brokers: vec!["broker:9092".into()],
            topic: "events".into(),
            group_id: Some("pods".into()),
        };
        let config = KafkaConfig::from_section(&section);

        assert_eq!(config.name(), "clicks");
        assert_eq!(config.brokers(), &["broker:9092".to_owned()]);
        assert_eq!(config.topic(), "events");
        assert_eq!(config.group_id(), Some("pods"));
        assert_eq!(config.min_bytes(), DEFAULT_MIN_BYTES);
        assert_eq!(config.max_bytes(), DEFAULT_MAX_BYTES);
    }

    #[test]
    fn construction_does_not_connect() {
        let source = KafkaDataSource::new(events().with_name("clicks"));

        assert!(!source.consumer.initialized());
        assert_eq!(source.metadata().backend(), BACKEND);
        assert_eq!(source.metadata().name(), "clicks");
        assert_eq!(source.metadata().stream(), "events");
        assert_eq!(source.metadata().addresses().len(), 2);
    }

    #[tokio::test]
    async fn invalid_settings_surface_on_first_fetch() {
        let source = KafkaDataSource::new(events().with_fetch_bytes(0, DEFAULT_MAX_BYTES));

        let err = source.fetch().await.expect_err("fetch.min.bytes must be >= 1");
        assert!(matches!(err, FetchError::Kafka { ref topic, .. } if topic == "events"));
        assert!(!source.consumer.initialized());
    }
}
