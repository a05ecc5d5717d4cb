//! Strongly typed configuration schemas.

use pod_primitives::serde_util::null_as_default;
use pod_primitives::{Endpoint, Model, Preprocessor};
use serde::{Deserialize, Serialize};

/// Full description of a pod as written in its YAML document.
///
/// Every key is optional. Missing keys, and keys left without a value, take
/// the zero value of their type; unknown keys are ignored. The document is
/// only read during assembly and is not retained by the resulting pod.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Pod name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Pod version string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// Data source selection and backend settings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub datasource: DataSourceSection,
    /// Preprocessing stage descriptor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub preprocessor: Preprocessor,
    /// Model descriptor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: Model,
    /// Output endpoint descriptor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoint: Endpoint,
}

/// The `datasource` section of a pod document.
///
/// This is also the passive form of a data source: pure data with no live
/// connection. The assembler turns it into a live source by looking `kind` up
/// in the data source registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSection {
    /// Human-readable source name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Backend tag, e.g. `kafka`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Broker addresses as `host:port`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub brokers: Vec<String>,
    /// Topic to consume.
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    /// Consumer group; without one the source reads the topic directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}
