//! Preprocessor, model, and endpoint descriptors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// Locates the preprocessing stage applied to raw data before inference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preprocessor {
    /// File holding the preprocessing logic.
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    /// Free-form kind understood by the preprocessing engine (e.g. `script`).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Identifies the model artifact the pod feeds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// File holding the serialized model.
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
}

/// Output endpoint that receives the pod's results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Delivery kind understood by the endpoint dispatcher (e.g. `http`).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Destination URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Field-name to field-value mapping; order is not significant.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: HashMap<String, String>,
}
