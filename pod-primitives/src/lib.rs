//! Core shared types for pods.
//!
//! Everything here is inert configuration data. The pod stores these records
//! and hands them to the preprocessing engine, the model runtime and the
//! endpoint dispatcher, which read them by plain field access.

#![warn(missing_docs, clippy::pedantic)]

mod descriptors;
pub mod serde_util;

/// Descriptors for the downstream stages of a pod.
pub use descriptors::{Endpoint, Model, Preprocessor};
