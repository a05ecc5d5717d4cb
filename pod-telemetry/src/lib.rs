//! Observability utilities for pods.

#![warn(missing_docs, clippy::pedantic)]

pub mod tracing_support;

pub use tracing_support::{TracingConfig, init};
