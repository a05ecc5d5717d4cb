//! Pod runtime SDK facade.
//!
//! Bundles the pod crates behind feature flags so downstream users can pull in
//! only the pieces they need, e.g. the document schema without the Kafka
//! client.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared descriptors for convenience.
pub use pod_primitives as primitives;

/// Document schema and loader (enabled by `config` feature).
#[cfg(feature = "config")]
pub use pod_config as config;

/// Data source capability and backends (enabled by `datasource` feature).
#[cfg(feature = "datasource")]
pub use pod_datasource as datasource;

/// Pod assembly (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use pod_kernel as kernel;

/// Tracing setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use pod_telemetry as telemetry;

/// Assembles a pod from the document at `path` with the default backends.
#[cfg(feature = "kernel")]
pub use pod_kernel::assemble;
