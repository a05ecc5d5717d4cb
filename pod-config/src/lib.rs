//! Configuration management for pods.
//!
//! A pod is described by a single YAML document. [`schema`] holds the strongly
//! typed mirror of that document and [`loader`] turns raw bytes into it.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::ParseError;
pub use schema::{ConfigDocument, DataSourceSection};
