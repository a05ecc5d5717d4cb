//! Structured tracing helpers.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Settings for the global fmt subscriber.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    default_filter: String,
    with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_owned(),
            with_target: false,
        }
    }
}

impl TracingConfig {
    /// Creates a configuration logging at `info` without targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// Includes the event target (module path) in each line.
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Returns the fallback filter directive.
    #[must_use]
    pub fn default_filter(&self) -> &str {
        &self.default_filter
    }
}

/// Installs the global fmt subscriber.
///
/// # Errors
///
/// Fails when the filter directives are invalid or a global subscriber is
/// already installed.
pub fn init(config: &TracingConfig) -> Result<()> {
    let env = std::env::var(FILTER_ENV).ok();
    let filter = resolve_filter(env.as_deref(), config.default_filter())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

fn resolve_filter(env: Option<&str>, default: &str) -> Result<EnvFilter> {
    let directives = env.filter(|value| !value.trim().is_empty()).unwrap_or(default);
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter `{directives}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_default() {
        let filter = resolve_filter(Some("debug"), "info").unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn blank_environment_falls_back() {
        let filter = resolve_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");

        let filter = resolve_filter(None, "pod_kernel=debug").unwrap();
        assert_eq!(filter.to_string(), "pod_kernel=debug");
    }

    #[test]
    fn builder_sets_fields() {
        let config = TracingConfig::new()
            .with_default_filter("trace")
            .with_target(true);
        assert_eq!(config.default_filter(), "trace");
        assert!(config.with_target);
    }
}
