//! Configuration types for bpmetrics runs.
//!
//! This module provides configuration structures that control how exports
//! are parsed and which metrics are computed. All types implement
//! [`serde::Deserialize`] for loading from TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`ParserConfig`] - Optional columns and namespace filter of the parser.
//! - [`MetricsConfig`] - Selection of metrics to compute.
//!
//! # Example
//!
//! ```toml
//! [parser]
//! include_parent = true
//! include_outgoing = true
//! namespace = "http://b3mn.org/stencilset/bpmn2.0#"
//!
//! [metrics]
//! enabled = ["CFC", "CNC", "Density", "Cognitive_Complexity"]
//! ```

use serde::Deserialize;

use bpmetrics_parser::ParseOptions;

use crate::metrics::{MetricError, MetricsEngine};

/// Stencil-set namespace of BPMN 2.0 exports.
pub const BPMN2_NAMESPACE: &str = "http://b3mn.org/stencilset/bpmn2.0#";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Metrics configuration section.
    #[serde(default)]
    metrics: MetricsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, metrics: MetricsConfig) -> Self {
        Self { parser, metrics }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the metrics configuration.
    pub fn metrics(&self) -> &MetricsConfig {
        &self.metrics
    }
}

fn default_true() -> bool {
    true
}

/// Parser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Emit the `parent` column.
    #[serde(default = "default_true")]
    include_parent: bool,

    /// Emit the `outgoing` column.
    #[serde(default = "default_true")]
    include_outgoing: bool,

    /// Only parse records declaring this namespace.
    #[serde(default)]
    namespace: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            include_parent: true,
            include_outgoing: true,
            namespace: None,
        }
    }
}

impl ParserConfig {
    /// Creates a new [`ParserConfig`].
    ///
    /// # Arguments
    ///
    /// * `include_parent` - Whether elements carry their parent id.
    /// * `include_outgoing` - Whether elements carry their outgoing targets.
    /// * `namespace` - Namespace filter for batch records.
    pub fn new(include_parent: bool, include_outgoing: bool, namespace: Option<String>) -> Self {
        Self {
            include_parent,
            include_outgoing,
            namespace,
        }
    }

    pub fn include_parent(&self) -> bool {
        self.include_parent
    }

    pub fn include_outgoing(&self) -> bool {
        self.include_outgoing
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the equivalent [`ParseOptions`].
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_include_parent(self.include_parent)
            .with_include_outgoing(self.include_outgoing)
            .with_namespace(self.namespace.clone())
    }
}

/// Metric selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    /// Metric names to compute; every registered metric when absent.
    #[serde(default)]
    enabled: Option<Vec<String>>,
}

impl MetricsConfig {
    pub fn new(enabled: Option<Vec<String>>) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> Option<&[String]> {
        self.enabled.as_deref()
    }

    /// Builds the [`MetricsEngine`] for this selection.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::UnknownMetric`] for a name that is not
    /// registered.
    pub fn engine(&self) -> Result<MetricsEngine, MetricError> {
        match &self.enabled {
            Some(names) => MetricsEngine::with_metrics(names),
            None => Ok(MetricsEngine::all()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.parser().include_parent());
        assert!(config.parser().include_outgoing());
        assert_eq!(config.parser().namespace(), None);
        assert!(config.metrics().enabled().is_none());
    }

    #[test]
    fn test_parse_options_from_config() {
        let parser = ParserConfig::new(false, true, Some(BPMN2_NAMESPACE.to_string()));
        let options = parser.parse_options();

        assert!(!options.include_parent());
        assert!(options.include_outgoing());
        assert_eq!(options.namespace(), Some(BPMN2_NAMESPACE));
    }

    #[test]
    fn test_engine_selection() {
        let all = MetricsConfig::default().engine().unwrap();
        assert!(all.metric_names().count() > 20);

        let some = MetricsConfig::new(Some(vec!["NOA".to_string()])).engine().unwrap();
        assert_eq!(some.metric_names().collect::<Vec<_>>(), vec!["NOA"]);

        let bad = MetricsConfig::new(Some(vec!["nope".to_string()])).engine();
        assert!(bad.is_err());
    }
}
