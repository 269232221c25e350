//! Configuration for schema inference

use serde::{Deserialize, Serialize};

/// Timestamp layout used when none is configured, in Go reference-layout form
pub const DEFAULT_TIME_FORMAT: &str = "2006/01/02 15:04:05";

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Layout that sample values must match to be typed as timestamps,
    /// written against Go's reference time `Mon Jan 2 15:04:05 MST 2006`
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the timestamp layout; an empty layout keeps the default
    pub fn time_format(mut self, layout: impl Into<String>) -> Self {
        let layout = layout.into();
        if !layout.is_empty() {
            self.config.time_format = layout;
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceConfig::default();
        assert_eq!(config.time_format, "2006/01/02 15:04:05");
    }

    #[test]
    fn test_builder() {
        let config = InferenceConfig::builder()
            .time_format("2006-01-02")
            .build();
        assert_eq!(config.time_format, "2006-01-02");

        let config = InferenceConfig::builder().time_format("").build();
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_deserialize_missing_field() {
        let config: InferenceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InferenceConfig::default());

        let config: InferenceConfig =
            serde_json::from_str(r#"{"timeFormat": "15:04"}"#).unwrap();
        assert_eq!(config.time_format, "15:04");
    }
}
