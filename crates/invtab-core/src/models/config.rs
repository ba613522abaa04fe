//! Configuration structures for the tabulation pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for the invtab pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvtabConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output sink configuration.
    pub sink: SinkConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Provisional CGST rate assumed for layouts that defer the exact rate
    /// to a summary block (percent).
    pub provisional_cgst_rate: Decimal,

    /// Provisional SGST rate assumed for the same layouts (percent).
    pub provisional_sgst_rate: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            provisional_cgst_rate: Decimal::new(9, 0),
            provisional_sgst_rate: Decimal::new(9, 0),
        }
    }
}

/// Output sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// File written when no company produced any records.
    pub placeholder_file: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            placeholder_file: "no_data.csv".to_string(),
        }
    }
}

impl InvtabConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provisional_rates() {
        let config = InvtabConfig::default();
        assert_eq!(config.extraction.provisional_cgst_rate, Decimal::new(9, 0));
        assert_eq!(config.extraction.provisional_sgst_rate, Decimal::new(9, 0));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: InvtabConfig =
            serde_json::from_str(r#"{"extraction": {"provisional_cgst_rate": "6"}}"#).unwrap();
        assert_eq!(config.extraction.provisional_cgst_rate, Decimal::new(6, 0));
        assert_eq!(config.extraction.provisional_sgst_rate, Decimal::new(9, 0));
        assert_eq!(config.sink.placeholder_file, "no_data.csv");
    }
}
