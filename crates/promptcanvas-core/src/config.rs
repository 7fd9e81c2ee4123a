//! Editor configuration.

use crate::elements::{SerializableColor, fill_serde};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Editor config load errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the editing core.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    #[serde(with = "fill_serde")]
    pub fill_color: Option<SerializableColor>,
    pub scale_percent: f64,
    pub min_scale_percent: f64,
    pub max_scale_percent: f64,
    pub scale_step: f64,
    /// Offset applied to pasted elements relative to the clipboard copy.
    pub paste_offset: f64,
    /// Floor for width/height after a resize.
    pub min_element_size: f64,
    /// Half-size of the square around a handle that counts as a hit.
    pub handle_tolerance: f64,
    /// Where dropped or pasted images land.
    pub ingest_position: Point,
    /// Longest side of an ingested image.
    pub max_ingest_side: f64,
    pub notice_millis: u64,
    pub generation_notice_millis: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
            scale_percent: 100.0,
            min_scale_percent: 50.0,
            max_scale_percent: 200.0,
            scale_step: 10.0,
            paste_offset: 10.0,
            min_element_size: 10.0,
            handle_tolerance: 8.0,
            ingest_position: Point::new(100.0, 100.0),
            max_ingest_side: 800.0,
            notice_millis: 3_000,
            generation_notice_millis: 5_000,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config file.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric ranges the view and the gesture math rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scalePercent", self.scale_percent),
            ("scaleStep", self.scale_step),
            ("minElementSize", self.min_element_size),
            ("maxIngestSide", self.max_ingest_side),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{key} must be positive, got {value}")));
            }
        }
        for (key, value) in [("strokeWidth", self.stroke_width), ("handleTolerance", self.handle_tolerance)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{key} must not be negative, got {value}")));
            }
        }
        if !self.paste_offset.is_finite() {
            return Err(ConfigError::Invalid("pasteOffset must be finite".to_string()));
        }
        let (min, max) = (self.min_scale_percent, self.max_scale_percent);
        if !(min.is_finite() && max.is_finite() && min >= 1.0 && min <= max) {
            return Err(ConfigError::Invalid(format!(
                "scale range must satisfy 1 <= minScalePercent <= maxScalePercent, got {min}..{max}"
            )));
        }
        if !(self.ingest_position.x.is_finite() && self.ingest_position.y.is_finite()) {
            return Err(ConfigError::Invalid("ingestPosition must be finite".to_string()));
        }
        Ok(())
    }

    pub fn notice_lifetime(&self) -> Duration {
        Duration::from_millis(self.notice_millis)
    }

    pub fn generation_notice_lifetime(&self) -> Duration {
        Duration::from_millis(self.generation_notice_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EditorConfig::from_json(r##"{"strokeWidth": 5, "fillColor": "#ff0000"}"##).unwrap();
        assert!((config.stroke_width - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.fill_color, Some(SerializableColor::new(255, 0, 0, 255)));
        assert!((config.min_element_size - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.notice_lifetime(), Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"strokeColor": "blue"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_inverted_scale_range_rejected() {
        let err = EditorConfig::from_json(r#"{"minScalePercent": 300}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(EditorConfig::from_json(r#"{"minScalePercent": 0, "maxScalePercent": 10}"#).is_err());
        assert!(EditorConfig::from_json(r#"{"minScalePercent": 20, "maxScalePercent": 20}"#).is_ok());
    }

    #[test]
    fn test_non_positive_values_rejected() {
        for json in [
            r#"{"scalePercent": 0}"#,
            r#"{"scaleStep": -10}"#,
            r#"{"minElementSize": 0}"#,
            r#"{"strokeWidth": -1}"#,
        ] {
            assert!(matches!(EditorConfig::from_json(json), Err(ConfigError::Invalid(_))), "{json}");
        }
    }
}
