use serde::{Deserialize, Serialize};

use crate::error::ChecklistError;
use crate::types::Dataset;

/// Output coordinate space for the schematic map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    /// Canvas width in output units (default: 100)
    #[serde(default = "default_width")]
    pub width: f64,

    /// Canvas height in output units (default: 85)
    #[serde(default = "default_height")]
    pub height: f64,

    /// Horizontal margin kept free on both sides (default: 5)
    #[serde(default = "default_margin")]
    pub margin_x: f64,

    /// Vertical margin kept free on top and bottom (default: 5)
    #[serde(default = "default_margin")]
    pub margin_y: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin_x: default_margin(),
            margin_y: default_margin(),
        }
    }
}

impl Canvas {
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.margin_x
    }

    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.margin_y
    }

    /// The margin box must fit inside the canvas.
    pub fn validate(&self) -> Result<(), ChecklistError> {
        let values = [self.width, self.height, self.margin_x, self.margin_y];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ChecklistError::InvalidCanvas(
                "size and margins must be finite and non-negative",
            ));
        }
        if self.inner_width() < 0.0 {
            return Err(ChecklistError::InvalidCanvas("marginX exceeds half the width"));
        }
        if self.inner_height() < 0.0 {
            return Err(ChecklistError::InvalidCanvas("marginY exceeds half the height"));
        }
        Ok(())
    }
}

/// Everything needed to start a checklist session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Named point groups, rendered and counted separately
    #[serde(default)]
    pub datasets: Vec<Dataset>,

    /// Names already visited when the session starts
    #[serde(default)]
    pub initially_visited: Vec<String>,

    #[serde(default)]
    pub canvas: Canvas,

    #[serde(default)]
    pub notice: NoticeOptions,
}

/// The reminder shown after each toggle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeOptions {
    /// How long the reminder stays up, in milliseconds (default: 3000)
    #[serde(default = "default_notice_ms")]
    pub duration_ms: f64,

    #[serde(default = "default_notice_message")]
    pub message: String,
}

impl Default for NoticeOptions {
    fn default() -> Self {
        Self {
            duration_ms: default_notice_ms(),
            message: default_notice_message(),
        }
    }
}

fn default_width() -> f64 {
    100.0
}

fn default_height() -> f64 {
    85.0
}

fn default_margin() -> f64 {
    5.0
}

fn default_notice_ms() -> f64 {
    3000.0
}

fn default_notice_message() -> String {
    "This change is not saved and will be reverted when the page reloads.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_canvas_uses_defaults() {
        let canvas: Canvas = serde_json::from_str(r#"{"width": 200}"#).unwrap();
        assert_eq!(canvas.width, 200.0);
        assert_eq!(canvas.height, 85.0);
        assert_eq!(canvas.margin_x, 5.0);
        assert_eq!(canvas.inner_width(), 190.0);
    }

    #[test]
    fn test_default_canvas_is_valid() {
        assert!(Canvas::default().validate().is_ok());
    }

    #[test]
    fn test_oversized_margin_rejected() {
        let canvas: Canvas = serde_json::from_str(r#"{"width": 10, "marginX": 20}"#).unwrap();
        assert!(matches!(
            canvas.validate(),
            Err(ChecklistError::InvalidCanvas(_))
        ));

        let canvas = Canvas {
            margin_y: 50.0,
            ..Default::default()
        };
        assert!(canvas.validate().is_err());

        let canvas = Canvas {
            width: f64::NAN,
            ..Default::default()
        };
        assert!(canvas.validate().is_err());
    }

    #[test]
    fn test_session_config_camel_case() {
        let json = r#"{
            "datasets": [{"name": "East", "points": [{"name": "Aoto", "lat": 35.74, "lon": 139.85}]}],
            "initiallyVisited": ["Aoto"],
            "notice": {"durationMs": 1500}
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.datasets.len(), 1);
        assert_eq!(config.initially_visited, vec!["Aoto".to_string()]);
        assert_eq!(config.notice.duration_ms, 1500.0);
        assert_eq!(config.notice.message, default_notice_message());
        assert_eq!(config.canvas, Canvas::default());
    }
}
