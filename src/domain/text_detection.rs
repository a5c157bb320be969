//! Text detection results returned by a [`TextRecognizer`](crate::core::TextRecognizer).

use serde::{Deserialize, Serialize};

/// Axis-aligned box around a detected text region, in input image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

/// One recognized text region.
///
/// Detections are kept in the order the recognizer produced them. The order carries no ranking;
/// confidence and geometry are informational and never used to filter or reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDetection {
    /// The recognized text.
    pub text: String,
    /// Recognition confidence, when the recognizer reports one.
    #[serde(default)]
    pub confidence: Option<f32>,
    /// Region geometry, when the recognizer reports one.
    #[serde(default)]
    pub bounding_box: Option<DetectionBox>,
}

impl TextDetection {
    /// Creates a detection carrying only text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            bounding_box: None,
        }
    }

    /// Attaches a confidence score.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attaches region geometry.
    pub fn with_bounding_box(mut self, bounding_box: DetectionBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}

/// Joins the text of every detection with single spaces, in detection order.
pub fn concatenated_text(detections: &[TextDetection]) -> String {
    detections
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenated_text_preserves_detection_order() {
        let detections = vec![
            TextDetection::new("PEANUT").with_confidence(0.98),
            TextDetection::new("BUTTER"),
            TextDetection::new("500g"),
        ];
        assert_eq!(concatenated_text(&detections), "PEANUT BUTTER 500g");
    }

    #[test]
    fn test_detection_deserializes_without_metadata() {
        let detection: TextDetection = serde_json::from_str(r#"{"text": "Oats"}"#).unwrap();
        assert_eq!(detection, TextDetection::new("Oats"));
    }
}
