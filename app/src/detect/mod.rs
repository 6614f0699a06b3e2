/// On-device object detection
///
/// The scan screen runs a bundled SSD model over a captured photo and
/// offers the recognized objects back as material suggestions. Detection
/// is best-effort; every failure path here degrades to "no suggestions"
/// at the screen level.
pub mod ssd;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

pub use ssd::SsdDetector;

use crate::error::Result;

/// One detected object.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
}

impl Detection {
    /// Display form of the confidence score, e.g. `87.25%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// The detection engine seam.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Load the model from disk. Idempotent; a second call reloads.
    async fn load(&self, model_path: &str) -> Result<()>;

    /// Whether a model is loaded and ready to run.
    fn is_ready(&self) -> bool;

    /// Run detection over an encoded image.
    async fn detect(&self, image: &[u8]) -> Result<Vec<Detection>>;
}

/// Map a detected object label to a material tag from the catalog.
///
/// Only labels with an obvious material counterpart map; everything else
/// yields no suggestion.
pub fn suggest_material(label: &str) -> Option<&'static str> {
    match label {
        "bottle" => Some("Water Bottle"),
        "book" => Some("Paper"),
        _ => None,
    }
}
