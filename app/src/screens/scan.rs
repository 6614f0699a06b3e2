/// Scan screen
///
/// Takes a captured photo, runs the on-device detector over it and turns
/// recognized objects into material suggestions. Detection is strictly
/// best-effort: a missing photo or an unloaded model drops the request on
/// the floor with a log line, and a failed inference clears the results
/// instead of surfacing an error.
use std::sync::Arc;

use tracing::{debug, warn};

use crate::detect::{suggest_material, Detection, ObjectDetector};
use crate::error::Result;

pub struct ScanScreen {
    detector: Arc<dyn ObjectDetector>,
    model_path: String,
    pub image: Option<Vec<u8>>,
    pub detections: Vec<Detection>,
    pub suggestions: Vec<String>,
}

impl ScanScreen {
    pub fn new(detector: Arc<dyn ObjectDetector>, model_path: &str) -> Self {
        Self {
            detector,
            model_path: model_path.to_string(),
            image: None,
            detections: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Load the detection model; usually kicked off when the screen opens.
    pub async fn load_model(&self) -> Result<()> {
        self.detector.load(&self.model_path).await
    }

    pub fn set_image(&mut self, bytes: Vec<u8>) {
        self.image = Some(bytes);
        self.detections.clear();
        self.suggestions.clear();
    }

    /// Run detection over the current photo.
    ///
    /// Requests arriving without a photo or before the model is ready are
    /// dropped, never queued for later.
    pub async fn detect(&mut self) {
        let Some(image) = self.image.as_deref() else {
            debug!("detection skipped: no image captured");
            return;
        };
        if !self.detector.is_ready() {
            debug!("detection skipped: model not loaded");
            return;
        }

        match self.detector.detect(image).await {
            Ok(detections) => {
                self.suggestions = detections
                    .iter()
                    .filter_map(|d| suggest_material(&d.label))
                    .map(str::to_string)
                    .collect();
                self.suggestions.dedup();
                self.detections = detections;
            }
            Err(err) => {
                warn!("detection failed: {}", err);
                self.detections.clear();
                self.suggestions.clear();
            }
        }
    }
}
