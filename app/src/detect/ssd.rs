/// SSD object detector
///
/// Runs a bundled SSD-style ONNX model (COCO label space) over captured
/// photos. Model load and inference are CPU-bound, so both hop onto the
/// blocking pool. The detector starts unloaded; `detect` before `load`
/// is an error at this layer and a silent no-op at the screen layer.
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tract_onnx::prelude::*;
use tracing::{debug, info};

use super::{Detection, ObjectDetector};
use crate::config::DetectionConfig;
use crate::error::{AppError, Result};

type Plan = TypedSimplePlan<TypedModel>;

/// COCO class names, indexed by model class id. Gaps in the id space are
/// empty and never surface as detections.
const COCO_LABELS: [&str; 91] = [
    "", "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "", "stop sign", "parking meter", "bench", "bird", "cat",
    "dog", "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "", "backpack",
    "umbrella", "", "", "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard",
    "sports ball", "kite", "baseball bat", "baseball glove", "skateboard", "surfboard",
    "tennis racket", "bottle", "", "wine glass", "cup", "fork", "knife", "spoon", "bowl",
    "banana", "apple", "sandwich", "orange", "broccoli", "carrot", "hot dog", "pizza", "donut",
    "cake", "chair", "couch", "potted plant", "bed", "", "dining table", "", "", "toilet", "",
    "tv", "laptop", "mouse", "remote", "keyboard", "cell phone", "microwave", "oven", "toaster",
    "sink", "refrigerator", "", "book", "clock", "vase", "scissors", "teddy bear", "hair drier",
    "toothbrush",
];

pub struct SsdDetector {
    model: RwLock<Option<Arc<Plan>>>,
    input_size: u32,
    score_threshold: f32,
}

impl SsdDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            model: RwLock::new(None),
            input_size: config.input_size,
            score_threshold: config.score_threshold,
        }
    }

    fn load_plan(path: &str, input_size: u32) -> Result<Plan> {
        let size = input_size as i64;
        tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, size, size)),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|err| AppError::Detection(format!("model load failed: {}", err)))
    }

    fn preprocess(bytes: &[u8], input_size: u32) -> Result<Tensor> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| AppError::Detection(format!("image decode failed: {}", err)))?
            .resize_exact(input_size, input_size, image::imageops::FilterType::Triangle)
            .to_rgb8();

        let size = input_size as usize;
        let input: Tensor =
            tract_ndarray::Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
                image[(x as u32, y as u32)][c] as f32 / 255.0
            })
            .into();
        Ok(input)
    }

    fn run_plan(plan: &Plan, input: Tensor, score_threshold: f32) -> Result<Vec<Detection>> {
        let outputs = plan
            .run(tvec!(input.into()))
            .map_err(|err| AppError::Detection(format!("inference failed: {}", err)))?;

        // Output order: boxes, class ids, scores. Boxes are unused; the
        // scan screen only surfaces labels and confidences.
        let classes = outputs
            .get(1)
            .ok_or_else(|| AppError::Detection("model produced no class output".to_string()))?
            .to_array_view::<f32>()
            .map_err(|err| AppError::Detection(format!("class output decode failed: {}", err)))?
            .iter()
            .copied()
            .collect::<Vec<f32>>();
        let scores = outputs
            .get(2)
            .ok_or_else(|| AppError::Detection("model produced no score output".to_string()))?
            .to_array_view::<f32>()
            .map_err(|err| AppError::Detection(format!("score output decode failed: {}", err)))?
            .iter()
            .copied()
            .collect::<Vec<f32>>();

        let detections = classes
            .iter()
            .zip(scores.iter())
            .filter(|(_, &score)| score >= score_threshold)
            .filter_map(|(&class, &score)| {
                let label = COCO_LABELS.get(class as usize).copied().unwrap_or("");
                if label.is_empty() {
                    None
                } else {
                    Some(Detection {
                        label: label.to_string(),
                        confidence: score,
                    })
                }
            })
            .collect::<Vec<_>>();

        debug!(count = detections.len(), "detection pass complete");
        Ok(detections)
    }

    fn plan(&self) -> Option<Arc<Plan>> {
        self.model.read().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ObjectDetector for SsdDetector {
    async fn load(&self, model_path: &str) -> Result<()> {
        let path = model_path.to_string();
        let input_size = self.input_size;
        let plan = tokio::task::spawn_blocking(move || Self::load_plan(&path, input_size))
            .await
            .map_err(|err| AppError::Detection(format!("model load task failed: {}", err)))??;

        if let Ok(mut guard) = self.model.write() {
            *guard = Some(Arc::new(plan));
        }
        info!(path = %model_path, "detection model loaded");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.model
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    async fn detect(&self, image: &[u8]) -> Result<Vec<Detection>> {
        let plan = self
            .plan()
            .ok_or_else(|| AppError::Detection("model is not loaded".to_string()))?;

        let bytes = image.to_vec();
        let input_size = self.input_size;
        let score_threshold = self.score_threshold;
        tokio::task::spawn_blocking(move || {
            let input = Self::preprocess(&bytes, input_size)?;
            Self::run_plan(&plan, input, score_threshold)
        })
        .await
        .map_err(|err| AppError::Detection(format!("inference task failed: {}", err)))?
    }
}
