/// Configuration management for the Crafty app
///
/// Everything is loaded from environment variables with sensible defaults
/// for local development; only the Firebase credentials are required.
use firebase_client::FirebaseConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Firebase project settings
    pub firebase: FirebaseConfig,
    /// Object detection settings
    pub detection: DetectionConfig,
}

/// Object detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Path to the SSD ONNX model file
    pub model_path: String,
    /// Square input size the model expects
    pub input_size: u32,
    /// Minimum confidence for a detection to be reported
    pub score_threshold: f32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Ok(Config {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            firebase: FirebaseConfig::from_env()?,
            detection: DetectionConfig {
                model_path: std::env::var("DETECTION_MODEL_PATH")
                    .unwrap_or_else(|_| "models/ssdlite_mobilenet.onnx".to_string()),
                input_size: std::env::var("DETECTION_INPUT_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(320),
                score_threshold: parse_env_or_default("DETECTION_SCORE_THRESHOLD", 0.5)?,
            },
        })
    }
}

fn parse_env_or_default(key: &str, default: f32) -> Result<f32, String> {
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
