//! Configuration surface
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! SENTINEL_-prefixed environment variables (double underscore as the
//! section separator, e.g. SENTINEL_EMAIL__RECIPIENT).

use alerting::EmailConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Sentinel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentinelConfig {
    /// Path to the ONNX detection model; absent means the mock detector
    pub model_path: Option<String>,

    /// Minimum detection confidence
    pub confidence_threshold: f32,

    /// Frame source identifier: "synthetic", "synthetic:<frames>", or an
    /// image directory path
    pub source: String,

    /// Labels considered inherently dangerous
    pub danger_set: Vec<String>,

    /// Minimum seconds between two successful alert dispatches
    pub cooldown_seconds: f64,

    /// Class names in model output order
    pub class_names: Vec<String>,

    /// Directory for annotated output frames; absent means no output
    pub output_dir: Option<String>,

    /// Email notifier credentials
    pub email: EmailConfig,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            confidence_threshold: 0.25,
            source: "synthetic".to_string(),
            danger_set: vec![
                "knife".to_string(),
                "scissors".to_string(),
                "sharp object".to_string(),
                "blade".to_string(),
                "weapon".to_string(),
            ],
            cooldown_seconds: 20.0,
            class_names: vec![
                "person".to_string(),
                "knife".to_string(),
                "scissors".to_string(),
            ],
            output_dir: None,
            email: EmailConfig::default(),
        }
    }
}

impl SentinelConfig {
    /// Load configuration, layering an optional file and the environment
    /// over the defaults.
    pub fn load(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&SentinelConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::with_name(path));
        }

        builder
            .add_source(Environment::with_prefix("SENTINEL").separator("__"))
            .build()?
            .try_deserialize()
    }
}
