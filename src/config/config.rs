use serde::{Deserialize, Serialize};

use crate::error::SkinAgeError;
use crate::helper::landmarks::FACE_MESH_LANDMARKS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityGateConfig {
    pub min_landmarks: usize,
    pub max_tilt_degrees: f64,
    pub min_face_width_ratio: f64,
}

impl QualityGateConfig {
    pub(crate) fn new() -> Self {
        QualityGateConfig {
            min_landmarks: FACE_MESH_LANDMARKS,
            max_tilt_degrees: 20.0,
            min_face_width_ratio: 0.15,
        }
    }
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictionConfig {
    /// aging years per elapsed year on the healthy path
    pub healthy_rate: f64,
    /// aging years per elapsed year on the current path
    pub current_rate: f64,
    pub default_horizons: Vec<u32>,
}

impl PredictionConfig {
    pub(crate) fn new() -> Self {
        PredictionConfig {
            healthy_rate: 0.8,
            current_rate: 1.2,
            default_horizons: vec![5, 10, 15, 20],
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub quality_gate: QualityGateConfig,
    pub prediction: PredictionConfig,
}

impl PipelineConfig {
    /// from_json_str parses and validates a config; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SkinAgeError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SkinAgeError> {
        let gate = &self.quality_gate;
        // zone geometry reads reference indices up to the full mesh size
        if gate.min_landmarks < FACE_MESH_LANDMARKS {
            return Err(SkinAgeError::InvalidConfig(format!(
                "min_landmarks must be at least {}, got {}",
                FACE_MESH_LANDMARKS, gate.min_landmarks
            )))
        }
        if !(gate.max_tilt_degrees > 0.0 && gate.max_tilt_degrees < 90.0) {
            return Err(SkinAgeError::InvalidConfig(format!(
                "max_tilt_degrees must be in (0, 90), got {}",
                gate.max_tilt_degrees
            )))
        }
        if !(0.0..1.0).contains(&gate.min_face_width_ratio) {
            return Err(SkinAgeError::InvalidConfig(format!(
                "min_face_width_ratio must be in [0, 1), got {}",
                gate.min_face_width_ratio
            )))
        }
        let pred = &self.prediction;
        let positive = |rate: f64| rate.is_finite() && rate > 0.0;
        if !positive(pred.healthy_rate) || !positive(pred.current_rate) {
            return Err(SkinAgeError::InvalidConfig(format!(
                "aging rates must be positive, got healthy={} current={}",
                pred.healthy_rate, pred.current_rate
            )))
        }
        if pred.default_horizons.is_empty() {
            return Err(SkinAgeError::InvalidConfig("default_horizons must not be empty".to_string()))
        }
        Ok(())
    }
}
