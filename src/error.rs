use serde::Serialize;
use thiserror::Error;

/// Terminal quality-gate rejection. The caller must re-prompt for a new image.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
pub enum QualityRejection {
    #[error("insufficient landmarks: found {found}, need at least {required}")]
    InsufficientLandmarks { found: usize, required: usize },
    #[error("excessive head tilt: {tilt_degrees:.2} degrees exceeds {max_degrees:.2}")]
    ExcessiveTilt { tilt_degrees: f64, max_degrees: f64 },
    #[error("face too small: inter-ocular distance is {ratio:.4} of image width, need {min_ratio:.4}")]
    FaceTooSmall { ratio: f64, min_ratio: f64 },
    #[error("non-finite eye geometry: inter-ocular distance {interocular_distance}, tilt {tilt_degrees}")]
    NonFiniteGeometry { interocular_distance: f64, tilt_degrees: f64 },
}

#[derive(Error, Debug)]
pub enum SkinAgeError {
    #[error("quality gate rejected input: {0}")]
    Rejected(#[from] QualityRejection),
    #[error("pixel read error: {0}")]
    PixelRead(#[source] anyhow::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config validation error: {0}")]
    InvalidConfig(String),
    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("logging setup error: {0}")]
    Logging(String),
}

impl SkinAgeError {
    /// rejection returns the quality-gate reason if this error is a terminal rejection.
    pub fn rejection(&self) -> Option<&QualityRejection> {
        match self {
            SkinAgeError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}
