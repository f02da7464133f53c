use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::config::PipelineConfig;
use crate::error::{QualityRejection, SkinAgeError};
use crate::helper::landmarks::LandmarkSet;
use crate::modules::clinical_scorer::{score_zones, ClinicalScore};
use crate::modules::future_prediction::{generate_interventions, FuturePrediction, FuturePredictor, Intervention};
use crate::modules::quality_gate::{GateMeasurements, QualityGate};
use crate::modules::skin_age::{estimate_skin_age, SkinAgeEstimate};
use crate::modules::zone_segmentation::{segment_zones, Zone};
use crate::utils::image::PixelSource;

/// Everything produced by one photo analysis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkinAgeReport {
    pub gate: GateMeasurements,
    pub zones: Vec<Zone>,
    pub clinical: ClinicalScore,
    pub estimate: SkinAgeEstimate,
    pub prediction: FuturePrediction,
    pub interventions: Vec<Intervention>,
}

impl SkinAgeReport {
    pub fn to_json(&self) -> Result<String, SkinAgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkinAgePipeline {
    gate: QualityGate,
    predictor: FuturePredictor,
}

impl SkinAgePipeline {

    /// new validates the config and initializes new instance of the pipeline
    ///
    /// # Arguments
    /// * `config` - pipeline config, from code or `PipelineConfig::from_json_str`
    ///
    /// # Returns
    /// * `Result<SkinAgePipeline, SkinAgeError>` - `InvalidConfig` when validation fails
    pub fn new(config: PipelineConfig) -> Result<Self, SkinAgeError> {
        config.validate()?;
        Ok(SkinAgePipeline {
            gate: QualityGate::new(config.quality_gate),
            predictor: FuturePredictor::new(config.prediction),
        })
    }

    /// check_quality runs only the quality gate, so callers can re-prompt early.
    ///
    /// # Arguments
    /// * `landmarks` - normalized landmark set
    /// * `width` - image width in pixels
    /// * `height` - image height in pixels
    ///
    /// # Returns
    /// * `Result<GateMeasurements, QualityRejection>`
    pub fn check_quality(&self, landmarks: &LandmarkSet, width: u32, height: u32) -> Result<GateMeasurements, QualityRejection> {
        self.gate.check(landmarks, width, height)
    }

    /// analyze runs the full scoring pipeline on one photo.
    ///
    /// A quality-gate rejection is terminal: no zones or scores are produced.
    ///
    /// # Arguments
    /// * `landmarks` - normalized landmark set from the external detector
    /// * `image` - pixel buffer of the photo the landmarks were detected on
    /// * `actual_age` - chronological age, validated by the caller
    /// * `horizons` - future year offsets; configured defaults when `None`
    ///
    /// # Returns
    /// * `Result<SkinAgeReport, SkinAgeError>`
    #[instrument(level = "debug", skip_all, fields(width = image.width(), height = image.height(), actual_age))]
    pub fn analyze<S: PixelSource + ?Sized>(
        &self,
        landmarks: &LandmarkSet,
        image: &S,
        actual_age: i32,
        horizons: Option<&[u32]>,
    ) -> Result<SkinAgeReport, SkinAgeError> {
        let (width, height) = (image.width(), image.height());
        let gate = self.gate.check(landmarks, width, height)?;

        let zones = segment_zones(landmarks, width, height);
        let clinical = score_zones(image, &zones).map_err(SkinAgeError::PixelRead)?;
        let estimate = estimate_skin_age(&clinical, actual_age);
        let prediction = self.predictor.predict(&estimate, horizons);
        let interventions = generate_interventions(&estimate);

        info!(
            zones = clinical.zones.len(),
            total_score = clinical.total_score,
            skin_age = estimate.estimated_skin_age,
            interventions = interventions.len(),
            "skin age analysis complete"
        );

        Ok(SkinAgeReport {
            gate,
            zones,
            clinical,
            estimate,
            prediction,
            interventions,
        })
    }

    /// analyze_async runs `analyze` on the blocking thread pool for async callers.
    ///
    /// # Arguments
    /// * `landmarks` - normalized landmark set
    /// * `image` - shared pixel buffer
    /// * `actual_age` - chronological age
    /// * `horizons` - future year offsets; configured defaults when `None`
    ///
    /// # Returns
    /// * `Result<SkinAgeReport, SkinAgeError>`
    pub async fn analyze_async<S>(
        &self,
        landmarks: LandmarkSet,
        image: Arc<S>,
        actual_age: i32,
        horizons: Option<Vec<u32>>,
    ) -> Result<SkinAgeReport, SkinAgeError>
    where
        S: PixelSource + Send + Sync + 'static,
    {
        let pipeline = self.clone();
        let handle = tokio::task::spawn_blocking(move || {
            pipeline.analyze(&landmarks, image.as_ref(), actual_age, horizons.as_deref())
        });
        handle.await?
    }
}
