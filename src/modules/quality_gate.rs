//! Admission check on a landmark set before any zone or score is computed.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::config::QualityGateConfig;
use crate::error::QualityRejection;
use crate::helper::landmarks::{indices, LandmarkSet, FACE_MESH_LANDMARKS};

/// Measurements taken by a passing gate check.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GateMeasurements {
    pub landmark_count: usize,
    /// Distance between the outer eye corners, in pixels
    pub interocular_distance: f64,
    pub tilt_degrees: f64,
}

#[derive(Debug, Clone, Default)]
pub struct QualityGate {
    config: QualityGateConfig,
}

impl QualityGate {
    pub fn new(config: QualityGateConfig) -> Self {
        QualityGate { config }
    }

    /// check validates that the landmarks are usable for zone derivation.
    ///
    /// Rules run in order (landmark count, tilt, face size) and the first
    /// failure is returned. The count floor never drops below the full mesh,
    /// and NaN or infinite eye coordinates are rejected before the tilt rule.
    ///
    /// # Arguments
    /// * `landmarks` - normalized landmark set
    /// * `width` - image width in pixels
    /// * `height` - image height in pixels
    ///
    /// # Returns
    /// * `Result<GateMeasurements, QualityRejection>`
    pub fn check(&self, landmarks: &LandmarkSet, width: u32, height: u32) -> Result<GateMeasurements, QualityRejection> {
        let result = self.evaluate(landmarks, width, height);
        match &result {
            Ok(m) => debug!(
                landmarks = m.landmark_count,
                interocular_px = m.interocular_distance,
                tilt_degrees = m.tilt_degrees,
                "quality gate passed"
            ),
            Err(reason) => warn!(%reason, "quality gate rejected landmarks"),
        }
        result
    }

    fn evaluate(&self, landmarks: &LandmarkSet, width: u32, height: u32) -> Result<GateMeasurements, QualityRejection> {
        let required = self.config.min_landmarks.max(FACE_MESH_LANDMARKS);
        if landmarks.len() < required {
            return Err(QualityRejection::InsufficientLandmarks {
                found: landmarks.len(),
                required,
            })
        }

        let px = landmarks.to_pixels(width, height);
        let left = px.get(indices::LEFT_EYE_OUTER);
        let right = px.get(indices::RIGHT_EYE_OUTER);
        let interocular_distance = left.distance(&right);
        let vertical_delta = (right.y - left.y).abs();
        let tilt_degrees = vertical_delta.atan2(interocular_distance).to_degrees();

        // NaN compares false against every threshold below
        if !interocular_distance.is_finite() || !tilt_degrees.is_finite() {
            return Err(QualityRejection::NonFiniteGeometry {
                interocular_distance,
                tilt_degrees,
            })
        }

        if tilt_degrees > self.config.max_tilt_degrees {
            return Err(QualityRejection::ExcessiveTilt {
                tilt_degrees,
                max_degrees: self.config.max_tilt_degrees,
            })
        }

        let ratio = interocular_distance / width as f64;
        if ratio < self.config.min_face_width_ratio {
            return Err(QualityRejection::FaceTooSmall {
                ratio,
                min_ratio: self.config.min_face_width_ratio,
            })
        }

        Ok(GateMeasurements {
            landmark_count: landmarks.len(),
            interocular_distance,
            tilt_degrees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{landmarks_with_eyes, synthetic_face};
    use crate::utils::coordinate::Point;

    #[test]
    fn test_synthetic_face_passes() {
        let gate = QualityGate::default();
        let m = gate.check(&synthetic_face(), 1000, 1000).unwrap();
        assert_eq!(m.landmark_count, 468);
        assert!((m.interocular_distance - 340.0).abs() < 1e-6);
        assert_eq!(m.tilt_degrees, 0.0);
    }

    #[test]
    fn test_exact_boundaries_pass() {
        // 468 points, zero tilt, inter-ocular distance exactly 15% of width
        let landmarks = landmarks_with_eyes(468, Point::new(0.25, 0.4), Point::new(0.4, 0.4));
        let m = QualityGate::default().check(&landmarks, 1000, 1000).unwrap();
        assert_eq!(m.interocular_distance, 150.0);
    }

    #[test]
    fn test_insufficient_landmarks() {
        let landmarks = landmarks_with_eyes(467, Point::new(0.25, 0.4), Point::new(0.75, 0.4));
        let err = QualityGate::default().check(&landmarks, 1000, 1000).unwrap_err();
        assert_eq!(err, QualityRejection::InsufficientLandmarks { found: 467, required: 468 });
    }

    /// Eyes placed so that `atan2(|dy|, iod)` equals `degrees`, with iod the
    /// Euclidean eye distance: `tan(tilt) = dy / sqrt(dx^2 + dy^2)`.
    fn eyes_tilted_by(degrees: f64) -> LandmarkSet {
        let dx = 0.3;
        let t = degrees.to_radians().tan();
        let dy = dx * t / (1.0 - t * t).sqrt();
        landmarks_with_eyes(468, Point::new(0.3, 0.4), Point::new(0.3 + dx, 0.4 + dy))
    }

    #[test]
    fn test_excessive_tilt() {
        let err = QualityGate::default().check(&eyes_tilted_by(20.01), 1000, 1000).unwrap_err();
        match err {
            QualityRejection::ExcessiveTilt { tilt_degrees, max_degrees } => {
                assert!((tilt_degrees - 20.01).abs() < 1e-6);
                assert_eq!(max_degrees, 20.0);
            }
            other => panic!("unexpected rejection {other:?}"),
        }
    }

    #[test]
    fn test_tilt_just_under_limit_passes() {
        let m = QualityGate::default().check(&eyes_tilted_by(19.99), 1000, 1000).unwrap();
        assert!((m.tilt_degrees - 19.99).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_eyes_rejected() {
        let nan_eye = landmarks_with_eyes(468, Point::new(f64::NAN, 0.4), Point::new(0.7, 0.4));
        assert!(matches!(
            QualityGate::default().check(&nan_eye, 1000, 1000),
            Err(QualityRejection::NonFiniteGeometry { .. })
        ));

        let infinite_eye = landmarks_with_eyes(468, Point::new(0.3, 0.4), Point::new(f64::INFINITY, 0.4));
        assert!(matches!(
            QualityGate::default().check(&infinite_eye, 1000, 1000),
            Err(QualityRejection::NonFiniteGeometry { .. })
        ));
    }

    #[test]
    fn test_count_floor_is_full_mesh() {
        let gate = QualityGate::new(QualityGateConfig {
            min_landmarks: 300,
            ..QualityGateConfig::default()
        });
        let landmarks = landmarks_with_eyes(400, Point::new(0.3, 0.4), Point::new(0.7, 0.4));
        assert_eq!(
            gate.check(&landmarks, 1000, 1000).unwrap_err(),
            QualityRejection::InsufficientLandmarks { found: 400, required: 468 }
        );
    }

    #[test]
    fn test_tilt_sign_is_ignored() {
        let landmarks = landmarks_with_eyes(468, Point::new(0.3, 0.5), Point::new(0.6, 0.3));
        assert!(matches!(
            QualityGate::default().check(&landmarks, 1000, 1000),
            Err(QualityRejection::ExcessiveTilt { .. })
        ));
    }

    #[test]
    fn test_face_too_small() {
        // 14.99% of width
        let landmarks = landmarks_with_eyes(468, Point::new(0.25, 0.4), Point::new(0.3999, 0.4));
        let err = QualityGate::default().check(&landmarks, 1000, 1000).unwrap_err();
        assert!(matches!(err, QualityRejection::FaceTooSmall { .. }));
        assert!(err.to_string().starts_with("face too small"));
    }

    #[test]
    fn test_custom_config() {
        let gate = QualityGate::new(QualityGateConfig {
            min_face_width_ratio: 0.5,
            ..QualityGateConfig::default()
        });
        assert!(matches!(
            gate.check(&synthetic_face(), 1000, 1000),
            Err(QualityRejection::FaceTooSmall { .. })
        ));
    }
}
