use serde::{Deserialize, Serialize};

use crate::error::SkinAgeError;
use crate::utils::coordinate::{BoundingBox, Point};

/// Number of points in a MediaPipe Face Mesh landmark set.
pub const FACE_MESH_LANDMARKS: usize = 468;

/// MediaPipe Face Mesh indices of the anatomical reference points used for gating and zoning.
///
/// "Left" and "right" are image sides: the left eye is the one with the smaller x.
pub mod indices {
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const RIGHT_EYE_OUTER: usize = 263;
    pub const LEFT_EYE_INNER: usize = 133;
    pub const RIGHT_EYE_INNER: usize = 362;
    /// Upper eyelid, mid point
    pub const LEFT_EYE_UPPER_LID: usize = 159;
    pub const RIGHT_EYE_UPPER_LID: usize = 386;
    pub const NOSE_TIP: usize = 1;
    /// Base of the nostril wing, where the nasolabial fold starts
    pub const LEFT_NOSTRIL_BASE: usize = 98;
    pub const RIGHT_NOSTRIL_BASE: usize = 327;
    pub const LEFT_MOUTH_CORNER: usize = 61;
    pub const RIGHT_MOUTH_CORNER: usize = 291;
}

/// An ordered set of normalized `[0, 1]` facial landmarks from an external detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        LandmarkSet { points }
    }

    /// from_json_str parses `[{"x": .., "y": ..}, ...]`.
    pub fn from_json_str(json: &str) -> Result<Self, SkinAgeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// to_pixels converts every landmark to absolute pixel coordinates.
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelLandmarks {
        let (w, h) = (width as f64, height as f64);
        PixelLandmarks {
            points: self.points.iter().map(|p| Point::new(p.x * w, p.y * h)).collect(),
        }
    }
}

impl From<Vec<[f64; 2]>> for LandmarkSet {
    fn from(raw: Vec<[f64; 2]>) -> Self {
        LandmarkSet::new(raw.into_iter().map(Point::from).collect())
    }
}

/// Landmarks in absolute pixel coordinates. Only produced by `LandmarkSet::to_pixels`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelLandmarks {
    points: Vec<Point>,
}

impl PixelLandmarks {
    /// get returns the landmark at `idx`.
    ///
    /// Panics if `idx` is out of range; callers must have passed the quality gate.
    pub fn get(&self, idx: usize) -> Point {
        self.points[idx]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// face_box returns the min/max of all landmark coordinates.
    pub fn face_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels() {
        let set = LandmarkSet::from(vec![[0.25, 0.5], [1.0, 0.0]]);
        let px = set.to_pixels(800, 600);
        assert_eq!(px.len(), 2);
        assert_eq!(px.get(0), Point::new(200.0, 300.0));
        assert_eq!(px.get(1), Point::new(800.0, 0.0));
    }

    #[test]
    fn test_face_box() {
        let set = LandmarkSet::from(vec![[0.1, 0.2], [0.5, 0.9], [0.3, 0.4]]);
        let bb = set.to_pixels(100, 100).face_box().unwrap();
        assert!((bb.min_x - 10.0).abs() < 1e-9);
        assert!((bb.max_x - 50.0).abs() < 1e-9);
        assert!((bb.min_y - 20.0).abs() < 1e-9);
        assert!((bb.max_y - 90.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let px = LandmarkSet::from(vec![[0.1, 0.2]]).to_pixels(10, 10);
        px.get(indices::LEFT_EYE_OUTER);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"x":0.25,"y":0.5},{"x":0.75,"y":0.5}]"#;
        let set = LandmarkSet::from_json_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.points()[1], Point::new(0.75, 0.5));
        assert!(LandmarkSet::from_json_str(r#"{"x":1}"#).is_err());
    }
}
