//! Facial zone geometry.
//!
//! Every zone polygon is derived from a handful of anatomical reference
//! landmarks plus offsets expressed as fractions of the face bounding box.
//! All offset constants live in this module so they can be tuned without
//! touching statistics or scoring.

use nalgebra::Vector2;
use serde::Serialize;
use tracing::debug;

use crate::helper::landmarks::{indices, LandmarkSet, PixelLandmarks};
use crate::modules::skin_age::zone_weight;
use crate::utils::coordinate::Point;
use crate::utils::polygon::Polygon;

// Offsets as fractions of face box width (W) or height (H).
/// Forehead spans from this far above the upper eyelids (H)...
const FOREHEAD_TOP: f64 = 0.25;
/// ...down to this far above them (H). Also the top edge of the glabella.
const FOREHEAD_BOTTOM: f64 = 0.08;
/// Half width of the glabella around the inner-eye midpoint (W)
const GLABELLA_HALF_WIDTH: f64 = 0.06;
/// Lateral reach of the crow's-feet box beyond the outer eye corner (W)
const CROWS_FEET_REACH: f64 = 0.10;
/// Gap between the outer eye corner and the crow's-feet box (W)
const CROWS_FEET_GAP: f64 = 0.01;
/// Half height of the crow's-feet box around the eye corner (H)
const CROWS_FEET_HALF_HEIGHT: f64 = 0.05;
/// Gap below the eye line before the upper cheek starts (H)
const UPPER_CHEEK_GAP: f64 = 0.06;
/// Width of the quad swept along each nasolabial fold (W)
const NASOLABIAL_WIDTH: f64 = 0.04;
/// Gap below the nose tip before the lower cheek starts (H)
const LOWER_CHEEK_GAP: f64 = 0.02;
/// Reach of the lower cheek below the mouth corner (H)
const LOWER_CHEEK_REACH: f64 = 0.08;
/// Horizontal clearance kept from the mouth corner (W)
const LOWER_CHEEK_MOUTH_GAP: f64 = 0.02;

/// The ten analysis zones, in output order.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Forehead,
    Glabella,
    LeftCrowsFeet,
    RightCrowsFeet,
    LeftUpperCheek,
    RightUpperCheek,
    LeftNasolabial,
    RightNasolabial,
    LeftLowerCheek,
    RightLowerCheek,
}

/// Zone type, shared by the left/right variants of a zone.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Forehead,
    Glabella,
    CrowsFeet,
    UpperCheek,
    Nasolabial,
    LowerCheek,
}

impl ZoneId {
    pub const ALL: [ZoneId; 10] = [
        ZoneId::Forehead,
        ZoneId::Glabella,
        ZoneId::LeftCrowsFeet,
        ZoneId::RightCrowsFeet,
        ZoneId::LeftUpperCheek,
        ZoneId::RightUpperCheek,
        ZoneId::LeftNasolabial,
        ZoneId::RightNasolabial,
        ZoneId::LeftLowerCheek,
        ZoneId::RightLowerCheek,
    ];

    /// Internal identifier, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneId::Forehead => "forehead",
            ZoneId::Glabella => "glabella",
            ZoneId::LeftCrowsFeet => "left_crowsfeet",
            ZoneId::RightCrowsFeet => "right_crowsfeet",
            ZoneId::LeftUpperCheek => "left_upper_cheek",
            ZoneId::RightUpperCheek => "right_upper_cheek",
            ZoneId::LeftNasolabial => "left_nasolabial",
            ZoneId::RightNasolabial => "right_nasolabial",
            ZoneId::LeftLowerCheek => "left_lower_cheek",
            ZoneId::RightLowerCheek => "right_lower_cheek",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ZoneId::Forehead => "Forehead",
            ZoneId::Glabella => "Glabella (Frown Lines)",
            ZoneId::LeftCrowsFeet => "Left Crow's Feet",
            ZoneId::RightCrowsFeet => "Right Crow's Feet",
            ZoneId::LeftUpperCheek => "Left Upper Cheek",
            ZoneId::RightUpperCheek => "Right Upper Cheek",
            ZoneId::LeftNasolabial => "Left Nasolabial Fold",
            ZoneId::RightNasolabial => "Right Nasolabial Fold",
            ZoneId::LeftLowerCheek => "Left Lower Cheek",
            ZoneId::RightLowerCheek => "Right Lower Cheek",
        }
    }

    pub fn kind(&self) -> ZoneKind {
        match self {
            ZoneId::Forehead => ZoneKind::Forehead,
            ZoneId::Glabella => ZoneKind::Glabella,
            ZoneId::LeftCrowsFeet | ZoneId::RightCrowsFeet => ZoneKind::CrowsFeet,
            ZoneId::LeftUpperCheek | ZoneId::RightUpperCheek => ZoneKind::UpperCheek,
            ZoneId::LeftNasolabial | ZoneId::RightNasolabial => ZoneKind::Nasolabial,
            ZoneId::LeftLowerCheek | ZoneId::RightLowerCheek => ZoneKind::LowerCheek,
        }
    }
}

impl ZoneKind {
    /// Static quality-of-fit indicator for the zone's geometry.
    pub fn confidence(&self) -> f64 {
        match self {
            ZoneKind::Forehead => 0.95,
            ZoneKind::Glabella => 0.90,
            ZoneKind::CrowsFeet => 0.85,
            ZoneKind::UpperCheek => 0.92,
            ZoneKind::Nasolabial => 0.88,
            ZoneKind::LowerCheek => 0.87,
        }
    }
}

/// A named facial region in absolute pixel coordinates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub display_name: &'static str,
    /// Clockwise around its centroid
    pub polygon: Polygon,
    pub confidence: f64,
    pub weight: f64,
}

impl Zone {
    fn new(id: ZoneId, vertices: Vec<Point>) -> Self {
        Zone {
            id,
            display_name: id.display_name(),
            polygon: Polygon::clockwise(vertices),
            confidence: id.kind().confidence(),
            weight: zone_weight(id),
        }
    }
}

/// segment_zones derives the ten analysis zones from a gated landmark set.
///
/// # Arguments
/// * `landmarks` - normalized landmarks that passed the quality gate
/// * `width` - image width in pixels
/// * `height` - image height in pixels
///
/// # Returns
/// * `Vec<Zone>` - always ten zones, in `ZoneId::ALL` order
///
/// # Panics
/// If a reference landmark index is out of range, i.e. the quality gate was skipped.
pub fn segment_zones(landmarks: &LandmarkSet, width: u32, height: u32) -> Vec<Zone> {
    let frame = FaceFrame::from_landmarks(&landmarks.to_pixels(width, height));
    let zones: Vec<Zone> = ZoneId::ALL
        .iter()
        .map(|&id| Zone::new(id, zone_vertices(id, &frame)))
        .collect();
    debug!(count = zones.len(), width, height, "segmented facial zones");
    zones
}

/// Reference points and face-box scale shared by all zone constructions.
struct FaceFrame {
    face_w: f64,
    face_h: f64,
    left_outer: Point,
    right_outer: Point,
    left_inner: Point,
    right_inner: Point,
    /// Topmost upper-eyelid y
    lid_top: f64,
    nose_tip: Point,
    left_nostril: Point,
    right_nostril: Point,
    left_mouth: Point,
    right_mouth: Point,
}

impl FaceFrame {
    fn from_landmarks(px: &PixelLandmarks) -> Self {
        let (face_w, face_h) = px.face_box().map(|bb| (bb.width(), bb.height())).unwrap_or_default();
        FaceFrame {
            face_w,
            face_h,
            left_outer: px.get(indices::LEFT_EYE_OUTER),
            right_outer: px.get(indices::RIGHT_EYE_OUTER),
            left_inner: px.get(indices::LEFT_EYE_INNER),
            right_inner: px.get(indices::RIGHT_EYE_INNER),
            lid_top: px.get(indices::LEFT_EYE_UPPER_LID).y.min(px.get(indices::RIGHT_EYE_UPPER_LID).y),
            nose_tip: px.get(indices::NOSE_TIP),
            left_nostril: px.get(indices::LEFT_NOSTRIL_BASE),
            right_nostril: px.get(indices::RIGHT_NOSTRIL_BASE),
            left_mouth: px.get(indices::LEFT_MOUTH_CORNER),
            right_mouth: px.get(indices::RIGHT_MOUTH_CORNER),
        }
    }

    fn w(&self, fraction: f64) -> f64 {
        fraction * self.face_w
    }

    fn h(&self, fraction: f64) -> f64 {
        fraction * self.face_h
    }
}

fn zone_vertices(id: ZoneId, f: &FaceFrame) -> Vec<Point> {
    match id {
        ZoneId::Forehead => rect(
            f.left_outer.x,
            f.lid_top - f.h(FOREHEAD_TOP),
            f.right_outer.x,
            f.lid_top - f.h(FOREHEAD_BOTTOM),
        ),
        ZoneId::Glabella => {
            let mid_x = (f.left_inner.x + f.right_inner.x) / 2.0;
            let inner_y = (f.left_inner.y + f.right_inner.y) / 2.0;
            rect(
                mid_x - f.w(GLABELLA_HALF_WIDTH),
                f.lid_top - f.h(FOREHEAD_BOTTOM),
                mid_x + f.w(GLABELLA_HALF_WIDTH),
                inner_y,
            )
        }
        ZoneId::LeftCrowsFeet => rect(
            f.left_outer.x - f.w(CROWS_FEET_REACH),
            f.left_outer.y - f.h(CROWS_FEET_HALF_HEIGHT),
            f.left_outer.x - f.w(CROWS_FEET_GAP),
            f.left_outer.y + f.h(CROWS_FEET_HALF_HEIGHT),
        ),
        ZoneId::RightCrowsFeet => rect(
            f.right_outer.x + f.w(CROWS_FEET_GAP),
            f.right_outer.y - f.h(CROWS_FEET_HALF_HEIGHT),
            f.right_outer.x + f.w(CROWS_FEET_REACH),
            f.right_outer.y + f.h(CROWS_FEET_HALF_HEIGHT),
        ),
        ZoneId::LeftUpperCheek => rect(
            f.left_outer.x,
            f.left_outer.y + f.h(UPPER_CHEEK_GAP),
            f.left_inner.x,
            f.nose_tip.y,
        ),
        ZoneId::RightUpperCheek => rect(
            f.right_inner.x,
            f.right_outer.y + f.h(UPPER_CHEEK_GAP),
            f.right_outer.x,
            f.nose_tip.y,
        ),
        ZoneId::LeftNasolabial => swept_quad(f.left_nostril, f.left_mouth, f.w(NASOLABIAL_WIDTH)),
        ZoneId::RightNasolabial => swept_quad(f.right_nostril, f.right_mouth, f.w(NASOLABIAL_WIDTH)),
        ZoneId::LeftLowerCheek => rect(
            f.left_outer.x,
            f.nose_tip.y + f.h(LOWER_CHEEK_GAP),
            f.left_mouth.x - f.w(LOWER_CHEEK_MOUTH_GAP),
            f.left_mouth.y + f.h(LOWER_CHEEK_REACH),
        ),
        ZoneId::RightLowerCheek => rect(
            f.right_mouth.x + f.w(LOWER_CHEEK_MOUTH_GAP),
            f.nose_tip.y + f.h(LOWER_CHEEK_GAP),
            f.right_outer.x,
            f.right_mouth.y + f.h(LOWER_CHEEK_REACH),
        ),
    }
}

/// Axis-aligned rectangle through two opposite corners, in any order.
fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    let (left, right) = (x0.min(x1), x0.max(x1));
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    vec![
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}

/// Quad of the given width swept along the segment `from -> to`.
fn swept_quad(from: Point, to: Point, width: f64) -> Vec<Point> {
    let dir = to.as_point2() - from.as_point2();
    let normal = Vector2::new(-dir.y, dir.x)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector2::x);
    let half = normal * (width / 2.0);
    vec![from.offset(half), to.offset(half), to.offset(-half), from.offset(-half)]
}
