//! Shared fixtures for unit tests.

use crate::helper::landmarks::{indices, LandmarkSet, FACE_MESH_LANDMARKS};
use crate::utils::coordinate::Point;
use crate::utils::image::RgbImage;

/// Forehead top, chin and the two cheekbones bound the synthetic face box.
const FOREHEAD_TOP: usize = 10;
const CHIN: usize = 152;
const LEFT_CHEEKBONE: usize = 234;
const RIGHT_CHEEKBONE: usize = 454;

/// landmarks_with_eyes builds `count` landmarks at the frame center with the
/// outer eye corners placed at `left` and `right`.
pub(crate) fn landmarks_with_eyes(count: usize, left: Point, right: Point) -> LandmarkSet {
    let mut points = vec![Point::new(0.5, 0.5); count];
    points[indices::LEFT_EYE_OUTER] = left;
    points[indices::RIGHT_EYE_OUTER] = right;
    LandmarkSet::new(points)
}

/// synthetic_face returns a frontal, level 468-point face.
///
/// On a 1000x1000 image the face box spans x 250..750 and y 150..850, the
/// outer eye corners sit at (330, 400) and (670, 400).
pub(crate) fn synthetic_face() -> LandmarkSet {
    let mut points = vec![Point::new(0.5, 0.5); FACE_MESH_LANDMARKS];
    let mut set = |idx: usize, x: f64, y: f64| points[idx] = Point::new(x, y);

    set(FOREHEAD_TOP, 0.5, 0.15);
    set(CHIN, 0.5, 0.85);
    set(LEFT_CHEEKBONE, 0.25, 0.5);
    set(RIGHT_CHEEKBONE, 0.75, 0.5);

    set(indices::LEFT_EYE_OUTER, 0.33, 0.40);
    set(indices::RIGHT_EYE_OUTER, 0.67, 0.40);
    set(indices::LEFT_EYE_INNER, 0.44, 0.40);
    set(indices::RIGHT_EYE_INNER, 0.56, 0.40);
    set(indices::LEFT_EYE_UPPER_LID, 0.385, 0.37);
    set(indices::RIGHT_EYE_UPPER_LID, 0.615, 0.37);
    set(indices::NOSE_TIP, 0.5, 0.55);
    set(indices::LEFT_NOSTRIL_BASE, 0.45, 0.58);
    set(indices::RIGHT_NOSTRIL_BASE, 0.55, 0.58);
    set(indices::LEFT_MOUTH_CORNER, 0.41, 0.68);
    set(indices::RIGHT_MOUTH_CORNER, 0.59, 0.68);

    LandmarkSet::new(points)
}

/// striped_image alternates rows of `dark` and `light` gray.
pub(crate) fn striped_image(width: u32, height: u32, dark: u8, light: u8) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| {
        let v = if y % 2 == 0 { dark } else { light };
        [v, v, v]
    })
}
