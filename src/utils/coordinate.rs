use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A 2-D point, either normalized (`[0, 1]`) or in absolute pixels.
///
/// The two spaces are never mixed: landmark sets stay normalized until
/// `LandmarkSet::to_pixels` converts them once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        nalgebra::distance(&self.as_point2(), &other.as_point2())
    }

    pub fn offset(&self, by: Vector2<f64>) -> Point {
        Point::from(self.as_point2() + by)
    }

    pub fn as_point2(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

impl From<Point2<f64>> for Point {
    fn from(p: Point2<f64>) -> Self {
        Point { x: p.x, y: p.y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned bounding box `[min, max]` in whatever space its points live in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Returns `None` for an empty point slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.iter().fold(init, |bb, p| BoundingBox {
            min_x: bb.min_x.min(p.x),
            min_y: bb.min_y.min(p.y),
            max_x: bb.max_x.max(p.x),
            max_y: bb.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_point_offset() {
        let p = Point::new(1.0, 1.0).offset(Vector2::new(2.0, -1.0));
        assert_eq!(p, Point::new(3.0, 0.0));
    }

    #[test]
    fn test_bounding_box() {
        let points = vec![Point::new(10.0, 20.0), Point::new(30.0, 5.0), Point::new(15.0, 40.0)];
        let bb = BoundingBox::enclosing(&points).unwrap();
        assert_eq!(bb.min_x, 10.0);
        assert_eq!(bb.min_y, 5.0);
        assert_eq!(bb.max_x, 30.0);
        assert_eq!(bb.max_y, 40.0);
        assert_eq!(bb.width(), 20.0);
        assert_eq!(bb.height(), 35.0);

        assert!(BoundingBox::enclosing(&[]).is_none());
    }
}
