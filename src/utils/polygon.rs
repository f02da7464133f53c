use serde::Serialize;

use crate::utils::coordinate::{BoundingBox, Point};

/// Simple polygon, vertices in traversal order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Polygon { vertices }
    }

    /// Re-sorts the vertices clockwise (in y-down pixel space) around their centroid,
    /// so construction order never affects containment tests.
    pub fn clockwise(vertices: Vec<Point>) -> Self {
        let mut polygon = Polygon::new(vertices);
        let c = polygon.centroid();
        polygon
            .vertices
            .sort_by(|a, b| (a.y - c.y).atan2(a.x - c.x).total_cmp(&(b.y - c.y).atan2(b.x - c.x)));
        polygon
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Point {
        if self.vertices.is_empty() {
            return Point::default()
        }
        let n = self.vertices.len() as f64;
        let (sx, sy) = self.vertices.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    /// Shoelace area; positive when the traversal is clockwise in y-down space.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(&self.vertices)
    }

    /// Ray casting: a point is inside when a horizontal ray crosses an odd number of edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (pi, pj) = (self.vertices[i], self.vertices[j]);
            if ((pi.y > y) != (pj.y > y)) && (x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_contains() {
        let poly = Polygon::new(square());
        assert!(poly.contains(5.0, 5.0));
        assert!(!poly.contains(15.0, 5.0));
        assert!(!poly.contains(-1.0, 5.0));
        assert!(!poly.contains(5.0, 11.0));
    }

    #[test]
    fn test_contains_degenerate() {
        let poly = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(!poly.contains(0.5, 0.5));
    }

    #[test]
    fn test_clockwise_from_any_order() {
        let shuffled = vec![
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        let poly = Polygon::clockwise(shuffled);
        assert_eq!(poly.vertices(), square().as_slice());
        assert_eq!(poly.signed_area(), 100.0);
    }

    #[test]
    fn test_counter_clockwise_area_is_negative() {
        let mut ccw = square();
        ccw.reverse();
        assert_eq!(Polygon::new(ccw).signed_area(), -100.0);
    }

    #[test]
    fn test_centroid_and_bbox() {
        let poly = Polygon::new(square());
        assert_eq!(poly.centroid(), Point::new(5.0, 5.0));
        let bb = poly.bounding_box().unwrap();
        assert_eq!((bb.min_x, bb.min_y, bb.max_x, bb.max_y), (0.0, 0.0, 10.0, 10.0));
    }
}
