//! Polygon-masked pixel sampling and per-zone statistics.

use anyhow::Error;
use serde::Serialize;
use tracing::debug;

use crate::utils::image::PixelSource;
use crate::utils::polygon::Polygon;
use crate::utils::utils::{mean, population_std_dev};

/// Per-pixel channel values of the pixels inside one zone polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelSamples {
    pub r: Vec<f64>,
    pub g: Vec<f64>,
    pub b: Vec<f64>,
    /// `(r + g + b) / 3`
    pub brightness: Vec<f64>,
}

impl PixelSamples {
    fn with_capacity(capacity: usize) -> Self {
        PixelSamples {
            r: Vec::with_capacity(capacity),
            g: Vec::with_capacity(capacity),
            b: Vec::with_capacity(capacity),
            brightness: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, rgb: [u8; 3]) {
        let [r, g, b] = rgb.map(f64::from);
        self.r.push(r);
        self.g.push(g);
        self.b.push(b);
        self.brightness.push((r + g + b) / 3.0);
    }

    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }

    /// statistics reduces the samples; an empty set yields all zeros.
    pub fn statistics(&self) -> ZoneStatistics {
        let channel_sd = [&self.r, &self.g, &self.b].map(|c| population_std_dev(c));
        ZoneStatistics {
            texture_variance: population_std_dev(&self.brightness),
            pigmentation_variance: channel_sd.iter().sum::<f64>() / 3.0,
            average_brightness: mean(&self.brightness),
            pixel_count: self.len(),
        }
    }
}

/// Summary statistics of one zone.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ZoneStatistics {
    /// Population standard deviation of brightness
    pub texture_variance: f64,
    /// Mean of the R, G and B population standard deviations
    pub pigmentation_variance: f64,
    pub average_brightness: f64,
    pub pixel_count: usize,
}

/// extract_samples collects every pixel of `source` inside `polygon`.
///
/// Only the polygon's bounding box, clipped to the image, is read from the
/// source. A polygon entirely outside the image yields an empty set.
///
/// # Arguments
/// * `polygon` - zone polygon in absolute pixel coordinates
/// * `source` - pixel buffer accessor
///
/// # Returns
/// * `Result<PixelSamples, Error>`
pub fn extract_samples<S: PixelSource + ?Sized>(polygon: &Polygon, source: &S) -> Result<PixelSamples, Error> {
    let bb = match polygon.bounding_box() {
        Some(bb) => bb,
        None => return Ok(PixelSamples::default()),
    };

    let x0 = (bb.min_x.floor() as i64).max(0);
    let y0 = (bb.min_y.floor() as i64).max(0);
    let x1 = (bb.max_x.ceil() as i64).min(source.width() as i64);
    let y1 = (bb.max_y.ceil() as i64).min(source.height() as i64);
    let (w, h) = (x1 - x0, y1 - y0);

    if w <= 0 || h <= 0 {
        debug!(x0, y0, x1, y1, "polygon lies outside the image, no pixels sampled");
        return Ok(PixelSamples::default())
    }

    let region = source.read_region(x0 as u32, y0 as u32, w as u32, h as u32)?;
    let mut samples = PixelSamples::with_capacity((w * h) as usize);

    for dy in 0..h as usize {
        for dx in 0..w as usize {
            let x = x0 as f64 + dx as f64;
            let y = y0 as f64 + dy as f64;
            if polygon.contains(x, y) {
                samples.push([region[[dy, dx, 0]], region[[dy, dx, 1]], region[[dy, dx, 2]]]);
            }
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::striped_image;
    use crate::utils::coordinate::Point;
    use crate::utils::image::RgbImage;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::clockwise(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    #[test]
    fn test_uniform_region() {
        let img = RgbImage::filled(50, 50, [90, 120, 150]);
        let samples = extract_samples(&rect(10.0, 10.0, 20.0, 20.0), &img).unwrap();
        assert!(!samples.is_empty());
        let stats = samples.statistics();
        assert_eq!(stats.texture_variance, 0.0);
        assert_eq!(stats.pigmentation_variance, 0.0);
        assert_eq!(stats.average_brightness, 120.0);
        assert_eq!(stats.pixel_count, samples.len());
    }

    #[test]
    fn test_striped_region_texture() {
        let img = striped_image(40, 40, 100, 200);
        let stats = extract_samples(&rect(5.0, 5.0, 29.0, 29.0), &img).unwrap().statistics();
        // rows 5..=28 are sampled: 12 dark, 12 light
        assert_eq!(stats.average_brightness, 150.0);
        assert_eq!(stats.texture_variance, 50.0);
        assert_eq!(stats.pigmentation_variance, 50.0);
    }

    #[test]
    fn test_channel_spread_only_in_pigmentation() {
        // brightness stays constant (sum 300) while channels vary
        let img = RgbImage::from_fn(20, 20, |x, _| if x % 2 == 0 { [120, 100, 80] } else { [80, 100, 120] });
        let stats = extract_samples(&rect(2.0, 2.0, 18.0, 18.0), &img).unwrap().statistics();
        assert_eq!(stats.texture_variance, 0.0);
        // R and B each deviate by 20, G by 0
        assert!((stats.pigmentation_variance - 40.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_outside_image() {
        let img = RgbImage::filled(50, 50, [200, 200, 200]);
        let samples = extract_samples(&rect(-80.0, -60.0, -10.0, -5.0), &img).unwrap();
        assert!(samples.is_empty());
        assert_eq!(samples.statistics(), ZoneStatistics::default());

        let beyond = extract_samples(&rect(60.0, 10.0, 90.0, 20.0), &img).unwrap();
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_polygon_partially_outside_is_clipped() {
        let img = RgbImage::filled(20, 20, [10, 20, 30]);
        let samples = extract_samples(&rect(-10.0, -10.0, 5.0, 5.0), &img).unwrap();
        assert!(!samples.is_empty());
        assert!(samples.len() <= 25);
        assert_eq!(samples.statistics().average_brightness, 20.0);
    }

    #[test]
    fn test_only_pixels_inside_polygon() {
        // left half dark, right half bright; triangle covering only the left side
        let img = RgbImage::from_fn(40, 40, |x, _| if x < 20 { [10, 10, 10] } else { [250, 250, 250] });
        let triangle = Polygon::clockwise(vec![Point::new(2.0, 2.0), Point::new(15.0, 20.0), Point::new(2.0, 38.0)]);
        let stats = extract_samples(&triangle, &img).unwrap().statistics();
        assert_eq!(stats.average_brightness, 10.0);
    }
}
