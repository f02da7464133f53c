//! Conversion of zone statistics into clinical sub-scores and a total score.

use anyhow::Error;
use serde::Serialize;
use tracing::{debug, warn};

use crate::modules::pixel_statistics::{extract_samples, ZoneStatistics};
use crate::modules::zone_segmentation::{Zone, ZoneId};
use crate::utils::image::PixelSource;

/// Reported maximum of `ClinicalScore::total_score`.
///
/// Known inconsistency: ten zones at up to 3 wrinkle points plus 3 for
/// pigmentation can reach 33, not 21. The value is kept for output parity
/// with existing reports; `ClinicalScore::display_percent` clamps instead.
pub const MAX_SCORE: u32 = 21;

/// Theoretical maximum of the total score for a full set of ten zones.
pub const THEORETICAL_MAX_SCORE: u32 = 10 * 3 + 3;

/// Pigmentation variance at or above which a zone scores 3 (binary, not graded).
const PIGMENTATION_THRESHOLD: f64 = 20.0;

/// wrinkle_score grades texture variance: `<15 -> 0, <25 -> 1, <40 -> 2, else 3`.
pub fn wrinkle_score(texture_variance: f64) -> u8 {
    if texture_variance < 15.0 {
        0
    } else if texture_variance < 25.0 {
        1
    } else if texture_variance < 40.0 {
        2
    } else {
        3
    }
}

/// pigmentation_score is binary: `<20 -> 0, else 3`.
pub fn pigmentation_score(pigmentation_variance: f64) -> u8 {
    if pigmentation_variance < PIGMENTATION_THRESHOLD {
        0
    } else {
        3
    }
}

/// radiance_score is inverse to brightness: `>140 -> 0, >=120 -> 1, >=100 -> 2, else 3`.
pub fn radiance_score(average_brightness: f64) -> u8 {
    if average_brightness > 140.0 {
        0
    } else if average_brightness >= 120.0 {
        1
    } else if average_brightness >= 100.0 {
        2
    } else {
        3
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ZoneMetrics {
    pub zone: ZoneId,
    pub display_name: &'static str,
    pub texture_variance: f64,
    pub pigmentation_variance: f64,
    pub average_brightness: f64,
    /// 0-3
    pub wrinkle_score: u8,
    /// 0 or 3
    pub pigmentation_score: u8,
    /// 0-3
    pub radiance_score: u8,
    pub weight: f64,
    pub pixel_count: usize,
}

impl ZoneMetrics {
    pub fn from_statistics(zone: &Zone, stats: &ZoneStatistics) -> Self {
        ZoneMetrics {
            zone: zone.id,
            display_name: zone.display_name,
            texture_variance: stats.texture_variance,
            pigmentation_variance: stats.pigmentation_variance,
            average_brightness: stats.average_brightness,
            wrinkle_score: wrinkle_score(stats.texture_variance),
            pigmentation_score: pigmentation_score(stats.pigmentation_variance),
            radiance_score: radiance_score(stats.average_brightness),
            weight: zone.weight,
            pixel_count: stats.pixel_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Moderate,
    Accelerated,
}

impl Rating {
    pub fn from_total(total: u32) -> Self {
        match total {
            0..=6 => Rating::Excellent,
            7..=12 => Rating::Moderate,
            _ => Rating::Accelerated,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::Excellent => "Your skin shows minimal signs of aging. Keep up your current routine.",
            Rating::Moderate => "Some signs of aging are visible. Targeted care can slow their progression.",
            Rating::Accelerated => "Signs of aging are ahead of typical. A consistent care routine is recommended.",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClinicalScore {
    /// One entry per zone with extractable pixels
    pub zones: Vec<ZoneMetrics>,
    /// Pixel-count-weighted mean of the zones' pigmentation variances
    pub overall_pigmentation_variance: f64,
    pub overall_pigmentation_score: u8,
    pub total_score: u32,
    pub max_score: u32,
    pub rating: Rating,
    pub rating_message: &'static str,
}

impl ClinicalScore {
    /// aggregate builds the clinical score from per-zone metrics.
    pub fn aggregate(zones: Vec<ZoneMetrics>) -> Self {
        let overall_pigmentation_variance = weighted_pigmentation_variance(&zones);
        let overall_pigmentation_score = pigmentation_score(overall_pigmentation_variance);
        let total_score = zones.iter().map(|z| z.wrinkle_score as u32).sum::<u32>() + overall_pigmentation_score as u32;
        let rating = Rating::from_total(total_score);

        ClinicalScore {
            zones,
            overall_pigmentation_variance,
            overall_pigmentation_score,
            total_score,
            max_score: MAX_SCORE,
            rating,
            rating_message: rating.message(),
        }
    }

    /// Total as a percentage of `max_score`, clamped to 100 for display.
    pub fn display_percent(&self) -> f64 {
        (self.total_score as f64 / self.max_score as f64 * 100.0).min(100.0)
    }
}

/// Pixel-count-weighted mean pigmentation variance; 0 when no pixels were sampled.
pub fn weighted_pigmentation_variance(zones: &[ZoneMetrics]) -> f64 {
    let (weighted_sum, pixels) = zones.iter().fold((0.0, 0usize), |(sum, n), z| {
        (sum + z.pigmentation_variance * z.pixel_count as f64, n + z.pixel_count)
    });
    if pixels == 0 {
        return 0.0
    }
    weighted_sum / pixels as f64
}

/// score_zones extracts statistics for every zone and aggregates the clinical score.
///
/// Zones without any extractable pixel are logged and left out of the result.
///
/// # Arguments
/// * `source` - pixel buffer accessor
/// * `zones` - zones from segmentation
///
/// # Returns
/// * `Result<ClinicalScore, Error>`
pub fn score_zones<S: PixelSource + ?Sized>(source: &S, zones: &[Zone]) -> Result<ClinicalScore, Error> {
    let mut metrics: Vec<ZoneMetrics> = Vec::with_capacity(zones.len());
    for zone in zones {
        let samples = extract_samples(&zone.polygon, source)?;
        if samples.is_empty() {
            warn!(zone = zone.id.as_str(), "zone has no pixels inside the image, skipping");
            continue
        }
        let m = ZoneMetrics::from_statistics(zone, &samples.statistics());
        debug!(
            zone = zone.id.as_str(),
            pixels = m.pixel_count,
            texture = m.texture_variance,
            pigmentation = m.pigmentation_variance,
            brightness = m.average_brightness,
            wrinkle = m.wrinkle_score,
            "scored zone"
        );
        metrics.push(m);
    }

    let score = ClinicalScore::aggregate(metrics);
    debug!(
        zones = score.zones.len(),
        total = score.total_score,
        rating = ?score.rating,
        "clinical score computed"
    );
    Ok(score)
}
