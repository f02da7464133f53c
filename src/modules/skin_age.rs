//! Composite aging index and skin-age estimate.

use serde::Serialize;
use tracing::info;

use crate::modules::clinical_scorer::{ClinicalScore, ZoneMetrics};
use crate::modules::zone_segmentation::ZoneId;

/// Maps a 0-3 score onto the nominal 0-100 scale.
pub const SCORE_NORMALIZATION: f64 = 33.33;

/// Weight of the overall pigmentation score in the composite index.
pub const PIGMENTATION_WEIGHT: f64 = 0.07;

/// Number of zones reported as top concerns.
const TOP_CONCERNS: usize = 3;

/// zone_weight returns the composite-index weight of a zone.
///
/// Known inconsistency: the zone weights sum to 1.01, and 1.08 with
/// `PIGMENTATION_WEIGHT`, so the index can exceed 100. Kept for output parity.
pub fn zone_weight(zone: ZoneId) -> f64 {
    match zone {
        ZoneId::Forehead => 0.15,
        ZoneId::Glabella => 0.10,
        ZoneId::LeftCrowsFeet | ZoneId::RightCrowsFeet => 0.12,
        ZoneId::LeftUpperCheek | ZoneId::RightUpperCheek => 0.08,
        ZoneId::LeftNasolabial | ZoneId::RightNasolabial => 0.12,
        ZoneId::LeftLowerCheek | ZoneId::RightLowerCheek => 0.06,
    }
}

/// age_offset maps the composite index onto years added to the actual age.
pub fn age_offset(composite_index: f64) -> i32 {
    if composite_index < 15.0 {
        -5
    } else if composite_index < 30.0 {
        -2
    } else if composite_index < 45.0 {
        2
    } else if composite_index < 55.0 {
        5
    } else {
        8
    }
}

/// One zone's share of the composite index.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ZoneContribution {
    pub zone: ZoneId,
    pub display_name: &'static str,
    pub wrinkle_score: u8,
    /// 0-100
    pub normalized_score: f64,
    pub weight: f64,
    pub contribution: f64,
}

impl ZoneContribution {
    fn from_metrics(m: &ZoneMetrics) -> Self {
        let normalized_score = m.wrinkle_score as f64 * SCORE_NORMALIZATION;
        let weight = zone_weight(m.zone);
        ZoneContribution {
            zone: m.zone,
            display_name: m.display_name,
            wrinkle_score: m.wrinkle_score,
            normalized_score,
            weight,
            contribution: normalized_score * weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkinAgeEstimate {
    pub estimated_skin_age: i32,
    pub actual_age: i32,
    /// `estimated_skin_age - actual_age`
    pub age_difference: i32,
    /// Nominally 0-100, not clamped
    pub composite_index: f64,
    pub breakdown: Vec<ZoneContribution>,
    pub pigmentation_contribution: f64,
    pub overall_pigmentation_score: u8,
    /// Up to three zones with the highest raw wrinkle score
    pub top_concerns: Vec<ZoneContribution>,
}

/// estimate_skin_age turns a clinical score into a skin-age estimate.
///
/// `actual_age` is taken as-is; range checks belong to the caller.
pub fn estimate_skin_age(score: &ClinicalScore, actual_age: i32) -> SkinAgeEstimate {
    let breakdown: Vec<ZoneContribution> = score.zones.iter().map(ZoneContribution::from_metrics).collect();
    let pigmentation_contribution =
        score.overall_pigmentation_score as f64 * SCORE_NORMALIZATION * PIGMENTATION_WEIGHT;
    let composite_index = breakdown.iter().map(|c| c.contribution).sum::<f64>() + pigmentation_contribution;

    let offset = age_offset(composite_index);
    let estimated_skin_age = actual_age + offset;

    // stable: ties keep zone order
    let mut top_concerns = breakdown.clone();
    top_concerns.sort_by(|a, b| b.wrinkle_score.cmp(&a.wrinkle_score));
    top_concerns.truncate(TOP_CONCERNS);

    info!(
        actual_age,
        estimated_skin_age,
        composite_index,
        offset,
        "skin age estimated"
    );

    SkinAgeEstimate {
        estimated_skin_age,
        actual_age,
        age_difference: offset,
        composite_index,
        breakdown,
        pigmentation_contribution,
        overall_pigmentation_score: score.overall_pigmentation_score,
        top_concerns,
    }
}
