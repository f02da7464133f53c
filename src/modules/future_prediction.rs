//! Forward projection of the skin-age estimate and intervention suggestions.

use serde::Serialize;
use tracing::debug;

use crate::config::config::PredictionConfig;
use crate::modules::skin_age::SkinAgeEstimate;
use crate::modules::zone_segmentation::ZoneKind;

/// Projected ages at one horizon on one path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Scenario {
    pub years_from_now: u32,
    pub actual_age: i32,
    pub skin_age: i32,
    pub aging_years_added: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FuturePrediction {
    pub healthy_path: Vec<Scenario>,
    pub current_path: Vec<Scenario>,
    pub healthy_rate: f64,
    pub current_rate: f64,
}

/// project computes one scenario from the current estimate.
///
/// Each horizon is independent of every other: nothing compounds.
/// Ages saturate at the `i32` bounds for horizons beyond `i32::MAX` years.
pub fn project(current_skin_age: i32, actual_age: i32, years_from_now: u32, rate: f64) -> Scenario {
    let aging_years_added = (years_from_now as f64 * rate).round();
    let years = i32::try_from(years_from_now).unwrap_or(i32::MAX);
    Scenario {
        years_from_now,
        actual_age: actual_age.saturating_add(years),
        // float to int casts saturate
        skin_age: (current_skin_age as f64 + aging_years_added).round() as i32,
        aging_years_added: aging_years_added as i32,
    }
}

#[derive(Debug, Clone, Default)]
pub struct FuturePredictor {
    config: PredictionConfig,
}

impl FuturePredictor {
    pub fn new(config: PredictionConfig) -> Self {
        FuturePredictor { config }
    }

    /// predict projects the estimate along the healthy and current paths.
    ///
    /// # Arguments
    /// * `estimate` - current skin-age estimate
    /// * `horizons` - year offsets; the configured defaults when `None`
    ///
    /// # Returns
    /// * `FuturePrediction`
    pub fn predict(&self, estimate: &SkinAgeEstimate, horizons: Option<&[u32]>) -> FuturePrediction {
        let horizons = horizons.unwrap_or(self.config.default_horizons.as_slice());
        let path = |rate: f64| -> Vec<Scenario> {
            horizons
                .iter()
                .map(|&y| project(estimate.estimated_skin_age, estimate.actual_age, y, rate))
                .collect()
        };

        let prediction = FuturePrediction {
            healthy_path: path(self.config.healthy_rate),
            current_path: path(self.config.current_rate),
            healthy_rate: self.config.healthy_rate,
            current_rate: self.config.current_rate,
        };
        debug!(horizons = ?horizons, "future scenarios projected");
        prediction
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Severity::None,
            1 => Severity::Mild,
            2 => Severity::Moderate,
            _ => Severity::Severe,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Intervention {
    pub concern: String,
    pub severity: Severity,
    /// 1 is the most urgent
    pub priority: usize,
    pub recommendations: Vec<&'static str>,
}

pub const UNEVEN_SKIN_TONE: &str = "Uneven Skin Tone";

const EXPRESSION_LINE_CARE: &[&str] = &[
    "Apply a retinoid serum at night to support collagen renewal",
    "Use a daily broad-spectrum SPF 30+ sunscreen",
    "Keep the forehead relaxed; consider discussing neuromodulator treatment with a dermatologist",
    "Moisturize with peptides or hyaluronic acid morning and evening",
];

const EYE_AREA_CARE: &[&str] = &[
    "Use an eye cream with retinol or peptides",
    "Wear UV-protective sunglasses outdoors to reduce squinting",
    "Aim for 7-9 hours of sleep per night",
    "Apply a gentle, fragrance-free moisturizer around the eyes",
];

const CHEEK_CARE: &[&str] = &[
    "Use a vitamin C serum in the morning for firmness and glow",
    "Stay hydrated and include antioxidant-rich foods in your diet",
    "Apply sunscreen generously to the cheeks, reapplying every two hours outdoors",
    "Consider facial massage or gua sha to support circulation",
];

const NASOLABIAL_CARE: &[&str] = &[
    "Use a hyaluronic acid serum to plump the skin",
    "Sleep on your back to reduce compression lines",
    "Apply a collagen-supporting moisturizer with peptides",
    "Ask a dermatologist about dermal filler options for deeper folds",
];

const TONE_CARE: &[&str] = &[
    "Use a niacinamide or vitamin C serum to even out skin tone",
    "Exfoliate gently with AHA or BHA one to two times per week",
    "Wear broad-spectrum sunscreen daily to prevent new dark spots",
    "Consider azelaic acid or a professional peel for persistent hyperpigmentation",
];

/// Recommendation list for a zone type.
pub fn recommendations_for(kind: ZoneKind) -> &'static [&'static str] {
    match kind {
        ZoneKind::Forehead | ZoneKind::Glabella => EXPRESSION_LINE_CARE,
        ZoneKind::CrowsFeet => EYE_AREA_CARE,
        ZoneKind::UpperCheek | ZoneKind::LowerCheek => CHEEK_CARE,
        ZoneKind::Nasolabial => NASOLABIAL_CARE,
    }
}

/// generate_interventions builds a prioritized list from the estimate's top concerns.
///
/// An "Uneven Skin Tone" entry is appended when the overall pigmentation
/// score is above zero.
pub fn generate_interventions(estimate: &SkinAgeEstimate) -> Vec<Intervention> {
    let mut interventions: Vec<Intervention> = estimate
        .top_concerns
        .iter()
        .enumerate()
        .map(|(i, c)| Intervention {
            concern: c.display_name.to_string(),
            severity: Severity::from_score(c.wrinkle_score),
            priority: i + 1,
            recommendations: recommendations_for(c.zone.kind()).to_vec(),
        })
        .collect();

    if estimate.overall_pigmentation_score > 0 {
        interventions.push(Intervention {
            concern: UNEVEN_SKIN_TONE.to_string(),
            severity: Severity::from_score(estimate.overall_pigmentation_score),
            priority: interventions.len() + 1,
            recommendations: TONE_CARE.to_vec(),
        });
    }
    interventions
}
