use serde::{Deserialize, Serialize};

use super::category::{weight_for, Category};
use super::factors::{self, clamp_category};
use super::label::{detail_for, label_for};
use crate::features::{FacialFeatureSet, NormalizedFeatures};

pub const OVERALL_FLOOR: u8 = 65;
pub const OVERALL_CEILING: u8 = 98;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Formula output before clamping (the smile bonus can push this past 100)
    #[serde(skip)]
    pub raw: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub overall_score: u8,
    /// In computation order
    pub category_scores: Vec<CategoryScore>,
    pub label: String,
    /// One line per category, same order as `category_scores`
    pub category_details: Vec<String>,
}

impl CompatibilityResult {
    pub fn category_score(&self, category: Category) -> Option<f64> {
        self.category_scores
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.score)
    }
}

/// Score the compatibility of two faces.
///
/// Pure and total: missing measurements are replaced by neutral values and
/// every score is clamped, so there is nothing to fail.
pub fn score(face1: &FacialFeatureSet, face2: &FacialFeatureSet) -> CompatibilityResult {
    let a = face1.normalize();
    let b = face2.normalize();

    let category_scores: Vec<CategoryScore> = Category::ALL
        .into_iter()
        .map(|category| {
            let raw = category_raw(category, &a, &b);
            CategoryScore {
                category,
                raw,
                score: clamp_category(raw),
            }
        })
        .collect();

    let overall_score = weighted_overall(
        category_scores
            .iter()
            .map(|c| (c.category.name(), c.score)),
    );

    let category_details = category_scores
        .iter()
        .map(|c| detail_for(c.category, c.score))
        .collect();

    CompatibilityResult {
        overall_score,
        category_scores,
        label: label_for(overall_score).to_string(),
        category_details,
    }
}

fn category_raw(category: Category, a: &NormalizedFeatures, b: &NormalizedFeatures) -> f64 {
    match category {
        Category::FaceShape => factors::face_shape(a, b),
        Category::Smile => factors::smile(a, b),
        Category::Eyes => factors::eyes(a, b),
        Category::Symmetry => factors::symmetry(a, b),
        Category::Harmony => factors::harmony(a, b),
    }
}

/// Weighted average of named category scores, truncated and clamped to the
/// overall range. Names missing from the weight table count with the
/// default weight.
pub fn weighted_overall<'a, I>(scores: I) -> u8
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (name, score) in scores {
        let weight = weight_for(name);
        weighted_sum += score * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return OVERALL_FLOOR;
    }

    let average = weighted_sum / total_weight;
    if !average.is_finite() {
        return OVERALL_FLOOR;
    }

    let truncated = average.trunc();
    truncated.clamp(f64::from(OVERALL_FLOOR), f64::from(OVERALL_CEILING)) as u8
}
