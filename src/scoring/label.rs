use super::category::Category;

/// Headline label for an overall score. Thresholds are checked high to low.
pub fn label_for(overall: u8) -> &'static str {
    match overall {
        90.. => "Destined Soulmates!",
        80..=89 => "Amazing Connection!",
        75..=79 => "Great Compatibility!",
        70..=74 => "Good Match!",
        _ => "Interesting Pair!",
    }
}

/// One-line description of a single category score.
pub fn detail_for(category: Category, score: f64) -> String {
    let name = category.name();
    if score >= 90.0 {
        format!("Exceptional {} compatibility", name)
    } else if score >= 80.0 {
        format!("Strong {} alignment", name)
    } else if score >= 75.0 {
        format!("Good {} match", name)
    } else {
        format!("Unique {} qualities", name)
    }
}
