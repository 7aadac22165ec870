pub mod category;
pub mod engine;
pub mod factors;
pub mod label;

pub use category::{weight_for, Category, CATEGORY_WEIGHTS, DEFAULT_WEIGHT};
pub use engine::{score, weighted_overall, CategoryScore, CompatibilityResult};
pub use label::{detail_for, label_for};
