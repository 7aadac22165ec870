use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight applied to a category that is not in [`CATEGORY_WEIGHTS`].
pub const DEFAULT_WEIGHT: f64 = 0.2;

/// One facial-similarity dimension compared between two faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Face Shape")]
    FaceShape,
    Smile,
    Eyes,
    Symmetry,
    Harmony,
}

/// Categories in computation order with their weight in the overall score.
pub const CATEGORY_WEIGHTS: [(Category, f64); 5] = [
    (Category::FaceShape, 0.25),
    (Category::Smile, 0.25),
    (Category::Eyes, 0.15),
    (Category::Symmetry, 0.15),
    (Category::Harmony, 0.20),
];

impl Category {
    pub const ALL: [Category; 5] = [
        Category::FaceShape,
        Category::Smile,
        Category::Eyes,
        Category::Symmetry,
        Category::Harmony,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::FaceShape => "Face Shape",
            Category::Smile => "Smile",
            Category::Eyes => "Eyes",
            Category::Symmetry => "Symmetry",
            Category::Harmony => "Harmony",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn weight(&self) -> f64 {
        weight_for(self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weight for a category by display name, falling back to [`DEFAULT_WEIGHT`].
pub fn weight_for(name: &str) -> f64 {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(category, _)| category.name() == name)
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_WEIGHT)
}
