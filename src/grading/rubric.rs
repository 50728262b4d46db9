//! Fixed weighted rubric sent with every grading request

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// One weighted rubric criterion with descriptions for score levels 1..=4
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
    #[serde(rename = "scores")]
    pub score_descriptions: BTreeMap<u8, String>,
}

impl Criterion {
    fn new(name: &str, weight: f64, descriptions: [&str; 4]) -> Self {
        let score_descriptions = (1u8..)
            .zip(descriptions)
            .map(|(level, text)| (level, text.to_string()))
            .collect();
        Self {
            name: name.to_string(),
            weight,
            score_descriptions,
        }
    }

    pub fn description(&self, level: u8) -> Option<&str> {
        self.score_descriptions.get(&level).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    pub name: String,
    pub criteria: Vec<Criterion>,
}

impl RubricConfig {
    /// The essay quality rubric used for every submission
    pub fn essay_quality() -> Self {
        Self {
            name: "Essay Quality Rubric".to_string(),
            criteria: vec![
                Criterion::new(
                    "Content Accuracy",
                    0.4,
                    [
                        "Content is largely inaccurate or irrelevant.",
                        "Some content is accurate, but significant inaccuracies exist.",
                        "Content is mostly accurate with minor inaccuracies.",
                        "Content is highly accurate and relevant.",
                    ],
                ),
                Criterion::new(
                    "Clarity and Cohesion",
                    0.3,
                    [
                        "Ideas are unclear and disorganized.",
                        "Ideas are somewhat clear but lack cohesion.",
                        "Ideas are generally clear and cohesive.",
                        "Ideas are exceptionally clear, well-organized, and cohesive.",
                    ],
                ),
                Criterion::new(
                    "Use of Evidence",
                    0.3,
                    [
                        "Little to no relevant evidence provided.",
                        "Some evidence provided, but not well-integrated or explained.",
                        "Evidence is mostly relevant and adequately explained.",
                        "Evidence is highly relevant, well-integrated, and insightful.",
                    ],
                ),
            ],
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Whether the weights sum to 1.0. Not enforced anywhere.
    pub fn is_normalized(&self) -> bool {
        (self.total_weight() - 1.0).abs() <= WEIGHT_TOLERANCE
    }

    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name == name)
    }
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self::essay_quality()
    }
}
