//! Display-ready breakdown of a grading result

use super::models::GradingResult;
use serde::Serialize;
use std::fmt;

const GOOD_THRESHOLD: f64 = 3.5;
const WARNING_THRESHOLD: f64 = 2.5;

/// Coarse color class for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Good,
    Warning,
    Poor,
}

impl ScoreTier {
    /// Classify a score. Anything that is not at least 2.5 (NaN included) is poor.
    pub fn for_score(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionRow {
    pub name: String,
    /// Similarity as a percentage with one decimal, e.g. "81.3%"
    pub score_percent_label: String,
    pub score: u8,
    pub tier: ScoreTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentableBreakdown {
    pub total_score: f64,
    /// e.g. "3.20/4.0"
    pub total_label: String,
    pub total_tier: ScoreTier,
    /// Preformatted text, shown verbatim
    pub feedback: String,
    pub rows: Vec<CriterionRow>,
}

/// Round to `decimals` places, ties away from zero (81.25 -> 81.3)
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub struct ResultPresenter;

impl ResultPresenter {
    /// Rows follow the criteria order the service responded with.
    pub fn present(result: &GradingResult) -> PresentableBreakdown {
        let rows = result
            .criteria
            .iter()
            .map(|(name, breakdown)| CriterionRow {
                name: name.clone(),
                score_percent_label: format!(
                    "{:.1}%",
                    round_half_up(breakdown.avg_similarity * 100.0, 1)
                ),
                score: breakdown.score,
                tier: ScoreTier::for_score(f64::from(breakdown.score)),
            })
            .collect();

        PresentableBreakdown {
            total_score: result.total_score,
            total_label: format!("{:.2}/4.0", round_half_up(result.total_score, 2)),
            total_tier: ScoreTier::for_score(result.total_score),
            feedback: result.feedback.clone(),
            rows,
        }
    }
}

impl fmt::Display for PresentableBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Score: {} [{}]", self.total_label, self.total_tier.as_str())?;
        writeln!(f)?;
        writeln!(f, "Detailed Feedback:")?;
        writeln!(f, "{}", self.feedback)?;
        writeln!(f)?;
        writeln!(f, "Criterion Breakdown:")?;
        for row in &self.rows {
            writeln!(
                f,
                "  {}: Similarity {} {}/4 [{}]",
                row.name,
                row.score_percent_label,
                row.score,
                row.tier.as_str()
            )?;
        }
        Ok(())
    }
}
