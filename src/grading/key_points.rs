//! Ordered key points an essay is expected to cover

use crate::error::{GraderError, Result};
use serde::Serialize;

/// Topic label plus the ordered list of required talking points.
///
/// Every stored point is non-empty after trimming. Duplicates are allowed and
/// order is preserved, since downstream matching and display both follow it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyPointSet {
    topic: String,
    points: Vec<String>,
}

impl KeyPointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw parts, dropping blank points
    pub fn from_parts<I, S>(topic: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            topic: topic.into(),
            points: Vec::new(),
        };
        for point in points {
            set.add_point(point.as_ref());
        }
        set
    }

    /// Append a trimmed point. Blank input is ignored.
    pub fn add_point(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        self.points.push(trimmed.to_string());
    }

    /// Remove the point at `index`; indices after it shift down by one.
    pub fn remove_point(&mut self, index: usize) -> Result<String> {
        if index >= self.points.len() {
            return Err(GraderError::IndexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        Ok(self.points.remove(index))
    }

    pub fn set_topic(&mut self, value: impl Into<String>) {
        self.topic = value.into();
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn points(&self) -> &[String] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
