use crate::error::{RboError, Result};
use serde::{Deserialize, Serialize};

/// `p` used when the caller does not pick one.
pub const DEFAULT_TOP_WEIGHT: f64 = 0.95;

/// 1-based position on the rank axis shared by both structures of a comparison.
pub type RankLevel = usize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredHit {
    pub target_id: String,
    pub score: f64,
}

impl ScoredHit {
    pub fn new(target_id: impl Into<String>, score: f64) -> Self {
        Self {
            target_id: target_id.into(),
            score,
        }
    }
}

/// Tie-bucketed ranking: bucket `i` holds the identifiers at rank level `i + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RankingStructure {
    buckets: Vec<Vec<String>>,
}

impl RankingStructure {
    /// Builds a structure from explicit buckets, first bucket is rank level 1.
    /// Empty buckets are kept and count towards the depth.
    pub fn from_buckets<I, B, S>(buckets: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buckets: buckets
                .into_iter()
                .map(|bucket| bucket.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub(crate) fn open_level(&mut self) {
        self.buckets.push(Vec::new());
    }

    pub(crate) fn push_to_last(&mut self, target_id: String) {
        if let Some(bucket) = self.buckets.last_mut() {
            bucket.push(target_id);
        }
    }

    pub fn depth(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, level: RankLevel) -> Option<&[String]> {
        level
            .checked_sub(1)
            .and_then(|index| self.buckets.get(index))
            .map(Vec::as_slice)
    }

    /// Levels in increasing order, paired with their bucket.
    pub fn iter(&self) -> impl Iterator<Item = (RankLevel, &[String])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| (index + 1, bucket.as_slice()))
    }

    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.iter().flatten().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComparisonOptions {
    pub top_weight: f64,
}

impl ComparisonOptions {
    pub fn validate(&self) -> Result<()> {
        validate_top_weight(self.top_weight)
    }
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            top_weight: DEFAULT_TOP_WEIGHT,
        }
    }
}

/// Outcome of one comparison, ready to hand to a report layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonReport {
    pub score: f64,
    pub top_weight: f64,
    pub depth: usize,
    pub overlap: bool,
    pub hits_first: usize,
    pub hits_second: usize,
}

pub(crate) fn validate_top_weight(p: f64) -> Result<()> {
    if (0.0..1.0).contains(&p) {
        Ok(())
    } else {
        Err(RboError::InvalidTopWeight(p))
    }
}
