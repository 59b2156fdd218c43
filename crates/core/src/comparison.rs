use crate::error::Result;
use crate::models::{
    validate_top_weight, ComparisonOptions, ComparisonReport, RankingStructure, ScoredHit,
};
use crate::rankings::{build_rankings, is_overlap};
use crate::rbo::rbo;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Both hit lists of one comparison, aligned on a shared rank axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HitComparison {
    first: RankingStructure,
    second: RankingStructure,
    overlap: bool,
}

impl HitComparison {
    pub fn new(first: &[ScoredHit], second: &[ScoredHit]) -> Self {
        let overlap = is_overlap(first, second);
        let (first_ranking, second_ranking) = build_rankings(first, second);
        debug!(
            hits_first = first.len(),
            hits_second = second.len(),
            depth = first_ranking.depth(),
            overlap,
            "rankings built"
        );

        Self {
            first: first_ranking,
            second: second_ranking,
            overlap,
        }
    }

    pub fn first(&self) -> &RankingStructure {
        &self.first
    }

    pub fn second(&self) -> &RankingStructure {
        &self.second
    }

    pub fn overlap(&self) -> bool {
        self.overlap
    }

    pub fn depth(&self) -> usize {
        self.first.depth()
    }

    /// RBO of the two lists; exactly 0.0 when they share no target.
    pub fn rbo(&self, p: f64) -> Result<f64> {
        validate_top_weight(p)?;
        if !self.overlap {
            debug!(p, "no shared targets, skipping rbo");
            return Ok(0.0);
        }

        let score = rbo(&self.first, &self.second, p)?;
        trace!(p, score, depth = self.depth(), "rbo computed");
        Ok(score)
    }

    pub fn report(&self, options: &ComparisonOptions) -> Result<ComparisonReport> {
        let score = self.rbo(options.top_weight)?;
        Ok(ComparisonReport {
            score,
            top_weight: options.top_weight,
            depth: self.depth(),
            overlap: self.overlap,
            hits_first: self.first.item_count(),
            hits_second: self.second.item_count(),
        })
    }
}

/// End-to-end similarity of two hit lists for top weight `p`.
pub fn compare(first: &[ScoredHit], second: &[ScoredHit], p: f64) -> Result<f64> {
    validate_top_weight(p)?;
    HitComparison::new(first, second).rbo(p)
}

/// Scores many independent pairs in parallel, in input order.
pub fn compare_batch<A, B>(pairs: &[(A, B)], p: f64) -> Result<Vec<f64>>
where
    A: AsRef<[ScoredHit]> + Sync,
    B: AsRef<[ScoredHit]> + Sync,
{
    validate_top_weight(p)?;
    debug!(pairs = pairs.len(), p, "batch comparison");
    pairs
        .par_iter()
        .map(|(first, second)| compare(first.as_ref(), second.as_ref(), p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RboError;

    fn hits(items: &[(&str, f64)]) -> Vec<ScoredHit> {
        items
            .iter()
            .map(|(id, score)| ScoredHit::new(*id, *score))
            .collect()
    }

    fn scenario() -> (Vec<ScoredHit>, Vec<ScoredHit>) {
        (
            hits(&[("A", 10.0), ("B", 8.0), ("C", 8.0), ("D", 5.0)]),
            hits(&[("D", 10.0), ("B", 8.0), ("F", 8.0), ("A", 3.0)]),
        )
    }

    #[test]
    fn tied_scenario_matches_regression_values() {
        let (first, second) = scenario();
        let comparison = HitComparison::new(&first, &second);

        assert!(comparison.overlap());
        assert_eq!(comparison.depth(), 4);
        assert_eq!(comparison.second().depth(), 4);

        for (p, expected) in [
            (0.98, 0.7234033333333333),
            (0.9, 0.6230357142857144),
            (0.5, 0.24851190476190477),
            (0.0, 0.0),
        ] {
            let score = compare(&first, &second, p).unwrap();
            assert!((score - expected).abs() < 1e-12, "p={p}: {score}");
        }
    }

    #[test]
    fn disjoint_lists_score_exactly_zero() {
        let first = hits(&[("A", 10.0), ("B", 8.0)]);
        let second = hits(&[("X", 10.0), ("Y", 8.0)]);

        for p in [0.0, 0.5, 0.98] {
            assert_eq!(compare(&first, &second, p).unwrap(), 0.0);
        }
        assert_eq!(compare(&first, &[], 0.9).unwrap(), 0.0);
        assert_eq!(compare(&[], &[], 0.9).unwrap(), 0.0);
    }

    #[test]
    fn invalid_top_weight_is_rejected_before_overlap_check() {
        let first = hits(&[("A", 10.0)]);
        let second = hits(&[("X", 10.0)]);
        assert_eq!(
            compare(&first, &second, 1.0),
            Err(RboError::InvalidTopWeight(1.0))
        );
    }

    #[test]
    fn report_carries_comparison_summary() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let (first, second) = scenario();
        let options = ComparisonOptions { top_weight: 0.9 };

        let report = HitComparison::new(&first, &second).report(&options)?;
        assert!((report.score - 0.6230357142857144).abs() < 1e-12);
        assert_eq!(report.depth, 4);
        assert_eq!(report.hits_first, 4);
        assert_eq!(report.hits_second, 4);
        assert!(report.overlap);

        let json = serde_json::to_string(&report)?;
        let decoded: ComparisonReport = serde_json::from_str(&json)?;
        assert_eq!(decoded, report);
        Ok(())
    }

    #[test]
    fn batch_preserves_input_order() {
        let (first, second) = scenario();
        let disjoint = hits(&[("Q", 1.0)]);
        let pairs = vec![
            (first.clone(), second.clone()),
            (first.clone(), disjoint),
            (first.clone(), first.clone()),
        ];

        let scores = compare_batch(&pairs, 0.98).unwrap();
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 0.7234033333333333).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
        assert!((scores[2] - 1.0).abs() < 1e-12);
    }
}
