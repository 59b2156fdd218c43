use crate::models::{RankingStructure, ScoredHit};
use std::collections::HashSet;

/// Aligns two hit lists on one rank axis built from the union of their scores.
///
/// Every distinct score opens one level in both structures, so the two outputs
/// always share the same depth even where one list has nothing at that score.
pub fn build_rankings(
    first: &[ScoredHit],
    second: &[ScoredHit],
) -> (RankingStructure, RankingStructure) {
    let mut merged: Vec<(&ScoredHit, usize)> = first
        .iter()
        .map(|hit| (hit, 0))
        .chain(second.iter().map(|hit| (hit, 1)))
        .collect();
    merged.sort_by(|left, right| right.0.score.total_cmp(&left.0.score));

    let mut rankings = [RankingStructure::default(), RankingStructure::default()];
    let mut previous_score: Option<f64> = None;

    for (hit, origin) in merged {
        if previous_score != Some(hit.score) {
            for ranking in &mut rankings {
                ranking.open_level();
            }
        }
        rankings[origin].push_to_last(hit.target_id.clone());
        previous_score = Some(hit.score);
    }

    let [first_ranking, second_ranking] = rankings;
    (first_ranking, second_ranking)
}

/// True when at least one target appears in both lists, regardless of score.
pub fn is_overlap(first: &[ScoredHit], second: &[ScoredHit]) -> bool {
    let (smaller, larger) = if first.len() <= second.len() {
        (first, second)
    } else {
        (second, first)
    };
    let targets: HashSet<&str> = smaller.iter().map(|hit| hit.target_id.as_str()).collect();
    larger
        .iter()
        .any(|hit| targets.contains(hit.target_id.as_str()))
}
