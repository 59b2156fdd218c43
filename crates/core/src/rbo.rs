//! Rank-Biased Overlap over tie-bucketed rankings.
//!
//! Follows the extrapolated RBO of Webber, Moffat & Zobel (2010), "A similarity
//! measure for indefinite rankings", with agreement computed from cumulative
//! set sizes so that a rank level may hold several tied items.

use crate::error::{RboError, Result};
use crate::models::{validate_top_weight, RankingStructure};
use std::collections::HashSet;

const BISECTION_STEPS: usize = 100;

/// Short/long role assignment, fixed before the scan. Equal depths keep the
/// argument order.
struct DepthOrder<'a> {
    short: &'a RankingStructure,
    long: &'a RankingStructure,
}

impl<'a> DepthOrder<'a> {
    fn new(first: &'a RankingStructure, second: &'a RankingStructure) -> Self {
        if first.depth() <= second.depth() {
            Self {
                short: first,
                long: second,
            }
        } else {
            Self {
                short: second,
                long: first,
            }
        }
    }
}

/// Tie-aware extrapolated RBO between two rankings for top weight `p`.
///
/// The depth of a ranking is its number of levels, empty levels included.
/// Rankings sharing no identifier should be short-circuited by the caller;
/// see [`crate::HitComparison`].
pub fn rbo(first: &RankingStructure, second: &RankingStructure, p: f64) -> Result<f64> {
    validate_top_weight(p)?;

    let order = DepthOrder::new(first, second);
    let short_depth = order.short.depth();

    let mut seen_short: HashSet<&str> = HashSet::new();
    let mut seen_long: HashSet<&str> = HashSet::new();
    let mut shared = 0usize;
    let mut short_shared = 0usize;
    let mut agreements = Vec::with_capacity(order.long.depth());

    for (level, long_bucket) in order.long.iter() {
        for id in long_bucket {
            if seen_long.insert(id.as_str()) && seen_short.contains(id.as_str()) {
                shared += 1;
            }
        }
        // None once the short ranking has run out of levels.
        if let Some(short_bucket) = order.short.bucket(level) {
            for id in short_bucket {
                if seen_short.insert(id.as_str()) && seen_long.contains(id.as_str()) {
                    shared += 1;
                }
            }
        }

        if level == short_depth {
            short_shared = shared;
        }
        agreements.push(agreement(shared, seen_short.len(), seen_long.len()));
    }

    if short_depth == 0 || seen_long.is_empty() {
        return Err(RboError::EmptyRanking {
            short_depth,
            long_items: seen_long.len(),
        });
    }

    let short_agreement = agreements[short_depth - 1];

    // (1-p)/p * p^d is carried as (1-p) * p^(d-1) so that p = 0 stays finite.
    let mut decay = 1.0;
    let mut observed = 0.0;
    let mut extrapolated = 0.0;
    for (index, agreement_at_level) in agreements.iter().enumerate() {
        let level = index + 1;
        observed += agreement_at_level * decay;
        if level > short_depth {
            let gap = (level - short_depth) as f64;
            extrapolated += short_agreement * gap / level as f64 * decay;
        }
        decay *= p;
    }

    let late_matches = (shared - short_shared) as f64 / seen_long.len() as f64;
    let residual = (late_matches + short_agreement) * decay;

    Ok((1.0 - p) * (observed + extrapolated) + residual)
}

fn agreement(shared: usize, short_seen: usize, long_seen: usize) -> f64 {
    if short_seen == 0 || long_seen == 0 {
        return 0.0;
    }
    2.0 * shared as f64 / (short_seen + long_seen) as f64
}

/// Share of the total RBO weight carried by the first `depth` ranks.
///
/// `weight(10, 0.9)` is about 0.86: with p = 0.9 the top ten ranks decide 86%
/// of the score. At `p = 0` every bit of weight sits on rank one.
pub fn weight(depth: usize, p: f64) -> Result<f64> {
    validate_top_weight(p)?;
    if depth == 0 {
        return Ok(0.0);
    }
    if p == 0.0 {
        return Ok(1.0);
    }

    let mut power = 1.0;
    let mut head = 0.0;
    for i in 1..depth {
        power *= p;
        head += power / i as f64;
    }

    let log_term = -(-p).ln_1p();
    Ok(1.0 - power + (1.0 - p) / p * depth as f64 * (log_term - head))
}

/// Finds the `p` for which the first `depth` ranks carry `share` of the weight.
///
/// `weight(depth, p)` falls from 1 towards 0 as `p` grows, so the answer is
/// bracketed by bisection over `[0, 1)`.
pub fn top_weight_for_depth(depth: usize, share: f64) -> Result<f64> {
    if depth == 0 {
        return Err(RboError::ZeroDepth);
    }
    if !(share > 0.0 && share < 1.0) {
        return Err(RboError::InvalidWeightShare(share));
    }

    let mut low = 0.0_f64;
    let mut high = 1.0_f64;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (low + high);
        if mid >= 1.0 || mid <= low {
            break;
        }
        if weight(depth, mid)? > share {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}
