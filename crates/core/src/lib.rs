pub mod comparison;
pub mod error;
pub mod models;
pub mod rankings;
pub mod rbo;

pub use comparison::{compare, compare_batch, HitComparison};
pub use error::{RboError, Result};
pub use models::{
    ComparisonOptions, ComparisonReport, RankLevel, RankingStructure, ScoredHit,
    DEFAULT_TOP_WEIGHT,
};
pub use rankings::{build_rankings, is_overlap};
pub use rbo::{rbo, top_weight_for_depth, weight};
