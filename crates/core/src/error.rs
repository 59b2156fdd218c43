use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RboError {
    #[error("invalid argument: top weight p must lie in [0, 1), got {0}")]
    InvalidTopWeight(f64),

    #[error("invalid argument: target weight share must lie in (0, 1), got {0}")]
    InvalidWeightShare(f64),

    #[error("invalid argument: evaluation depth must be at least 1")]
    ZeroDepth,

    #[error("ranking has no items (short depth {short_depth}, long items {long_items})")]
    EmptyRanking {
        short_depth: usize,
        long_items: usize,
    },
}

pub type Result<T, E = RboError> = std::result::Result<T, E>;
