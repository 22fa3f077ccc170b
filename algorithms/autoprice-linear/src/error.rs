use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FtrlError {
    #[error("l1 ratio should be in range [0, 1], but is {0}")]
    InvalidL1Ratio(f32),
    #[error("l2 ratio should be in range [0, 1], but is {0}")]
    InvalidL2Ratio(f32),
    #[error("alpha should be positive and finite, but is {0}")]
    InvalidAlpha(f32),
    #[error("beta should be non-negative and finite, but is {0}")]
    InvalidBeta(f32),
    #[error("initial accumulator should be positive and finite, but is {0}")]
    InvalidInitialAccumulator(f32),
    #[error("model was fitted with {expected} features, but the input has {found}")]
    MismatchedFeatures { expected: usize, found: usize },
    #[error(transparent)]
    BaseCrate(#[from] autoprice::Error),
}
