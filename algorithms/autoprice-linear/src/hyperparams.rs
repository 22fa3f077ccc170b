use crate::error::FtrlError;
use autoprice::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Hyperparameters of a Follow the regularized leader - proximal model
///
/// Use [`Ftrl::params`](crate::Ftrl::params) to start from the defaults.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FtrlParams<F: Float>(pub(crate) FtrlValidParams<F>);

/// A verified hyper-parameter set ready for the estimation of a Follow the regularized leader - proximal model
///
/// See [`FtrlParams`](crate::FtrlParams) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FtrlValidParams<F: Float> {
    pub(crate) alpha: F,
    pub(crate) beta: F,
    pub(crate) l1_ratio: F,
    pub(crate) l2_ratio: F,
    pub(crate) initial_accumulator: F,
    pub(crate) fit_intercept: bool,
}

impl<F: Float> Default for FtrlValidParams<F> {
    fn default() -> Self {
        FtrlValidParams {
            alpha: F::cast(0.2),
            beta: F::zero(),
            l1_ratio: F::zero(),
            l2_ratio: F::zero(),
            initial_accumulator: F::cast(0.1),
            fit_intercept: true,
        }
    }
}

impl<F: Float> ParamGuard for FtrlParams<F> {
    type Checked = FtrlValidParams<F>;
    type Error = FtrlError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let params = &self.0;
        if !(F::zero()..=F::one()).contains(&params.l1_ratio) {
            Err(FtrlError::InvalidL1Ratio(to_f32(params.l1_ratio)))
        } else if !(F::zero()..=F::one()).contains(&params.l2_ratio) {
            Err(FtrlError::InvalidL2Ratio(to_f32(params.l2_ratio)))
        } else if !params.alpha.is_finite() || params.alpha <= F::zero() {
            Err(FtrlError::InvalidAlpha(to_f32(params.alpha)))
        } else if !params.beta.is_finite() || params.beta < F::zero() {
            Err(FtrlError::InvalidBeta(to_f32(params.beta)))
        } else if !params.initial_accumulator.is_finite()
            || params.initial_accumulator <= F::zero()
        {
            Err(FtrlError::InvalidInitialAccumulator(to_f32(
                params.initial_accumulator,
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

fn to_f32<F: Float>(value: F) -> f32 {
    value.to_f32().unwrap_or(f32::NAN)
}

impl<F: Float> FtrlValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn beta(&self) -> F {
        self.beta
    }

    pub fn l1_ratio(&self) -> F {
        self.l1_ratio
    }

    pub fn l2_ratio(&self) -> F {
        self.l2_ratio
    }

    pub fn initial_accumulator(&self) -> F {
        self.initial_accumulator
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

impl<F: Float> Default for FtrlParams<F> {
    fn default() -> Self {
        Self(FtrlValidParams::default())
    }
}

impl<F: Float> FtrlParams<F> {
    /// Create new hyperparameters with pre-defined values
    pub fn new(alpha: F, beta: F, l1_ratio: F, l2_ratio: F) -> Self {
        Self(FtrlValidParams {
            alpha,
            beta,
            l1_ratio,
            l2_ratio,
            ..FtrlValidParams::default()
        })
    }

    /// Set the learning rate.
    ///
    /// Defaults to `0.2` if not set
    ///
    /// `alpha` must be positive and finite
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Set the beta parameter.
    ///
    /// Defaults to `0.0` if not set
    ///
    /// `beta` must be non-negative and finite
    pub fn beta(mut self, beta: F) -> Self {
        self.0.beta = beta;
        self
    }

    /// Set l1_ratio parameter. Controls how the parameter
    /// penalty is distributed to L1 regularization.
    ///
    /// Defaults to `0.0` if not set
    ///
    /// `l1_ratio` must be between `0.0` and `1.0`.
    pub fn l1_ratio(mut self, l1_ratio: F) -> Self {
        self.0.l1_ratio = l1_ratio;
        self
    }

    /// Set l2_ratio parameter. Controls how the parameter
    /// penalty is distributed to L2 regularization.
    ///
    /// Defaults to `0.0` if not set
    ///
    /// `l2_ratio` must be between `0.0` and `1.0`.
    pub fn l2_ratio(mut self, l2_ratio: F) -> Self {
        self.0.l2_ratio = l2_ratio;
        self
    }

    /// Set the starting value of the squared gradient accumulators.
    ///
    /// Defaults to `0.1` if not set
    ///
    /// `initial_accumulator` must be positive and finite
    pub fn initial_accumulator(mut self, initial_accumulator: F) -> Self {
        self.0.initial_accumulator = initial_accumulator;
        self
    }

    /// Whether a bias is learned alongside the feature weights.
    ///
    /// Defaults to `true`
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }
}
