use crate::error::FtrlError;
use crate::hyperparams::FtrlValidParams;
use crate::Ftrl;
use autoprice::dataset::{AsTargets, Records};
use autoprice::traits::{FitWith, PredictInplace};
use autoprice::{DatasetBase, Float};
use ndarray::{s, Array1, ArrayBase, ArrayView1, Data, Ix2, Zip};

/// Simplified `Result` using [`FtrlError`](crate::FtrlError) as error type
pub type Result<T> = std::result::Result<T, FtrlError>;

impl<F, D, T> FitWith<ArrayBase<D, Ix2>, T, FtrlError> for FtrlValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsTargets<Elem = F>,
{
    type ObjectIn = Option<Ftrl<F>>;
    type ObjectOut = Ftrl<F>;

    /// Fit a follow the regularized leader, proximal, model given a feature matrix `x` and a target
    /// variable `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`
    ///
    /// The target variable `y` must have shape `(n_samples)`
    ///
    /// Every call performs a single update with the summed squared error gradient of the whole
    /// batch. Returns a fitted `Ftrl` object which contains the fitted parameters and can be
    /// used to `predict` values of the target variable for new feature values.
    fn fit_with(
        &self,
        model_in: Self::ObjectIn,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<Self::ObjectOut> {
        let mut model_out =
            model_in.unwrap_or_else(|| Ftrl::new(self.clone(), dataset.nfeatures()));

        let records = dataset.records();
        let targets = dataset.as_targets();
        if records.ncols() != model_out.nfeatures() {
            return Err(FtrlError::MismatchedFeatures {
                expected: model_out.nfeatures(),
                found: records.ncols(),
            });
        }
        if targets.len() != records.nrows() {
            return Err(autoprice::Error::MismatchedShapes {
                expected: records.nrows(),
                found: targets.len(),
            }
            .into());
        }

        let predictions = model_out.predict_values(records);
        let gradient = model_out.calculate_gradient(predictions.view(), records, targets);
        let sigma = model_out.calculate_sigma(gradient.view());
        model_out.update_params(gradient, sigma);
        Ok(model_out)
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>> for Ftrl<F> {
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`,
    /// `predict` returns the target variable according to the parameters
    /// learned from the training data distribution.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        assert_eq!(
            x.ncols(),
            self.nfeatures,
            "Number of data features must match the number of features the model was trained with."
        );

        *y = self.predict_values(x);
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

/// View the fitted parameters and make predictions with a fitted
/// follow the regularized leader -proximal, model
impl<F: Float> Ftrl<F> {
    /// Get Z values
    pub fn z(&self) -> &Array1<F> {
        &self.z
    }

    /// Get N values
    pub fn n(&self) -> &Array1<F> {
        &self.n
    }

    /// Get the hyperparameters
    pub fn get_params(&self) -> &FtrlValidParams<F> {
        &self.params
    }

    /// Number of features the model expects
    pub fn nfeatures(&self) -> usize {
        self.nfeatures
    }

    /// Calculate all coefficients, the intercept is the last one if fitted
    pub fn get_weights(&self) -> Array1<F> {
        Zip::from(self.z.view())
            .and(self.n.view())
            .map_collect(|z_, n_| {
                calculate_weight(
                    *z_,
                    *n_,
                    self.params.alpha(),
                    self.params.beta(),
                    self.params.l1_ratio(),
                    self.params.l2_ratio(),
                )
            })
    }

    /// Get the fitted feature weights
    pub fn weights(&self) -> Array1<F> {
        self.get_weights().slice(s![..self.nfeatures]).to_owned()
    }

    /// Get the fitted intercept, 0. if no intercept is fitted
    pub fn intercept(&self) -> F {
        if self.params.fit_intercept() {
            self.get_weights()[self.nfeatures]
        } else {
            F::zero()
        }
    }

    fn predict_values<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        let weights = self.get_weights();
        let predictions = x.dot(&weights.slice(s![..self.nfeatures]));
        if self.params.fit_intercept() {
            predictions + weights[self.nfeatures]
        } else {
            predictions
        }
    }

    /// Gradient of the summed squared error, the intercept sees a constant input of one
    fn calculate_gradient<D: Data<Elem = F>>(
        &self,
        predictions: ArrayView1<F>,
        x: &ArrayBase<D, Ix2>,
        targets: ArrayView1<F>,
    ) -> Array1<F> {
        let two = F::cast(2.);
        let diff = &predictions - &targets;

        let mut gradient = Array1::zeros(self.z.len());
        gradient
            .slice_mut(s![..self.nfeatures])
            .assign(&(diff.dot(x) * two));
        if self.params.fit_intercept() {
            gradient[self.nfeatures] = diff.sum() * two;
        }
        gradient
    }

    fn calculate_sigma(&self, gradients: ArrayView1<F>) -> Array1<F> {
        Zip::from(&self.n)
            .and(gradients)
            .map_collect(|n_, grad| calculate_sigma(*n_, *grad, self.params.alpha()))
    }

    fn update_params(&mut self, gradient: Array1<F>, sigma: Array1<F>) {
        self.z = &self.z + &gradient - sigma * self.get_weights();
        self.n = &self.n + gradient.mapv(|grad| grad.powi(2));
    }
}

fn calculate_sigma<F: Float>(n: F, gradient: F, alpha: F) -> F {
    (F::sqrt(n + gradient.powi(2)) - F::sqrt(n)) / alpha
}

fn calculate_weight<F: Float>(z: F, n: F, alpha: F, beta: F, l1_ratio: F, l2_ratio: F) -> F {
    let sign = if z < F::zero() { -F::one() } else { F::one() };
    if z * sign <= l1_ratio {
        F::zero()
    } else {
        (sign * l1_ratio - z) / ((n.sqrt() + beta) / alpha + l2_ratio)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::FtrlParams;
    use approx::assert_abs_diff_eq;
    use autoprice::traits::Predict;
    use autoprice::{Dataset, ParamGuard};
    use ndarray::array;

    #[test]
    fn calculate_weights_with_zero_outcome_works() {
        let z = 0.1;
        let n = 0.1;
        let alpha = 0.5;
        let beta = 0.5;
        let l1_ratio = 0.5;
        let l2_ratio = 0.5;
        let result = calculate_weight(z, n, alpha, beta, l1_ratio, l2_ratio);
        assert_abs_diff_eq!(result, 0.0)
    }

    #[test]
    fn calculate_sigma_works() {
        let gradient: f64 = 0.5;
        let n: f64 = 0.11;
        let alpha = 0.5;
        let expected_result = ((0.11f64 + 0.25).sqrt() - 0.11f64.sqrt()) / 0.5;
        let result = calculate_sigma(n, gradient, alpha);
        assert_abs_diff_eq!(result, expected_result)
    }

    #[test]
    fn calculate_weights_works() {
        let z = 0.5;
        let n: f64 = 0.16;
        let alpha = 0.5;
        let beta = 0.5;
        let l1_ratio = 0.1;
        let l2_ratio = 0.5;
        let expected_result = (0.1 - 0.5) / ((0.4 + 0.5) / 0.5 + 0.5);
        let result = calculate_weight(z, n, alpha, beta, l1_ratio, l2_ratio);
        assert_abs_diff_eq!(result, expected_result)
    }

    #[test]
    fn calculate_gradient_works() {
        let dataset = Dataset::new(array![[0.0, 1.0], [2.0, 3.0], [1.0, 5.0]], array![1., 2., 3.]);
        let model = Ftrl::new(FtrlParams::default().check_unwrap(), 2);
        let predictions = array![1.5, 1.0, 3.0];
        let result = model.calculate_gradient(
            predictions.view(),
            dataset.records(),
            dataset.targets().view(),
        );
        // residuals [0.5, -1.0, 0.0]
        assert_abs_diff_eq!(result, array![-4.0, -5.0, -1.0])
    }

    #[test]
    fn fresh_model_predicts_zero() {
        let model = Ftrl::new(FtrlParams::default().check_unwrap(), 2);
        let predictions = model.predict(&array![[2000., 30.], [3000., 40.]]);

        assert_abs_diff_eq!(predictions, array![0., 0.]);
        assert_abs_diff_eq!(model.n(), &array![0.1, 0.1, 0.1]);
    }

    #[test]
    fn update_params_works() {
        let dataset: Dataset<f64, f64> =
            Dataset::new(array![[0.0, 1.0], [2.0, 3.0], [1.0, 5.0]], array![1., 2., 3.]);
        let mut model = Ftrl::new(FtrlParams::default().check_unwrap(), dataset.nfeatures());
        let initial_z = model.z().clone();
        let initial_n = model.n().clone();
        let weights = model.get_weights();
        let predictions = model.predict_values(dataset.records());
        let gradient =
            model.calculate_gradient(predictions.view(), dataset.records(), dataset.targets().view());
        let sigma = model.calculate_sigma(gradient.view());
        model.update_params(gradient.clone(), sigma.clone());
        let expected_z = initial_z + &gradient - sigma * weights;
        let expected_n = initial_n + &gradient.mapv(|grad| grad.powf(2.));
        assert_abs_diff_eq!(model.z(), &expected_z);
        assert_abs_diff_eq!(model.n(), &expected_n)
    }

    #[test]
    fn first_step_moves_weights_by_about_alpha() {
        let dataset = Dataset::new(array![[1.0], [2.0]], array![1.0, 2.0]);
        let params = Ftrl::params().alpha(0.5);

        let model = params.fit_with(None, &dataset).unwrap();
        // g_w = -10, g_b = -6, both weights land close to alpha
        assert_abs_diff_eq!(model.z(), &array![-10.0, -6.0]);
        assert_abs_diff_eq!(model.n(), &array![100.1, 36.1], epsilon = 1e-12);
        assert_abs_diff_eq!(model.weights()[0], 5.0 / 100.1f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 3.0 / 36.1f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn no_intercept_keeps_bias_at_zero() {
        let dataset = Dataset::new(array![[1.0], [2.0]], array![3.0, 5.0]);
        let params = Ftrl::params().alpha(0.5).fit_intercept(false);

        let model = params.fit_with(None, &dataset).unwrap();
        assert_eq!(model.z().len(), 1);
        assert_abs_diff_eq!(model.intercept(), 0.0);
        assert!(model.weights()[0] > 0.0);
    }

    #[test]
    fn ftrl_toy_example_works() {
        // y = 2x + 1
        let dataset = Dataset::new(
            array![[0.0], [1.0], [2.0], [3.0]],
            array![1.0, 3.0, 5.0, 7.0],
        );
        let params = Ftrl::params().alpha(0.5).check_unwrap();

        let mut model = None;
        for _ in 0..5000 {
            model = Some(params.fit_with(model, &dataset).unwrap());
        }
        let model = model.unwrap();

        assert_abs_diff_eq!(model.weights()[0], 2.0, epsilon = 1e-2);
        assert_abs_diff_eq!(model.intercept(), 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(
            model.predict(&array![[4.0], [10.0]]),
            array![9.0, 21.0],
            epsilon = 1e-1
        );
    }

    #[test]
    fn l1_ratio_keeps_small_weights_at_zero() {
        let dataset = Dataset::new(array![[0.001], [0.002]], array![0.001, 0.002]);
        let params = Ftrl::params().l1_ratio(0.5).fit_intercept(false);

        let model = params.fit_with(None, &dataset).unwrap();
        assert_abs_diff_eq!(model.weights(), array![0.0]);
    }

    #[test]
    fn mismatched_features_are_rejected() {
        let params = Ftrl::params().check_unwrap();
        let model = params
            .fit_with(None, &Dataset::new(array![[1.0, 2.0]], array![1.0]))
            .unwrap();

        let result = params.fit_with(Some(model), &Dataset::new(array![[1.0]], array![1.0]));
        assert!(matches!(
            result,
            Err(FtrlError::MismatchedFeatures {
                expected: 2,
                found: 1
            })
        ));
    }
}
