//! # Car price regression
//!
//! Trains a linear model predicting the price of a car from its curb weight and highway
//! mileage on the imports-85 dataset, evaluates it on a held out test set and prints the
//! predicted price of two hypothetical cars.
//!
//! The binary `linear_regression` is a thin wrapper around [`run`].

mod report;

pub use report::{PriceEstimate, Report};

use std::io::{self, Write};
use std::path::PathBuf;

use autoprice::feature_column::{numeric_column, NumericColumn};
use autoprice::input::FeedParams;
use autoprice::Dataset;
use autoprice_datasets::imports85::{self, LoadOptions};
use autoprice_datasets::DatasetsError;
use autoprice_linear::{FtrlError, LinearRegressor};
use clap::Parser;
use ndarray::{Array1, Array2};
use thiserror::Error;
use tracing::{debug, info};

/// Number of training steps
pub const STEPS: usize = 1000;

/// Curb weights of the cars to price, in lbs
pub const CURB_WEIGHTS: [f64; 2] = [2000., 3000.];

/// Highway mileages of the cars to price, in mpg
pub const HIGHWAY_MPGS: [f64; 2] = [30., 40.];

#[derive(Error, Debug)]
pub enum RegressionError {
    #[error("could not load the imports-85 data, a copy can be downloaded from {url}")]
    Data {
        url: &'static str,
        #[source]
        source: DatasetsError,
    },
    #[error(transparent)]
    Model(#[from] FtrlError),
    #[error(transparent)]
    BaseCrate(#[from] autoprice::Error),
    #[error("could not write the report: {0}")]
    Output(#[from] io::Error),
}

impl From<DatasetsError> for RegressionError {
    fn from(source: DatasetsError) -> Self {
        RegressionError::Data {
            url: imports85::URL,
            source,
        }
    }
}

/// Predict car prices with a linear regressor
#[derive(Parser, Debug, Clone)]
#[command(name = "linear_regression")]
#[command(about = "Predict car prices from curb weight and highway mileage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path of the imports-85 data file, gzip compressed if it ends in `.gz`
    #[arg(long, env = "IMPORTS85_DATA", default_value = "data/imports-85.data")]
    pub data: PathBuf,

    /// Number of training steps
    #[arg(long, env = "AUTOPRICE_STEPS", default_value_t = STEPS)]
    pub steps: usize,

    /// Seed of the train/test split and of the shuffling
    #[arg(long, env = "AUTOPRICE_SEED")]
    pub seed: Option<u64>,

    /// Fraction of the rows used for training
    #[arg(long, env = "AUTOPRICE_TRAIN_FRACTION", default_value_t = 0.7)]
    pub train_fraction: f32,

    /// Number of rows per batch
    #[arg(long, env = "AUTOPRICE_BATCH_SIZE", default_value_t = 128)]
    pub batch_size: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// The two numeric columns the model is built over
pub fn feature_columns() -> Vec<NumericColumn> {
    vec![numeric_column("curb-weight"), numeric_column("highway-mpg")]
}

/// Load, train, evaluate and predict, then write the report to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Report, RegressionError> {
    let options = LoadOptions::default()
        .train_fraction(cli.train_fraction)
        .seed(cli.seed);
    let (train, test) = imports85::load_data(&cli.data, &options)?;

    let report = fit_and_predict(cli, &train, &test)?;
    report.write(out)?;

    Ok(report)
}

/// Train on `train`, evaluate on `test` and price the literal cars
pub fn fit_and_predict(
    cli: &Cli,
    train: &Dataset<f64, f64>,
    test: &Dataset<f64, f64>,
) -> Result<Report, RegressionError> {
    // repeats forever, `steps` decides when training ends
    let input_train = FeedParams::new()
        .batch_size(cli.batch_size)
        .num_epochs(None)
        .shuffle(true)
        .seed(cli.seed)
        .feed(train)?;
    let input_test = FeedParams::new()
        .batch_size(cli.batch_size)
        .shuffle(true)
        .seed(cli.seed)
        .feed(test)?;

    let mut model = LinearRegressor::new(feature_columns());

    let summary = model.train(input_train, cli.steps)?;
    let evaluation = model.evaluate(input_test)?;
    info!(
        "RMS error after {} steps: {}",
        evaluation.global_step(),
        evaluation.average_loss().sqrt()
    );

    let inputs = prediction_inputs();
    let predict_input = FeedParams::new().batch_size(cli.batch_size).feed(&inputs)?;
    let estimates = model
        .predict(predict_input)?
        .zip(CURB_WEIGHTS.iter().zip(HIGHWAY_MPGS.iter()))
        .map(|(prediction, (curb_weight, highway_mpg))| PriceEstimate {
            curb_weight: *curb_weight,
            highway_mpg: *highway_mpg,
            price: prediction.value(),
        })
        .collect::<Vec<_>>();
    debug!(?estimates, "predicted prices");

    Ok(Report {
        train: summary,
        evaluation,
        estimates,
    })
}

/// The unlabelled cars to price
fn prediction_inputs() -> Dataset<f64, ()> {
    let records = Array2::from_shape_fn((CURB_WEIGHTS.len(), 2), |(i, j)| match j {
        0 => CURB_WEIGHTS[i],
        _ => HIGHWAY_MPGS[i],
    });
    let targets = Array1::from_elem(records.nrows(), ());

    Dataset::new(records, targets).with_feature_names(vec!["curb-weight", "highway-mpg"])
}
