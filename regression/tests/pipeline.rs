use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use autoprice_datasets::imports85::{self, LoadOptions};
use autoprice_regression::{run, Cli, RegressionError, CURB_WEIGHTS, HIGHWAY_MPGS, STEPS};
use clap::Parser;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("datasets")
        .join("tests")
        .join("fixtures")
        .join("imports-85-sample.data")
}

fn cli(extra: &[&str]) -> Cli {
    let data = fixture();
    let mut args = vec![
        "linear_regression".to_string(),
        "--data".to_string(),
        data.display().to_string(),
        "--seed".to_string(),
        "42".to_string(),
    ];
    args.extend(extra.iter().map(|arg| arg.to_string()));

    Cli::try_parse_from(args).unwrap()
}

fn run_to_string(cli: &Cli) -> (autoprice_regression::Report, String) {
    let mut out = Vec::new();
    let report = run(cli, &mut out).unwrap();

    (report, String::from_utf8(out).unwrap())
}

#[test]
fn trains_for_the_requested_steps() {
    let (report, _) = run_to_string(&cli(&[]));

    assert_eq!(report.train.steps, STEPS);
    assert_eq!(report.train.global_step, STEPS as u64);
    assert_eq!(report.evaluation.global_step(), STEPS as u64);
    assert!(report.evaluation.average_loss().is_finite());
}

#[test]
fn printed_rms_matches_average_loss() {
    let (report, output) = run_to_string(&cli(&[]));

    let expected = format!(
        "RMS error for the test set: ${:.0}",
        report.evaluation.average_loss().sqrt()
    );
    assert!(output.lines().any(|line| line == expected));
    assert_abs_diff_eq!(
        report.rms_error().powi(2),
        report.evaluation.average_loss(),
        epsilon = 1e-6 * report.evaluation.average_loss()
    );
}

#[test]
fn prints_one_line_per_car_in_order() {
    let (report, output) = run_to_string(&cli(&[]));

    let lines = output
        .lines()
        .filter(|line| line.starts_with("    Curb weight:"))
        .collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("    Curb weight:  2000lbs, Highway:  30mpg, Prediction: $"));
    assert!(lines[1].starts_with("    Curb weight:  3000lbs, Highway:  40mpg, Prediction: $"));

    assert_eq!(report.estimates.len(), 2);
    for (estimate, (curb_weight, highway_mpg)) in report
        .estimates
        .iter()
        .zip(CURB_WEIGHTS.iter().zip(HIGHWAY_MPGS.iter()))
    {
        assert_abs_diff_eq!(estimate.curb_weight, *curb_weight);
        assert_abs_diff_eq!(estimate.highway_mpg, *highway_mpg);
        assert!(estimate.price.is_finite());
    }

    assert!(output.starts_with(&format!("\n{}\n\n", "*".repeat(80))));
    assert!(output.ends_with("\n\n"));
}

#[test]
fn same_seed_same_output() {
    let (_, first) = run_to_string(&cli(&["--steps", "200"]));
    let (_, second) = run_to_string(&cli(&["--steps", "200"]));

    assert_eq!(first, second);
}

#[test]
fn positional_argument_fails_before_loading() {
    let result = Cli::try_parse_from([
        "linear_regression",
        "--data",
        "does/not/exist.data",
        "surplus",
    ]);

    assert!(result.is_err());
}

#[test]
fn missing_data_file_points_to_the_download() {
    let mut cli = cli(&[]);
    cli.data = PathBuf::from("does/not/exist.data");

    let mut out = Vec::new();
    match run(&cli, &mut out) {
        Err(RegressionError::Data { url, .. }) => assert_eq!(url, imports85::URL),
        other => panic!("expected a data error, got {:?}", other.map(|_| ())),
    }
    assert!(out.is_empty());
}

#[test]
fn train_and_test_split_the_complete_rows() {
    let all = imports85::read_table(
        std::fs::File::open(fixture()).unwrap(),
        "price",
    )
    .unwrap();
    let (train, test) =
        imports85::load_data(fixture(), &LoadOptions::default().seed(Some(42))).unwrap();

    let mut rows = train
        .records()
        .rows()
        .into_iter()
        .chain(test.records().rows())
        .map(|row| row.to_vec())
        .collect::<Vec<_>>();
    let mut expected = all
        .records()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| a.partial_cmp(b).unwrap());
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

    assert_eq!(train.records().nrows() + test.records().nrows(), 21);
    assert_eq!(rows, expected);
}
