//! 1985 Auto Imports dataset
//!
//! Every row describes one car by 26 comma separated attributes, `?` marks a missing value.
//! Only the numeric attributes become features, categorical attributes are read but discarded.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::{debug, info};

use autoprice::Dataset;

use crate::{DatasetsError, Result};

/// Location of the raw data file in the UCI repository
pub const URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/autos/imports-85.data";

/// Placeholder for a missing value
const MISSING: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Attributes of the data file, in file order
pub const COLUMNS: [(&str, ColumnKind); 26] = [
    ("symboling", ColumnKind::Numeric),
    ("normalized-losses", ColumnKind::Numeric),
    ("make", ColumnKind::Categorical),
    ("fuel-type", ColumnKind::Categorical),
    ("aspiration", ColumnKind::Categorical),
    ("num-of-doors", ColumnKind::Categorical),
    ("body-style", ColumnKind::Categorical),
    ("drive-wheels", ColumnKind::Categorical),
    ("engine-location", ColumnKind::Categorical),
    ("wheel-base", ColumnKind::Numeric),
    ("length", ColumnKind::Numeric),
    ("width", ColumnKind::Numeric),
    ("height", ColumnKind::Numeric),
    ("curb-weight", ColumnKind::Numeric),
    ("engine-type", ColumnKind::Categorical),
    ("num-of-cylinders", ColumnKind::Categorical),
    ("engine-size", ColumnKind::Numeric),
    ("fuel-system", ColumnKind::Categorical),
    ("bore", ColumnKind::Numeric),
    ("stroke", ColumnKind::Numeric),
    ("compression-ratio", ColumnKind::Numeric),
    ("horsepower", ColumnKind::Numeric),
    ("peak-rpm", ColumnKind::Numeric),
    ("city-mpg", ColumnKind::Numeric),
    ("highway-mpg", ColumnKind::Numeric),
    ("price", ColumnKind::Numeric),
];

/// Options of [`load_data`]
///
/// Defaults to `price` as label, 70% of the rows for training and a random seed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    y_name: String,
    train_fraction: f32,
    seed: Option<u64>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            y_name: "price".to_string(),
            train_fraction: 0.7,
            seed: None,
        }
    }
}

impl LoadOptions {
    /// Name of the column used as target
    pub fn y_name<S: Into<String>>(mut self, y_name: S) -> Self {
        self.y_name = y_name.into();
        self
    }

    /// Fraction of the complete rows ending up in the training set
    pub fn train_fraction(mut self, train_fraction: f32) -> Self {
        self.train_fraction = train_fraction;
        self
    }

    /// Seed of the split, drawn from the OS if not set
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Names of the feature columns produced for label `y_name`
pub fn feature_names(y_name: &str) -> Vec<&'static str> {
    COLUMNS
        .iter()
        .filter(|(name, kind)| *kind == ColumnKind::Numeric && *name != y_name)
        .map(|(name, _)| *name)
        .collect()
}

/// Parse headerless imports-85 records from `reader`
///
/// Rows with a missing value in any column are dropped. The numeric columns other than
/// `y_name` become the named records, `y_name` becomes the targets.
pub fn read_table<R: Read>(reader: R, y_name: &str) -> Result<Dataset<f64, f64>> {
    let label = match COLUMNS.iter().position(|(name, _)| *name == y_name) {
        Some(idx) if COLUMNS[idx].1 == ColumnKind::Numeric => idx,
        Some(_) => return Err(DatasetsError::NonNumericLabel(y_name.to_string())),
        None => return Err(DatasetsError::UnknownLabel(y_name.to_string())),
    };
    let features = COLUMNS
        .iter()
        .enumerate()
        .filter(|(idx, (_, kind))| *kind == ColumnKind::Numeric && *idx != label)
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut targets = Vec::new();
    let mut dropped = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(row as u64 + 1);

        if record.len() != COLUMNS.len() {
            return Err(DatasetsError::ColumnCount {
                line,
                expected: COLUMNS.len(),
                found: record.len(),
            });
        }
        if record.iter().any(|field| field.trim() == MISSING) {
            dropped += 1;
            continue;
        }

        let parse = |idx: usize| {
            let value = record[idx].trim();
            value.parse::<f64>().map_err(|_| DatasetsError::Parse {
                line,
                column: COLUMNS[idx].0,
                value: value.to_string(),
            })
        };
        for idx in &features {
            records.push(parse(*idx)?);
        }
        targets.push(parse(label)?);
    }

    debug!(
        kept = targets.len(),
        dropped, "dropped rows with missing values"
    );

    let records = Array2::from_shape_vec((targets.len(), features.len()), records)?;
    Ok(Dataset::new(records, Array1::from(targets)).with_feature_names(feature_names(y_name)))
}

/// Read the imports-85 file at `path` and split it into training and test set
///
/// Files ending in `.gz` are decompressed on the fly. The complete rows are shuffled with
/// the seeded RNG before the first `train_fraction` of them become the training set.
pub fn load_data<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> Result<(Dataset<f64, f64>, Dataset<f64, f64>)> {
    if !(options.train_fraction > 0.0 && options.train_fraction <= 1.0) {
        return Err(DatasetsError::TrainFraction(options.train_fraction));
    }

    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = if path.extension().map_or(false, |ext| ext == "gz") {
        read_table(GzDecoder::new(file), &options.y_name)?
    } else {
        read_table(file, &options.y_name)?
    };

    let mut rng = match options.seed {
        Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
        None => Xoshiro256Plus::from_entropy(),
    };
    let (train, test) = dataset
        .shuffle(&mut rng)
        .split_with_ratio(options.train_fraction);

    info!(
        "Loaded {}: {} training and {} test rows",
        path.display(),
        train.records().nrows(),
        test.records().nrows()
    );

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::path::PathBuf;

    const ROWS: &str = "\
2,164,audi,gas,std,four,sedan,fwd,front,99.80,176.60,66.20,54.30,2337,ohc,four,109,mpfi,3.19,3.40,10.00,102,5500,24,30,13950
2,?,audi,gas,std,two,sedan,fwd,front,99.80,177.30,66.30,53.10,2507,ohc,five,136,mpfi,3.19,3.40,8.50,110,5500,19,25,15250
1,148,dodge,gas,turbo,?,sedan,fwd,front,93.70,157.30,63.80,50.60,2191,ohc,four,98,mpfi,3.03,3.39,7.60,102,5500,24,30,8558
2,192,bmw,gas,std,two,sedan,rwd,front,101.20,176.80,64.80,54.30,2395,ohc,four,108,mpfi,3.50,2.80,8.80,101,5800,23,29,16430
";

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_feature_names() {
        let names = feature_names("price");
        assert_eq!(names.len(), 15);
        assert_eq!(names[0], "symboling");
        assert_eq!(names[14], "highway-mpg");
        assert!(names.contains(&"curb-weight"));

        let names = feature_names("horsepower");
        assert!(names.contains(&"price"));
        assert!(!names.contains(&"horsepower"));
    }

    #[test]
    fn read_table_drops_incomplete_rows() {
        let dataset = read_table(ROWS.as_bytes(), "price").unwrap();

        assert_eq!(dataset.records().dim(), (2, 15));
        assert_eq!(dataset.targets().to_vec(), vec![13950., 16430.]);

        let names = dataset.feature_names();
        let curb_weight = names.iter().position(|name| name == "curb-weight").unwrap();
        let highway_mpg = names.iter().position(|name| name == "highway-mpg").unwrap();
        assert_abs_diff_eq!(dataset.records()[(0, curb_weight)], 2337.);
        assert_abs_diff_eq!(dataset.records()[(1, highway_mpg)], 29.);
    }

    #[test]
    fn read_table_with_other_label() {
        let dataset = read_table(ROWS.as_bytes(), "curb-weight").unwrap();

        assert_eq!(dataset.targets().to_vec(), vec![2337., 2395.]);
        assert_eq!(dataset.feature_names().last().unwrap(), "price");
    }

    #[test]
    fn bad_label_columns() {
        assert!(matches!(
            read_table(ROWS.as_bytes(), "colour"),
            Err(DatasetsError::UnknownLabel(_))
        ));
        assert!(matches!(
            read_table(ROWS.as_bytes(), "make"),
            Err(DatasetsError::NonNumericLabel(_))
        ));
    }

    #[test]
    fn malformed_rows_are_reported() {
        let short = "2,164,audi,gas\n";
        assert!(matches!(
            read_table(short.as_bytes(), "price"),
            Err(DatasetsError::ColumnCount {
                line: 1,
                expected: 26,
                found: 4
            })
        ));

        let garbled = ROWS.replace("2337", "heavy");
        match read_table(garbled.as_bytes(), "price") {
            Err(DatasetsError::Parse {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 1);
                assert_eq!(column, "curb-weight");
                assert_eq!(value, "heavy");
            }
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn load_data_splits_complete_rows() {
        let options = LoadOptions::default().seed(Some(42));
        let (train, test) = load_data(fixture("imports-85-sample.data"), &options).unwrap();

        assert_eq!(train.records().nrows(), 15);
        assert_eq!(test.records().nrows(), 6);
        assert_eq!(train.feature_names(), test.feature_names());

        let total = train.targets().sum() + test.targets().sum();
        assert_abs_diff_eq!(total, 242091.);
    }

    #[test]
    fn load_data_reads_gzip() {
        let options = LoadOptions::default().seed(Some(7));
        let plain = load_data(fixture("imports-85-sample.data"), &options).unwrap();
        let gzip = load_data(fixture("imports-85-sample.data.gz"), &options).unwrap();

        assert_eq!(plain, gzip);
    }

    #[test]
    fn load_data_validates_options() {
        for fraction in &[0.0, -0.5, 1.5, f32::NAN] {
            let options = LoadOptions::default().train_fraction(*fraction);
            assert!(matches!(
                load_data(fixture("imports-85-sample.data"), &options),
                Err(DatasetsError::TrainFraction(_))
            ));
        }

        let result = load_data(fixture("missing.data"), &LoadOptions::default());
        assert!(matches!(result, Err(DatasetsError::Io { .. })));
    }

    #[test]
    fn full_train_fraction_leaves_empty_test_set() {
        let options = LoadOptions::default().train_fraction(1.0).seed(Some(1));
        let (train, test) = load_data(fixture("imports-85-sample.data"), &options).unwrap();

        assert_eq!(train.records().nrows(), 21);
        assert_eq!(test.records().nrows(), 0);
    }
}
