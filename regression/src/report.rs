//! Console report
//!
//! Prints the evaluation and the prediction results the way the command line program always
//! did: a banner, the RMS error rounded to whole dollars and one line per predicted car.

use std::io::{self, Write};

use autoprice::estimator::{Evaluation, TrainSummary};

/// Predicted price of one input car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEstimate {
    pub curb_weight: f64,
    pub highway_mpg: f64,
    pub price: f64,
}

/// Everything a run of the program produced
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub train: TrainSummary<f64>,
    pub evaluation: Evaluation<f64>,
    pub estimates: Vec<PriceEstimate>,
}

impl Report {
    /// Root mean squared error of the test set, in dollars
    pub fn rms_error(&self) -> f64 {
        self.evaluation.average_loss().sqrt()
    }

    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "*".repeat(80))?;
        writeln!(out)?;
        writeln!(out, "RMS error for the test set: ${:.0}", self.rms_error())?;
        writeln!(out)?;
        writeln!(out, "Prediction results:")?;
        for estimate in &self.estimates {
            writeln!(
                out,
                "    Curb weight: {}lbs, Highway: {}mpg, Prediction: ${}",
                integer(estimate.curb_weight, 4),
                integer(estimate.highway_mpg, 0),
                cents(estimate.price, 9),
            )?;
        }
        writeln!(out)?;

        Ok(())
    }
}

fn integer(value: f64, width: usize) -> String {
    space_signed(format!("{}", value.abs().round()), value, width)
}

fn cents(value: f64, width: usize) -> String {
    space_signed(format!("{:.2}", value.abs()), value, width)
}

/// Prefix `digits` with `-` for negative values and a blank otherwise, then right-align to
/// `width` characters including the sign
fn space_signed(digits: String, value: f64, width: usize) -> String {
    let sign = if value.is_sign_negative() && value != 0.0 {
        '-'
    } else {
        ' '
    };
    format!("{:>width$}", format!("{}{}", sign, digits), width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(estimates: Vec<PriceEstimate>) -> Report {
        Report {
            train: TrainSummary {
                global_step: 1000,
                steps: 1000,
                loss: Some(1.0),
            },
            evaluation: Evaluation::new(2_250_000.4, 1.0, 2.0, 3.0, 1000),
            estimates,
        }
    }

    #[test]
    fn report_layout() {
        let report = report(vec![
            PriceEstimate {
                curb_weight: 2000.,
                highway_mpg: 30.,
                price: 11542.,
            },
            PriceEstimate {
                curb_weight: 3000.,
                highway_mpg: 40.,
                price: 18327.456,
            },
        ]);
        let mut out = Vec::new();
        report.write(&mut out).unwrap();

        let expected = format!(
            "\n{}\n\nRMS error for the test set: $1500\n\nPrediction results:\n\
             \x20   Curb weight:  2000lbs, Highway:  30mpg, Prediction: $ 11542.00\n\
             \x20   Curb weight:  3000lbs, Highway:  40mpg, Prediction: $ 18327.46\n\n",
            "*".repeat(80)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn space_signed_pads_like_printf() {
        assert_eq!(space_signed("2000".into(), 2000., 4), " 2000");
        assert_eq!(space_signed("5".into(), 5., 4), "   5");
        assert_eq!(space_signed("30".into(), 30., 0), " 30");
        assert_eq!(space_signed("11542.00".into(), 11542., 9), " 11542.00");
        assert_eq!(space_signed("5.50".into(), -5.5, 9), "    -5.50");
        assert_eq!(space_signed("123456.78".into(), 123456.78, 9), " 123456.78");
    }
}
