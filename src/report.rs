//! Result emission.

use crate::accumulator::{PeakScalars, Peaks};
use std::fmt;

/// Which accumulator a run uses and therefore what it prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportMode {
    /// Names of the products with the highest price and rating.
    #[default]
    Names,
    /// The highest price and rating values only.
    Values,
}

/// Final result of a run, formatted for standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Whole records for both metrics.
    Names(Peaks),
    /// Scalar maxima for both metrics.
    Values(PeakScalars),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Names(peaks) => {
                writeln!(f, "Product with max price: {}", peaks.max_price.name)?;
                write!(f, "Product with max rating: {}", peaks.max_rating.name)
            },
            Report::Values(scalars) => write!(
                f,
                "Max price: {} Max rating: {}",
                scalars.max_price, scalars.max_rating
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParsedRecord;

    #[test]
    fn test_names_report() {
        let report = Report::Names(Peaks {
            max_price: ParsedRecord::new("Widget", 42, 7),
            max_rating: ParsedRecord::new("Gadget", 15, 9),
        });
        assert_eq!(
            report.to_string(),
            "Product with max price: Widget\nProduct with max rating: Gadget"
        );
    }

    #[test]
    fn test_empty_names_report() {
        let report = Report::Names(Peaks::default());
        assert_eq!(
            report.to_string(),
            "Product with max price: \nProduct with max rating: "
        );
    }

    #[test]
    fn test_values_report() {
        let report = Report::Values(PeakScalars {
            max_price: 42,
            max_rating: 9,
        });
        assert_eq!(report.to_string(), "Max price: 42 Max rating: 9");
    }
}
