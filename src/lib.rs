#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # prodpeak
//!
//! Reads a delimited product file line by line and finds the product with the
//! highest price and the product with the highest rating, reducing records
//! concurrently with a bounded number of tasks in flight.
//!
//! ## Quick Start
//!
//! ```no_run
//! use prodpeak::{find_peaks, PipelineConfig};
//! use std::path::Path;
//!
//! let summary = find_peaks(Path::new("products.csv"), &PipelineConfig::default())?;
//! println!("{}", summary.report);
//! # Ok::<(), prodpeak::Error>(())
//! ```
//!
//! ## Reducing From Any Reader
//!
//! ```
//! use prodpeak::{BestRecords, Format, PipelineConfig, ReductionPipeline};
//! use prodpeak::accumulator::Accumulator;
//! use std::io::Cursor;
//! use std::sync::Arc;
//!
//! let pipeline = ReductionPipeline::new(&PipelineConfig::default())?;
//! let best = Arc::new(BestRecords::new());
//! pipeline.run(Cursor::new("Gadget;15;9\nWidget;42;7\n"), Format::Csv, &best)?;
//!
//! let peaks = best.snapshot();
//! assert_eq!(peaks.max_price.name, "Widget");
//! assert_eq!(peaks.max_rating.name, "Gadget");
//! # Ok::<(), prodpeak::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`formats`] — JSON and CSV line formats, chosen by file extension
//! - [`line_source`] — Sequential line reading
//! - [`admission`] — Admission gate bounding tasks in flight
//! - [`barrier`] — Join barrier for outstanding tasks
//! - [`accumulator`] — Shared best-so-far accumulators
//! - [`pipeline`] — The reduction pipeline and its configuration
//! - [`report`] — Result formatting
//! - [`error`] — Error types and result type

pub mod accumulator;
pub mod admission;
pub mod barrier;
pub mod error;
pub mod formats;
pub mod line_source;
pub mod pipeline;
pub mod record;
pub mod report;

pub use accumulator::{BestRecords, PeakScalars, PeakValues, Peaks};
pub use admission::{AdmissionGate, Permit};
pub use barrier::{JoinBarrier, TaskGuard};
pub use error::{Error, ParseError, Result};
pub use formats::Format;
pub use line_source::LineSource;
pub use pipeline::{find_peaks, PipelineConfig, ReductionPipeline, RunStats, Summary};
pub use record::{BestRecord, ParsedRecord};
pub use report::{Report, ReportMode};
