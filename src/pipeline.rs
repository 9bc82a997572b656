//! Bounded-concurrency reduction pipeline.
//!
//! Design:
//! - **Reader:** the calling thread reads lines and parses them; malformed
//!   lines are dropped on the spot
//! - **Admission gate:** each parsed record reserves a slot before its task is
//!   spawned; the reader blocks while all `limit` slots are taken
//! - **Tasks:** one job per record on a dedicated rayon pool, folding the
//!   record into a shared [`Accumulator`]
//! - **Join barrier:** after end of input the reader waits until every task
//!   has completed before the accumulator is read
//!
//! The reader never runs on the pool, so a saturated gate cannot starve the
//! workers that would free it.

use crate::accumulator::{Accumulator, BestRecords, PeakValues};
use crate::admission::{AdmissionGate, MAX_CAPACITY};
use crate::barrier::JoinBarrier;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::line_source::LineSource;
use crate::report::{Report, ReportMode};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Default number of reduction tasks allowed in flight.
pub const DEFAULT_LIMIT: usize = 100_000;

/// Largest accepted limit. The gate reserves memory for every slot up front.
pub const MAX_LIMIT: usize = MAX_CAPACITY;

/// Configuration for the reduction pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Admission gate capacity (tasks in flight)
    pub limit: usize,
    /// Worker threads for reduction tasks, 0 for rayon's default
    pub threads: usize,
    /// What the run reports
    pub report: ReportMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            threads: 0,
            report: ReportMode::Names,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration before any input is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] if `limit` is zero or above
    /// [`MAX_LIMIT`].
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(Error::InvalidLimit(self.limit));
        }
        Ok(())
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Lines yielded by the line source.
    pub lines_read: usize,
    /// Lines that parsed into a record and spawned a task.
    pub records_parsed: usize,
    /// Lines dropped by the parser.
    pub lines_skipped: usize,
    /// Highest number of gate slots held at once, sampled each time a record
    /// is admitted.
    ///
    /// Admitted tasks may still be queued on the pool, so this can exceed the
    /// worker count but never the limit.
    pub peak_in_flight: usize,
    /// Tasks that panicked instead of completing.
    pub tasks_panicked: usize,
}

/// Reads records and reduces them with at most `limit` tasks in flight.
#[derive(Debug)]
pub struct ReductionPipeline {
    gate: AdmissionGate,
    pool: ThreadPool,
}

impl ReductionPipeline {
    /// Build the gate and the worker pool for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] for a zero or oversized limit and
    /// [`Error::ThreadPool`] if the workers cannot be started.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let gate = AdmissionGate::new(config.limit)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("prodpeak-reduce-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        Ok(ReductionPipeline { gate, pool })
    }

    /// Reduce every record of `reader` into `accumulator`.
    ///
    /// Returns once all spawned tasks have completed, so the accumulator is
    /// stable when this returns, on success and on error alike.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails mid-stream. Tasks already
    /// spawned are still joined first.
    pub fn run<R, A>(&self, reader: R, format: Format, accumulator: &Arc<A>) -> Result<RunStats>
    where
        R: BufRead,
        A: Accumulator + 'static,
    {
        let mut source = LineSource::new(reader);
        let barrier = JoinBarrier::new();
        let panicked = Arc::new(AtomicUsize::new(0));
        let mut stats = RunStats::default();

        debug!(
            %format,
            limit = self.gate.capacity(),
            threads = self.pool.current_num_threads(),
            "accepting"
        );
        let outcome = self.feed(
            &mut source,
            format,
            accumulator,
            &barrier,
            &panicked,
            &mut stats,
        );

        debug!(outstanding = barrier.outstanding(), "draining");
        barrier.wait();

        stats.lines_read = source.lines_read();
        stats.tasks_panicked = panicked.load(Ordering::Acquire);
        outcome?;

        info!(
            lines = stats.lines_read,
            records = stats.records_parsed,
            skipped = stats.lines_skipped,
            peak_in_flight = stats.peak_in_flight,
            "done"
        );
        Ok(stats)
    }

    /// Read, parse, admit and spawn until the source is exhausted.
    fn feed<R, A>(
        &self,
        source: &mut LineSource<R>,
        format: Format,
        accumulator: &Arc<A>,
        barrier: &JoinBarrier,
        panicked: &Arc<AtomicUsize>,
        stats: &mut RunStats,
    ) -> Result<()>
    where
        R: BufRead,
        A: Accumulator + 'static,
    {
        while let Some(line) = source.read_line()? {
            let record = match format.parse_line(&line) {
                Ok(record) => record,
                Err(e) => {
                    stats.lines_skipped += 1;
                    trace!(line = source.lines_read(), error = %e, "skipping line");
                    continue;
                },
            };
            stats.records_parsed += 1;

            // Blocks while the gate is saturated.
            let permit = self.gate.acquire();
            stats.peak_in_flight = stats.peak_in_flight.max(self.gate.in_use());
            let task = barrier.register();
            let accumulator = Arc::clone(accumulator);
            let panicked = Arc::clone(panicked);
            self.pool.spawn(move || {
                let _permit = permit;
                let _task = task;
                let offered =
                    panic::catch_unwind(AssertUnwindSafe(|| accumulator.offer(&record)));
                if offered.is_err() {
                    panicked.fetch_add(1, Ordering::AcqRel);
                    error!(record = %record, "reduction task panicked");
                }
            });
        }
        Ok(())
    }
}

/// Outcome of [`find_peaks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// What gets printed.
    pub report: Report,
    /// Run counters.
    pub stats: RunStats,
}

/// Run the whole pipeline over the file at `path`.
///
/// The format is chosen from the file extension before the file is opened.
///
/// # Errors
///
/// Returns [`Error::InvalidLimit`] for a zero or oversized limit,
/// [`Error::UnsupportedFormat`] for an unknown extension and [`Error::Io`] if
/// the file cannot be opened or read.
pub fn find_peaks(path: &Path, config: &PipelineConfig) -> Result<Summary> {
    config.validate()?;
    let format = Format::from_path(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let pipeline = ReductionPipeline::new(config)?;

    match config.report {
        ReportMode::Names => {
            let best = Arc::new(BestRecords::new());
            let stats = pipeline.run(reader, format, &best)?;
            Ok(Summary {
                report: Report::Names(best.snapshot()),
                stats,
            })
        },
        ReportMode::Values => {
            let peaks = Arc::new(PeakValues::new());
            let stats = pipeline.run(reader, format, &peaks)?;
            Ok(Summary {
                report: Report::Values(peaks.snapshot()),
                stats,
            })
        },
    }
}
