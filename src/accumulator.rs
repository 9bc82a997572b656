//! Best-so-far accumulators shared by the reduction tasks.
//!
//! Two implementations of [`Accumulator`] are provided:
//!
//! - [`BestRecords`] keeps the whole record for the highest price and for the
//!   highest rating, each behind its own [`Mutex`].
//! - [`PeakValues`] keeps only the two maxima as atomics, for runs that report
//!   values rather than product names.
//!
//! Both start from zero and only move on a strictly greater value, so among
//! equal maxima the first task to take the lock wins. Which task that is
//! depends on scheduling.

use crate::record::{BestRecord, ParsedRecord};
use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Shared state folded by every reduction task.
pub trait Accumulator: Send + Sync + Debug {
    /// Result read once all tasks have joined.
    type Output;

    /// Fold one record into the accumulator.
    fn offer(&self, record: &ParsedRecord);

    /// Read the current state.
    fn snapshot(&self) -> Self::Output;
}

/// Final result of a [`BestRecords`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Peaks {
    /// Record with the highest price.
    pub max_price: BestRecord,
    /// Record with the highest rating.
    pub max_rating: BestRecord,
}

/// Highest-price and highest-rating records, each under its own lock.
///
/// A task never holds both locks at once, so one task can update the rating
/// while another updates the price.
#[derive(Debug, Default)]
pub struct BestRecords {
    max_price: Mutex<BestRecord>,
    max_rating: Mutex<BestRecord>,
}

impl BestRecords {
    /// Create accumulators at the zero value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lock with poison recovery; the guarded record is always left whole.
fn lock(cell: &Mutex<BestRecord>) -> MutexGuard<'_, BestRecord> {
    match cell.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

impl Accumulator for BestRecords {
    type Output = Peaks;

    fn offer(&self, record: &ParsedRecord) {
        {
            let mut best = lock(&self.max_price);
            if record.price > best.price {
                best.clone_from(record);
            }
        }

        let mut best = lock(&self.max_rating);
        if record.rating > best.rating {
            best.clone_from(record);
        }
    }

    fn snapshot(&self) -> Peaks {
        Peaks {
            max_price: lock(&self.max_price).clone(),
            max_rating: lock(&self.max_rating).clone(),
        }
    }
}

/// Final result of a [`PeakValues`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakScalars {
    /// Highest price seen, or 0.
    pub max_price: i64,
    /// Highest rating seen, or 0.
    pub max_rating: i64,
}

/// Highest price and rating as lock-free atomics.
#[derive(Debug, Default)]
pub struct PeakValues {
    max_price: AtomicI64,
    max_rating: AtomicI64,
}

impl PeakValues {
    /// Create accumulators at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for PeakValues {
    type Output = PeakScalars;

    fn offer(&self, record: &ParsedRecord) {
        self.max_price.fetch_max(record.price, Ordering::AcqRel);
        self.max_rating.fetch_max(record.rating, Ordering::AcqRel);
    }

    fn snapshot(&self) -> PeakScalars {
        PeakScalars {
            max_price: self.max_price.load(Ordering::Acquire),
            max_rating: self.max_rating.load(Ordering::Acquire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_best_records_start_empty() {
        let best = BestRecords::new();
        assert_eq!(best.snapshot(), Peaks::default());
    }

    #[test]
    fn test_best_records_track_each_metric() {
        let best = BestRecords::new();
        best.offer(&ParsedRecord::new("cheap-good", 5, 9));
        best.offer(&ParsedRecord::new("pricey-bad", 50, 1));
        best.offer(&ParsedRecord::new("middling", 20, 4));

        let peaks = best.snapshot();
        assert_eq!(peaks.max_price, ParsedRecord::new("pricey-bad", 50, 1));
        assert_eq!(peaks.max_rating, ParsedRecord::new("cheap-good", 5, 9));
    }

    #[test]
    fn test_equal_value_does_not_overwrite() {
        let best = BestRecords::new();
        best.offer(&ParsedRecord::new("first", 10, 10));
        best.offer(&ParsedRecord::new("second", 10, 10));
        let peaks = best.snapshot();
        assert_eq!(peaks.max_price.name, "first");
        assert_eq!(peaks.max_rating.name, "first");
    }

    #[test]
    fn test_non_positive_values_never_win() {
        let best = BestRecords::new();
        best.offer(&ParsedRecord::new("free", 0, -1));
        assert_eq!(best.snapshot(), Peaks::default());
    }

    #[test]
    fn test_peak_values() {
        let peaks = PeakValues::new();
        peaks.offer(&ParsedRecord::new("", 3, 8));
        peaks.offer(&ParsedRecord::new("", 7, 2));
        assert_eq!(
            peaks.snapshot(),
            PeakScalars {
                max_price: 7,
                max_rating: 8
            }
        );
    }

    #[test]
    fn test_concurrent_offers() {
        let best = Arc::new(BestRecords::new());
        let scalars = Arc::new(PeakValues::new());

        let handles: Vec<_> = (0..8i64)
            .map(|t| {
                let best = Arc::clone(&best);
                let scalars = Arc::clone(&scalars);
                thread::spawn(move || {
                    for i in 0..1000i64 {
                        let record = ParsedRecord::new(format!("{t}-{i}"), t * 1000 + i, i);
                        best.offer(&record);
                        scalars.offer(&record);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let peaks = best.snapshot();
        assert_eq!(peaks.max_price.price, 7999);
        assert_eq!(peaks.max_price.name, "7-999");
        assert_eq!(peaks.max_rating.rating, 999);
        assert_eq!(scalars.snapshot().max_price, 7999);
        assert_eq!(scalars.snapshot().max_rating, 999);
    }
}
