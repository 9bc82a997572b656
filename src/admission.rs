//! Admission gate bounding the number of in-flight reduction tasks.
//!
//! The gate is a counting semaphore built on a bounded
//! [`crossbeam_channel`]: acquiring a slot sends a token into the channel,
//! which blocks once all `capacity` slots hold a token, and releasing a slot
//! takes one token back out. A blocked [`AdmissionGate::acquire`] is the only
//! backpressure point of the pipeline.
//!
//! The channel reserves storage for all of its slots when it is created, so
//! capacity is capped at [`MAX_CAPACITY`].
//!
//! Slots are handed out as [`Permit`] guards and released on drop, so a task
//! gives its slot back on every exit path, unwinding included.
//!
//! # Example
//!
//! ```
//! use prodpeak::admission::AdmissionGate;
//!
//! let gate = AdmissionGate::new(2)?;
//! let first = gate.acquire();
//! let second = gate.acquire();
//! assert_eq!(gate.in_use(), 2);
//! assert!(gate.try_acquire().is_none());
//!
//! drop(first);
//! assert_eq!(gate.in_use(), 1);
//! # drop(second);
//! # Ok::<(), prodpeak::Error>(())
//! ```

use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender};

/// Largest number of slots a gate may have.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Fixed-capacity, blocking slot counter.
///
/// Cloning is cheap and every clone shares the same slots.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    slots: Sender<()>,
    tokens: Receiver<()>,
    capacity: usize,
}

impl AdmissionGate {
    /// Create a gate with `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] if `capacity` is zero, since a zero-slot
    /// gate could never admit anything, or above [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(Error::InvalidLimit(capacity));
        }
        let (slots, tokens) = bounded(capacity);
        Ok(AdmissionGate {
            slots,
            tokens,
            capacity,
        })
    }

    /// Block until a slot is free and reserve it.
    #[must_use = "the slot is released as soon as the permit is dropped"]
    pub fn acquire(&self) -> Permit {
        // Both channel ends live in `self`, so the send cannot disconnect.
        let _ = self.slots.send(());
        self.permit()
    }

    /// Reserve a slot only if one is free right now.
    #[must_use]
    pub fn try_acquire(&self) -> Option<Permit> {
        self.slots.try_send(()).ok().map(|()| self.permit())
    }

    /// Number of slots currently reserved.
    pub fn in_use(&self) -> usize {
        self.tokens.len()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn permit(&self) -> Permit {
        Permit {
            tokens: self.tokens.clone(),
        }
    }
}

/// A reserved gate slot; dropping it frees the slot.
#[derive(Debug)]
pub struct Permit {
    tokens: Receiver<()>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        // A permit exists only after its token was sent, so one is queued.
        let _ = self.tokens.try_recv();
    }
}
