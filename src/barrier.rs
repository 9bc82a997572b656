//! Join barrier counting outstanding reduction tasks.
//!
//! Every spawned task holds a [`TaskGuard`] obtained from
//! [`JoinBarrier::register`]. Dropping the guard marks the task complete;
//! [`JoinBarrier::wait`] blocks on a condition variable until no guard is left.
//!
//! The counter is a `Mutex<usize>` paired with a `Condvar` rather than an
//! atomic so the waiter sleeps instead of spinning.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    outstanding: Mutex<usize>,
    done: Condvar,
}

impl Inner {
    /// Lock with poison recovery.
    ///
    /// Guards are released from `Drop`, possibly while unwinding, where a
    /// second panic would abort the process.
    fn lock_or_recover(&self) -> MutexGuard<'_, usize> {
        match self.outstanding.lock() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        }
    }
}

/// Counts registered tasks and lets one flow wait for all of them.
///
/// Cloning is cheap and every clone shares the same counter.
#[derive(Debug, Clone, Default)]
pub struct JoinBarrier {
    inner: Arc<Inner>,
}

impl JoinBarrier {
    /// Create a barrier with no outstanding tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one task; it counts as outstanding until the guard drops.
    #[must_use = "the task is marked complete as soon as the guard is dropped"]
    pub fn register(&self) -> TaskGuard {
        *self.inner.lock_or_recover() += 1;
        TaskGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Block until every registered task has completed.
    ///
    /// Returns immediately if nothing is outstanding.
    pub fn wait(&self) {
        let mut outstanding = self.inner.lock_or_recover();
        while *outstanding > 0 {
            outstanding = match self.inner.done.wait(outstanding) {
                Ok(guard) => guard,
                Err(poison) => poison.into_inner(),
            };
        }
    }

    /// Number of tasks registered but not yet completed.
    pub fn outstanding(&self) -> usize {
        *self.inner.lock_or_recover()
    }
}

/// Marks one registered task; dropping it signals completion.
#[derive(Debug)]
pub struct TaskGuard {
    inner: Arc<Inner>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        let mut outstanding = self.inner.lock_or_recover();
        *outstanding -= 1;
        if *outstanding == 0 {
            self.inner.done.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_without_tasks_returns() {
        let barrier = JoinBarrier::new();
        barrier.wait();
        assert_eq!(barrier.outstanding(), 0);
    }

    #[test]
    fn test_register_and_complete() {
        let barrier = JoinBarrier::new();
        let a = barrier.register();
        let b = barrier.register();
        assert_eq!(barrier.outstanding(), 2);
        drop(a);
        assert_eq!(barrier.outstanding(), 1);
        drop(b);
        barrier.wait();
        assert_eq!(barrier.outstanding(), 0);
    }

    #[test]
    fn test_wait_blocks_until_all_done() {
        let barrier = JoinBarrier::new();
        let finished = Arc::new(AtomicUsize::new(0));

        for i in 0..8u64 {
            let guard = barrier.register();
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(5 * i));
                finished.fetch_add(1, Ordering::SeqCst);
                drop(guard);
            });
        }

        barrier.wait();
        assert_eq!(finished.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_guard_released_on_panic() {
        let barrier = JoinBarrier::new();
        let guard = barrier.register();
        let result = thread::spawn(move || {
            let _guard = guard;
            panic!("task failed");
        })
        .join();
        assert!(result.is_err());
        barrier.wait();
        assert_eq!(barrier.outstanding(), 0);
    }
}
