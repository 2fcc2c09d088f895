//! Row-completion reporting.
//!
//! The resampling engine calls [`RowObserver::on_row_completed`] once for every
//! target row, right after the last pixel of that row was written. Rows are
//! processed on several workers at once, so the observer is invoked
//! concurrently and in no particular order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// A sink for row-completion events.
pub trait RowObserver: Sync {
    /// Called once per fully written target row.
    fn on_row_completed(&self, row: usize);
}

impl<F> RowObserver for F
where
    F: Fn(usize) + Sync,
{
    fn on_row_completed(&self, row: usize) {
        self(row)
    }
}

/// An observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl RowObserver for NoProgress {
    fn on_row_completed(&self, _row: usize) {}
}

/// Counts completed rows with an atomic counter, e.g. to drive a progress bar.
#[derive(Debug, Default)]
pub struct RowProgress {
    completed: AtomicUsize,
    total: usize,
}

impl RowProgress {
    /// Create a counter expecting `total` rows.
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// Number of rows reported so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Number of rows expected.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Completed fraction in `[0, 1]`; an empty job counts as done.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed() as f32 / self.total as f32).min(1.0)
    }

    /// Whether every expected row has been reported.
    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

impl RowObserver for RowProgress {
    fn on_row_completed(&self, _row: usize) {
        self.completed.fetch_add(1, Ordering::AcqRel);
    }
}

/// Adapts a non-reentrant `FnMut` callback by serializing calls behind a mutex.
///
/// The lock is only held for the duration of the callback itself.
///
/// # Example
///
/// ```
/// use tessera_imgproc::progress::{RowObserver, Serialized};
///
/// let mut rows = Vec::new();
/// let observer = Serialized::new(|row| rows.push(row));
/// observer.on_row_completed(3);
/// drop(observer);
///
/// assert_eq!(rows, vec![3]);
/// ```
#[derive(Debug, Default)]
pub struct Serialized<F> {
    inner: Mutex<F>,
}

impl<F> Serialized<F>
where
    F: FnMut(usize) + Send,
{
    /// Wrap a callback.
    pub fn new(callback: F) -> Self {
        Self {
            inner: Mutex::new(callback),
        }
    }

    /// Unwrap the callback.
    pub fn into_inner(self) -> F {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F> RowObserver for Serialized<F>
where
    F: FnMut(usize) + Send,
{
    fn on_row_completed(&self, row: usize) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let callback = &mut *guard;
        callback(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_observer() {
        let count = AtomicUsize::new(0);
        let observer = |_row: usize| {
            count.fetch_add(1, Ordering::Relaxed);
        };
        observer.on_row_completed(0);
        observer.on_row_completed(1);
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn row_progress_counts() {
        let progress = RowProgress::new(4);
        assert_eq!(progress.fraction(), 0.0);

        for row in 0..4 {
            progress.on_row_completed(row);
        }
        assert_eq!(progress.completed(), 4);
        assert_eq!(progress.total(), 4);
        assert!(progress.is_complete());
        assert_eq!(progress.fraction(), 1.0);

        assert_eq!(RowProgress::new(0).fraction(), 1.0);
    }

    #[test]
    fn serialized_collects_from_threads() {
        let mut rows = Vec::new();
        let observer = Serialized::new(|row| rows.push(row));
        std::thread::scope(|s| {
            for t in 0..4 {
                let observer = &observer;
                s.spawn(move || {
                    for i in 0..8 {
                        observer.on_row_completed(t * 8 + i);
                    }
                });
            }
        });
        drop(observer);

        rows.sort_unstable();
        assert_eq!(rows, (0..32).collect::<Vec<_>>());
    }
}
