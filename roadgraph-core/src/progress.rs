//! Progress reporting hook for long-running construction steps

/// Receives progress as work items complete
pub trait Progress {
    /// `n` more items are done
    fn advance(&self, n: u64);
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&self, _n: u64) {}
}

impl<P: Progress + ?Sized> Progress for &P {
    fn advance(&self, n: u64) {
        (**self).advance(n);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Counter(Cell<u64>);

    impl Progress for Counter {
        fn advance(&self, n: u64) {
            self.0.set(self.0.get() + n);
        }
    }

    fn finish_three(progress: impl Progress) {
        progress.advance(3);
    }

    #[test]
    fn test_progress_through_reference() {
        let counter = Counter(Cell::new(0));
        let progress: &dyn Progress = &counter;
        progress.advance(2);
        finish_three(progress);
        NoProgress.advance(10);

        assert_eq!(counter.0.get(), 5);
    }
}
