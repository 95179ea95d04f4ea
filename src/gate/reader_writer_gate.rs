use std::fmt::Debug;

use parking_lot::RwLock;
use tracing::trace;

/// Multiple-reader / single-writer guard around a piece of shared state.
///
/// At any instant the gate is held either by any number of shared holders or
/// by exactly one exclusive holder. Access is scoped to the closure passed to
/// [`run_shared`](Self::run_shared) or [`run_exclusive`](Self::run_exclusive);
/// the gate is released when the closure returns, whether it produced an
/// error value or unwound. A failing operation never leaves the gate locked.
///
/// The gate is not reentrant: an operation must not call back into the same
/// gate while it holds it.
///
/// The gate does not need to protect anything in particular; a
/// `ReaderWriterGate<()>` serializes arbitrary operations:
///
/// ```
/// use gridable::ReaderWriterGate;
///
/// let gate = ReaderWriterGate::<()>::default();
/// let total = gate.run_shared(|_| 1 + 1);
/// gate.run_exclusive(|_| assert_eq!(total, 2));
/// ```
pub struct ReaderWriterGate<T> {
    inner: RwLock<T>,
}

impl<T> ReaderWriterGate<T> {
    pub fn new(state: T) -> Self {
        Self {
            inner: RwLock::new(state),
        }
    }

    /// Runs `op` while holding shared access.
    ///
    /// Other shared holders may run concurrently; no exclusive holder is
    /// active for the duration of `op`. Whatever `op` returns, including an
    /// `Err`, is passed through unchanged after release.
    pub fn run_shared<R>(
        &self,
        op: impl FnOnce(&T) -> R,
    ) -> R {
        let guard = match self.inner.try_read() {
            Some(guard) => guard,
            None => {
                trace!("shared access contended, waiting for exclusive holder");
                self.inner.read()
            }
        };
        op(&guard)
    }

    /// Runs `op` while holding exclusive access.
    ///
    /// No other shared or exclusive holder is active for the duration of
    /// `op`.
    pub fn run_exclusive<R>(
        &self,
        op: impl FnOnce(&mut T) -> R,
    ) -> R {
        let mut guard = match self.inner.try_write() {
            Some(guard) => guard,
            None => {
                trace!("exclusive access contended, waiting for active holders");
                self.inner.write()
            }
        };
        op(&mut guard)
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Default> Default for ReaderWriterGate<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Debug for ReaderWriterGate<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ReaderWriterGate")
            .field("locked", &self.inner.is_locked())
            .field("exclusive", &self.inner.is_locked_exclusive())
            .finish()
    }
}
