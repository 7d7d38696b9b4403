//! Contains the [`Handler`] trait through which the compiler hands out the
//! non-fatal diagnostics it finds while compiling an equation.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

/// Receives the diagnostics found by the compiler.
pub trait Handler<T>: Send + Sync {
    /// Receives a diagnostic.
    fn receive(&self, diagnostic: T);
}

/// Collects every diagnostic it receives, in order.
#[derive(Debug)]
pub struct Storage<T> {
    diagnostics: Mutex<Vec<T>>,
}

impl<T> Storage<T> {
    /// Creates an empty [`Storage`].
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: Mutex::new(Vec::new()) } }

    /// Returns the number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize { self.diagnostics.lock().len() }

    /// Checks whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.diagnostics.lock().is_empty() }

    /// Removes and returns the diagnostics collected so far.
    #[must_use]
    pub fn take(&self) -> Vec<T> { std::mem::take(&mut *self.diagnostics.lock()) }

    /// Consumes the [`Storage`] and returns the collected diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send, U: Into<T>> Handler<U> for Storage<T> {
    fn receive(&self, diagnostic: U) { self.diagnostics.lock().push(diagnostic.into()); }
}

/// Counts the diagnostics it receives and drops them.
#[derive(Debug, Default)]
pub struct Counter(AtomicUsize);

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.0.load(Ordering::Relaxed) }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _: T) { self.0.fetch_add(1, Ordering::Relaxed); }
}

#[cfg(test)]
mod test;
