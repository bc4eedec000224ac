//! Update sink trait and implementations.

use std::sync::{Arc, Mutex, PoisonError};

use super::PortfolioUpdate;

/// Trait for receiving portfolio updates.
///
/// # Design Rules
///
/// - `on_update()` runs on the scheduler's task and must be fast and non-blocking
/// - A panic inside `on_update()` is caught and logged; other subscribers still
///   receive the update
pub trait PortfolioUpdateSink: Send + Sync {
    fn on_update(&self, update: &PortfolioUpdate);
}

impl<F> PortfolioUpdateSink for F
where
    F: Fn(&PortfolioUpdate) + Send + Sync,
{
    fn on_update(&self, update: &PortfolioUpdate) {
        self(update)
    }
}

/// No-op implementation for tests or contexts that don't need updates.
#[derive(Clone, Default)]
pub struct NoOpUpdateSink;

impl PortfolioUpdateSink for NoOpUpdateSink {
    fn on_update(&self, _update: &PortfolioUpdate) {}
}

/// Mock sink for testing - collects received updates.
#[derive(Clone, Default)]
pub struct MockUpdateSink {
    updates: Arc<Mutex<Vec<PortfolioUpdate>>>,
}

impl MockUpdateSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected updates.
    pub fn updates(&self) -> Vec<PortfolioUpdate> {
        self.lock().clone()
    }

    /// Returns the most recent update, if any.
    pub fn last(&self) -> Option<PortfolioUpdate> {
        self.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PortfolioUpdate>> {
        self.updates.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PortfolioUpdateSink for MockUpdateSink {
    fn on_update(&self, update: &PortfolioUpdate) {
        self.lock().push(update.clone());
    }
}
