//! Shared helpers for the unit tests

use std::{
    hint::black_box,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Reads `container[index]` with an index the optimizer cannot see through.
pub fn out_of_bounds<T: Copy>(container: &[T], index: usize) -> T {
    container[black_box(index)]
}

/// Counts how often a callback ran. Clones share the same count.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    hits: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Subscriber that only counts events.
#[derive(Debug, Clone, Default)]
pub struct EventCounter {
    events: Arc<AtomicUsize>,
}

impl tracing::Subscriber for EventCounter {
    fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        tracing::span::Id::from_u64(1)
    }

    fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, _event: &tracing::Event<'_>) {
        self.events.fetch_add(1, Ordering::SeqCst);
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}
}

/// Runs `f` with an [`EventCounter`] as the thread's default subscriber and returns how many
/// events it saw.
pub fn count_events<F: FnOnce()>(f: F) -> usize {
    let counter = EventCounter::default();
    let events = Arc::clone(&counter.events);
    tracing::subscriber::with_default(counter, f);
    events.load(Ordering::SeqCst)
}
