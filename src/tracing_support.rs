//! Logging and span timing.
//!
//! Graph operations log through [`tracing`] when the `tracing` feature is
//! enabled.  With the feature disabled, the macros used inside the crate
//! expand to nothing and the setup functions are no-ops.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    thread_local! {
        static SPAN_TIMINGS: RefCell<BTreeMap<&'static str, (Duration, usize)>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    /// Accumulates the wall-clock time spent inside each named span, per
    /// thread, so concurrently running tests do not mix their totals.
    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    SPAN_TIMINGS.with(|totals| {
                        let mut totals = totals.borrow_mut();
                        let entry = totals.entry(name).or_insert((Duration::ZERO, 0));
                        entry.0 += elapsed;
                        entry.1 += 1;
                    });
                }
            }
        }
    }

    /// Installs a global subscriber that records span timings and prints
    /// warnings.  Safe to call repeatedly; only the first call has an effect,
    /// and it does nothing if another subscriber is already installed.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_filter(LevelFilter::WARN);
            let _ = Registry::default()
                .with(TimingLayer)
                .with(fmt_layer)
                .try_init();
        });
    }

    /// Returns the accumulated `(total time, count)` for each span name
    /// closed on this thread since the last reset.
    pub fn span_timings() -> BTreeMap<&'static str, (Duration, usize)> {
        SPAN_TIMINGS.with(|totals| totals.borrow().clone())
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {
        let mut entries: Vec<_> = span_timings().into_iter().collect();
        entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));
        eprintln!("span timings (desc):");
        for (name, (duration, count)) in entries {
            eprintln!("  {name}: {:?} ({}x)", duration, count);
        }
    }

    #[doc(hidden)]
    pub fn reset_span_timings() {
        init_tracing();
        SPAN_TIMINGS.with(|totals| totals.borrow_mut().clear());
    }

    pub(crate) use tracing::{debug, info_span, trace};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::{collections::BTreeMap, time::Duration};

    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    pub fn span_timings() -> BTreeMap<&'static str, (Duration, usize)> {
        BTreeMap::new()
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {
        // No-op when tracing is disabled
    }

    #[doc(hidden)]
    pub fn reset_span_timings() {
        // No-op when tracing is disabled
    }

    macro_rules! info_span {
        ($($args:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    macro_rules! debug {
        ($($args:tt)*) => {{}};
    }

    macro_rules! trace {
        ($($args:tt)*) => {{}};
    }

    pub(crate) use {debug, info_span, trace};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_span_timings_record_graph_operations() {
        reset_span_timings();
        let mut graph = UnGraph::<(), ()>::new();
        let a = graph.add_node();
        let b = graph.add_node();
        graph.add_edge(a, b).unwrap();
        graph.connected_components();
        graph.connected_components();
        graph.prune_edges(|_, _| true);

        let timings = span_timings();
        assert_eq!(timings.get("connected_components").map(|t| t.1), Some(2));
        assert_eq!(timings.get("prune_edges").map(|t| t.1), Some(1));
        dump_span_timings();

        reset_span_timings();
        assert!(span_timings().is_empty());
    }
}
