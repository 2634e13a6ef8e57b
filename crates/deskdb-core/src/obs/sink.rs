//! Metrics sink boundary.
//!
//! Load and search code MUST NOT touch `obs::metrics` state directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// PlanKind
/// How a search reached its candidate records.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanKind {
    /// Direct unique-identifier lookup.
    ById,
    /// Every record of the variant was matched.
    FullScan,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    LoadFinish {
        entity: &'static str,
        rows: u64,
    },
    Search {
        entity: &'static str,
        plan: PlanKind,
    },
    RowsScanned {
        entity: &'static str,
        rows: u64,
    },
    DanglingReference {
        entity: &'static str,
    },
    Reload {
        ok: bool,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local counter state.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::LoadFinish { entity, rows } => {
                metrics::with_state_mut(|m| {
                    m.ops.loads = m.ops.loads.saturating_add(1);
                    m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.rows_loaded = entry.rows_loaded.saturating_add(rows);
                });
            }

            MetricsEvent::Search { entity, plan } => {
                metrics::with_state_mut(|m| {
                    m.ops.searches = m.ops.searches.saturating_add(1);
                    match plan {
                        PlanKind::ById => m.ops.plan_by_id = m.ops.plan_by_id.saturating_add(1),
                        PlanKind::FullScan => {
                            m.ops.plan_full_scan = m.ops.plan_full_scan.saturating_add(1);
                        }
                    }
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.searches = entry.searches.saturating_add(1);
                });
            }

            MetricsEvent::RowsScanned { entity, rows } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows);
                });
            }

            MetricsEvent::DanglingReference { entity } => {
                metrics::with_state_mut(|m| {
                    m.ops.dangling_references = m.ops.dangling_references.saturating_add(1);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.dangling_references = entry.dangling_references.saturating_add(1);
                });
            }

            MetricsEvent::Reload { ok } => {
                metrics::with_state_mut(|m| {
                    if ok {
                        m.ops.reloads = m.ops.reloads.saturating_add(1);
                    } else {
                        m.ops.reload_failures = m.ops.reload_failures.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a live `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` restores the previous slot on every exit,
        //   unwinding included, so `ptr` never outlives the borrowed sink.
        // - `record` is synchronous and never stores `ptr`.
        // - Only a shared reference is materialized, matching the original borrow.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - The pointer is installed only for this dynamic scope and `Guard`
    //   restores the previous slot on all exits, including panic.
    // - `record` dereferences it synchronously and never persists it.
    // - The lifetime is erased but access stays shared-only.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink<'a> {
        calls: &'a AtomicUsize,
    }

    impl MetricsSink for CountingSink<'_> {
        fn record(&self, _: MetricsEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn search_event() -> MetricsEvent {
        MetricsEvent::Search {
            entity: "obs::tests::Entity",
            plan: PlanKind::FullScan,
        }
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let outer_calls = AtomicUsize::new(0);
        let inner_calls = AtomicUsize::new(0);
        let outer = CountingSink {
            calls: &outer_calls,
        };
        let inner = CountingSink {
            calls: &inner_calls,
        };

        record(search_event());
        assert_eq!(outer_calls.load(Ordering::SeqCst), 0);

        with_metrics_sink(&outer, || {
            record(search_event());
            with_metrics_sink(&inner, || record(search_event()));

            // inner override restored to outer
            record(search_event());
        });

        assert_eq!(outer_calls.load(Ordering::SeqCst), 2);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 1);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let calls = AtomicUsize::new(0);
        let sink = CountingSink { calls: &calls };

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(&sink, || {
                record(search_event());
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();

        assert!(panicked);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn global_sink_accumulates_per_entity() {
        metrics::reset();

        record(MetricsEvent::LoadFinish {
            entity: "Account",
            rows: 12,
        });
        record(MetricsEvent::Search {
            entity: "Account",
            plan: PlanKind::ById,
        });
        record(MetricsEvent::RowsScanned {
            entity: "Case",
            rows: 19,
        });
        record(MetricsEvent::DanglingReference { entity: "Case" });
        record(MetricsEvent::Reload { ok: false });

        let state = metrics::snapshot();
        assert_eq!(state.ops.loads, 1);
        assert_eq!(state.ops.rows_loaded, 12);
        assert_eq!(state.ops.plan_by_id, 1);
        assert_eq!(state.ops.plan_full_scan, 0);
        assert_eq!(state.ops.rows_scanned, 19);
        assert_eq!(state.ops.dangling_references, 1);
        assert_eq!(state.ops.reload_failures, 1);
        assert_eq!(state.entities["Account"].searches, 1);
        assert_eq!(state.entities["Case"].dangling_references, 1);
    }
}
