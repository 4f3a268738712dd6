//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics registry containing all checker counters
///
/// # Thread Safety
///
/// All counters use atomic operations with Relaxed ordering.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Hints compiled into check procedures
    hints_compiled: AtomicU64,
    /// Top-level checks performed through a checker
    checks_performed: AtomicU64,
    /// Top-level checks that rejected their pith
    checks_rejected: AtomicU64,
    /// Causes produced by the sleuth
    causes_diagnosed: AtomicU64,
    /// Forward references resolved against the scope
    forward_refs_resolved: AtomicU64,
    /// Forward references served from the resolver cache
    forward_ref_cache_hits: AtomicU64,
    /// Definition-time defects and consistency violations raised
    defects_raised: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_hints_compiled(&self) {
        self.hints_compiled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_checks_performed(&self) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_checks_rejected(&self) {
        self.checks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_causes_diagnosed(&self) {
        self.causes_diagnosed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_forward_refs_resolved(&self) {
        self.forward_refs_resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_forward_ref_cache_hits(&self) {
        self.forward_ref_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_defects_raised(&self) {
        self.defects_raised.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"hints_compiled":{},"checks_performed":{},"checks_rejected":{},"causes_diagnosed":{},"forward_refs_resolved":{},"forward_ref_cache_hits":{},"defects_raised":{}}}"#,
            s.hints_compiled,
            s.checks_performed,
            s.checks_rejected,
            s.causes_diagnosed,
            s.forward_refs_resolved,
            s.forward_ref_cache_hits,
            s.defects_raised,
        )
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hints_compiled: self.hints_compiled.load(Ordering::Relaxed),
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_rejected: self.checks_rejected.load(Ordering::Relaxed),
            causes_diagnosed: self.causes_diagnosed.load(Ordering::Relaxed),
            forward_refs_resolved: self.forward_refs_resolved.load(Ordering::Relaxed),
            forward_ref_cache_hits: self.forward_ref_cache_hits.load(Ordering::Relaxed),
            defects_raised: self.defects_raised.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub hints_compiled: u64,
    pub checks_performed: u64,
    pub checks_rejected: u64,
    pub causes_diagnosed: u64,
    pub forward_refs_resolved: u64,
    pub forward_ref_cache_hits: u64,
    pub defects_raised: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_hints_compiled();
        registry.increment_checks_performed();
        registry.increment_checks_performed();
        registry.increment_checks_rejected();
        registry.increment_causes_diagnosed();
        registry.increment_forward_refs_resolved();
        registry.increment_forward_ref_cache_hits();
        registry.increment_defects_raised();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.hints_compiled, 1);
        assert_eq!(snapshot.checks_performed, 2);
        assert_eq!(snapshot.checks_rejected, 1);
        assert_eq!(snapshot.causes_diagnosed, 1);
        assert_eq!(snapshot.forward_refs_resolved, 1);
        assert_eq!(snapshot.forward_ref_cache_hits, 1);
        assert_eq!(snapshot.defects_raised, 1);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.increment_hints_compiled();
        registry.increment_checks_rejected();

        let parsed: serde_json::Value = serde_json::from_str(&registry.to_json()).unwrap();
        assert_eq!(parsed["hints_compiled"], 1);
        assert_eq!(parsed["checks_rejected"], 1);
        assert_eq!(parsed["defects_raised"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_checks_performed();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().checks_performed, 1000);
    }
}
