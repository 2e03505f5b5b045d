//! Storage engine observability counters.
//!
//! Lightweight process-local counters for the growth guard and the splice
//! engine. Events with per-generation detail go through `tracing` at trace
//! level; the counters here give cheap totals for tests and diagnostics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome classes of the growth guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthOutcome {
    /// The segment held the frontier claim and had room.
    InPlace,
    /// The segment held the claim but its generation was full.
    Reallocated,
    /// Another view had already advanced the frontier.
    Rejected,
}

impl GrowthOutcome {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InPlace => "in_place",
            Self::Reallocated => "reallocated",
            Self::Rejected => "rejected",
        }
    }
}

/// Snapshot of storage engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrandMetricsSnapshot {
    /// Extensions written directly at a shared frontier.
    pub strand_extend_in_place_total: u64,
    /// Extensions refused because another view owned the frontier.
    pub strand_extend_rejected_total: u64,
    /// Backing arrays replaced by a larger generation.
    pub strand_reallocations_total: u64,
    /// Backing array generations allocated, including reallocations.
    pub strand_generations_total: u64,
    /// Splice boundary runs copied onto a claimant's frontier.
    pub strand_splice_merged_total: u64,
    /// Splice runs linked by reference without copying.
    pub strand_splice_linked_total: u64,
}

static EXTEND_IN_PLACE_TOTAL: AtomicU64 = AtomicU64::new(0);
static EXTEND_REJECTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static REALLOCATIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static GENERATIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static SPLICE_MERGED_TOTAL: AtomicU64 = AtomicU64::new(0);
static SPLICE_LINKED_TOTAL: AtomicU64 = AtomicU64::new(0);

pub(crate) fn record_growth(outcome: GrowthOutcome) {
    let counter = match outcome {
        GrowthOutcome::InPlace => &EXTEND_IN_PLACE_TOTAL,
        GrowthOutcome::Reallocated => &REALLOCATIONS_TOTAL,
        GrowthOutcome::Rejected => &EXTEND_REJECTED_TOTAL,
    };
    counter.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_generation() {
    GENERATIONS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_splice(merged: bool) {
    if merged {
        SPLICE_MERGED_TOTAL.fetch_add(1, Ordering::Relaxed);
    } else {
        SPLICE_LINKED_TOTAL.fetch_add(1, Ordering::Relaxed);
    }
}

/// Return a snapshot of the storage engine counters.
#[must_use]
pub fn strand_metrics_snapshot() -> StrandMetricsSnapshot {
    StrandMetricsSnapshot {
        strand_extend_in_place_total: EXTEND_IN_PLACE_TOTAL.load(Ordering::Relaxed),
        strand_extend_rejected_total: EXTEND_REJECTED_TOTAL.load(Ordering::Relaxed),
        strand_reallocations_total: REALLOCATIONS_TOTAL.load(Ordering::Relaxed),
        strand_generations_total: GENERATIONS_TOTAL.load(Ordering::Relaxed),
        strand_splice_merged_total: SPLICE_MERGED_TOTAL.load(Ordering::Relaxed),
        strand_splice_linked_total: SPLICE_LINKED_TOTAL.load(Ordering::Relaxed),
    }
}

/// Reset all storage engine counters.
pub fn reset_strand_metrics() {
    EXTEND_IN_PLACE_TOTAL.store(0, Ordering::Relaxed);
    EXTEND_REJECTED_TOTAL.store(0, Ordering::Relaxed);
    REALLOCATIONS_TOTAL.store(0, Ordering::Relaxed);
    GENERATIONS_TOTAL.store(0, Ordering::Relaxed);
    SPLICE_MERGED_TOTAL.store(0, Ordering::Relaxed);
    SPLICE_LINKED_TOTAL.store(0, Ordering::Relaxed);
}
