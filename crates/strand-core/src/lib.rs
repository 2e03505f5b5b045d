//! Storage engine for Strand persistent sequences.
//!
//! Handles share growable backing arrays instead of allocating a node per
//! element. The only in-place write anywhere in the engine is advancing a
//! generation's frontier, and that is gated by the exclusive-claim check in
//! [`segment`], so every handle ever returned keeps observing exactly the
//! elements it was created with.

pub mod config;
mod fold;
pub mod instrumentation;
pub mod iter;
pub mod segment;
pub mod sequence;
mod traits;

pub use config::{
    DEFAULT_MIN_CAPACITY, DEFAULT_SPLICE_MERGE_LIMIT, MAX_MIN_CAPACITY, SequenceConfig,
};
pub use instrumentation::{
    GrowthOutcome, StrandMetricsSnapshot, reset_strand_metrics, strand_metrics_snapshot,
};
pub use iter::Iter;
pub use segment::{Extension, Segment};
pub use sequence::Sequence;
pub use strand_error::{Result, StrandError};
