//! Persistent sequences over shared growable buffers.
//!
//! Every operation returns a new [`Sequence`]; handles issued earlier stay
//! valid and unchanged. Prepending onto the newest handle of a buffer writes
//! in place, so building a sequence element by element costs no per-element
//! node allocation, while sibling handles forked from a common parent each get
//! their own run.
//!
//! ```
//! use strand::{Sequence, seq};
//!
//! let base = seq![2, 3];
//! let a = base.prepend(1);
//! let b = base.prepend(9);
//! assert_eq!(a.to_string(), "[1, 2, 3]");
//! assert_eq!(b.to_string(), "[9, 2, 3]");
//! assert_eq!(base.len(), 2);
//!
//! let joined = a.concat(&b);
//! assert_eq!(joined.get(3), Ok(&9));
//! assert_eq!(joined.fold_left(0, |acc, x| acc + x), 20);
//! # let _: Sequence<i32> = joined;
//! ```

pub mod ops;

pub use strand_core::{
    DEFAULT_MIN_CAPACITY, DEFAULT_SPLICE_MERGE_LIMIT, Extension, GrowthOutcome, Iter,
    MAX_MIN_CAPACITY, Segment, Sequence, SequenceConfig, StrandMetricsSnapshot,
    reset_strand_metrics, strand_metrics_snapshot,
};
pub use strand_error::{Result, StrandError};

/// Build a [`Sequence`] from elements in logical order.
///
/// ```
/// let xs = strand::seq![1, 2, 3];
/// assert_eq!(xs.head(), Ok(&1));
/// assert!(strand::seq![0; 0].is_empty());
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Sequence::new()
    };
    ($value:expr; $count:expr) => {
        $crate::Sequence::from_vec(::std::vec![$value; $count])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Sequence::from_vec(::std::vec![$($value),+])
    };
}
