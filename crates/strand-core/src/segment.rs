//! Growable shared buffer views and the exclusive-claim growth guard.
//!
//! A [`Segment`] is a window `(offset, len)` onto a backing array
//! *generation*. Generations are fixed-capacity arrays of write-once slots
//! plus a shared `frontier` cursor marking the first unwritten slot. Any
//! number of segments may alias one generation; only the segment whose
//! window ends exactly at the frontier may write the next slot, and it takes
//! that claim with a compare-and-swap. A slot that has been written is never
//! written again, so data visible through one view can never change under
//! another.
//!
//! When the claimant needs more room than the generation has, a new
//! generation is allocated holding a copy of the claimant's window and the
//! outcome is reported as [`Extension::Reallocated`]. The old generation and
//! every other view of it are left untouched.

use std::fmt;
use std::iter;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::config::SequenceConfig;
use crate::instrumentation::{GrowthOutcome, record_generation, record_growth};

static NEXT_GENERATION_ID: AtomicU64 = AtomicU64::new(1);

/// One backing array allocation.
struct Generation<T> {
    id: u64,
    slots: Box<[OnceLock<T>]>,
    frontier: AtomicUsize,
}

/// Result of asking a generation for `count` slots after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// Slots `[start, start + count)` now belong to the caller.
    Granted { start: usize },
    /// The caller holds the frontier but the generation is full.
    Exhausted,
    /// Another view already advanced the frontier past `end`.
    Contended,
}

impl<T> Generation<T> {
    /// Allocate a generation whose first slots hold `values`.
    ///
    /// `capacity` receives the number of values and returns the slot count;
    /// it is clamped so every value fits.
    fn filled<I>(values: I, capacity: impl FnOnce(usize) -> usize) -> (Self, usize)
    where
        I: IntoIterator<Item = T>,
    {
        let mut slots: Vec<OnceLock<T>> = values.into_iter().map(OnceLock::from).collect();
        let len = slots.len();
        let capacity = capacity(len).max(len);
        slots.resize_with(capacity, OnceLock::new);
        record_generation();

        let generation = Self {
            id: NEXT_GENERATION_ID.fetch_add(1, Ordering::Relaxed),
            slots: slots.into_boxed_slice(),
            frontier: AtomicUsize::new(len),
        };
        (generation, len)
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn claim(&self, end: usize, count: usize) -> Claim {
        match end.checked_add(count) {
            Some(new_end) if new_end <= self.capacity() => {
                match self.frontier.compare_exchange(
                    end,
                    new_end,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => Claim::Granted { start: end },
                    Err(_) => Claim::Contended,
                }
            }
            _ => {
                if self.frontier.load(Ordering::Acquire) == end {
                    Claim::Exhausted
                } else {
                    Claim::Contended
                }
            }
        }
    }
}

/// Outcome of [`Segment::try_extend`].
pub enum Extension<T> {
    /// The value was written at the shared frontier of the same generation.
    InPlace(Segment<T>),
    /// The generation was full; the returned segment lives in a fresh one.
    Reallocated(Segment<T>),
    /// Another view owns the frontier. The value is handed back so the
    /// caller can start a new segment with it.
    Rejected(T),
}

impl<T> Extension<T> {
    /// The extended segment, if the extension succeeded.
    pub fn into_segment(self) -> Option<Segment<T>> {
        match self {
            Self::InPlace(segment) | Self::Reallocated(segment) => Some(segment),
            Self::Rejected(_) => None,
        }
    }

    /// Growth classification for logs and counters.
    #[must_use]
    pub const fn outcome(&self) -> GrowthOutcome {
        match self {
            Self::InPlace(_) => GrowthOutcome::InPlace,
            Self::Reallocated(_) => GrowthOutcome::Reallocated,
            Self::Rejected(_) => GrowthOutcome::Rejected,
        }
    }
}

impl<T> fmt::Debug for Extension<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InPlace(segment) => f.debug_tuple("InPlace").field(segment).finish(),
            Self::Reallocated(segment) => f.debug_tuple("Reallocated").field(segment).finish(),
            Self::Rejected(_) => f.write_str("Rejected(..)"),
        }
    }
}

/// A window onto a shared backing array generation.
///
/// Elements are kept in storage order: position 0 is the oldest element of
/// the window and position `len - 1` the most recently written one.
pub struct Segment<T> {
    generation: Arc<Generation<T>>,
    offset: usize,
    len: usize,
}

impl<T> Clone for Segment<T> {
    fn clone(&self) -> Self {
        Self {
            generation: Arc::clone(&self.generation),
            offset: self.offset,
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("generation", &self.generation.id)
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("capacity", &self.generation.capacity())
            .field(
                "frontier",
                &self.generation.frontier.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl<T> Segment<T> {
    /// A zero-capacity segment. Any extension reallocates.
    #[must_use]
    pub fn empty() -> Self {
        let (generation, _) = Generation::filled(iter::empty(), |_| 0);
        Self {
            generation: Arc::new(generation),
            offset: 0,
            len: 0,
        }
    }

    /// Create an exclusively owned segment holding `values` in storage order.
    /// The frontier sits right after the last value.
    pub fn from_storage_order<I>(values: I, config: &SequenceConfig) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let (generation, len) = Generation::filled(values, |len| config.capacity_for(len));
        Self {
            generation: Arc::new(generation),
            offset: 0,
            len,
        }
    }

    /// A new exclusively owned segment holding one value.
    pub fn singleton(value: T, config: &SequenceConfig) -> Self {
        Self::from_storage_order(iter::once(value), config)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the window within its generation.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Slot count of the backing generation.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.generation.capacity()
    }

    /// Process-unique id of the backing generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.id
    }

    /// Whether two segments alias the same backing generation.
    #[must_use]
    pub fn shares_generation_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.generation, &other.generation)
    }

    const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Whether this window currently ends at the generation's frontier, i.e.
    /// whether an extension would be allowed to write in place.
    #[must_use]
    pub fn is_frontier_claimant(&self) -> bool {
        self.generation.frontier.load(Ordering::Acquire) == self.end()
    }

    /// Element at storage position `pos` within the window.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&T> {
        if pos >= self.len {
            return None;
        }
        self.generation.slots.get(self.offset + pos)?.get()
    }

    /// Elements of the window in storage order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.generation.slots[self.offset..self.end()]
            .iter()
            .filter_map(OnceLock::get)
    }

    /// The window without its most recently written element.
    #[must_use]
    pub fn shrink_back(&self) -> Self {
        Self {
            generation: Arc::clone(&self.generation),
            offset: self.offset,
            len: self.len.saturating_sub(1),
        }
    }

    /// The window without its oldest element.
    #[must_use]
    pub fn shrink_front(&self) -> Self {
        let step = usize::from(self.len > 0);
        Self {
            generation: Arc::clone(&self.generation),
            offset: self.offset + step,
            len: self.len - step,
        }
    }

    fn widened(&self, extra: usize) -> Self {
        Self {
            generation: Arc::clone(&self.generation),
            offset: self.offset,
            len: self.len + extra,
        }
    }

    /// Append `value` after the window if this segment holds the frontier.
    ///
    /// The returned header is always fresh; `self` keeps its old window.
    pub fn try_extend(&self, value: T, config: &SequenceConfig) -> Extension<T>
    where
        T: Clone,
    {
        match self.generation.claim(self.end(), 1) {
            Claim::Granted { start } => match self.generation.slots[start].set(value) {
                Ok(()) => {
                    record_growth(GrowthOutcome::InPlace);
                    Extension::InPlace(self.widened(1))
                }
                Err(value) => {
                    record_growth(GrowthOutcome::Rejected);
                    Extension::Rejected(value)
                }
            },
            Claim::Exhausted => {
                Extension::Reallocated(self.reallocate(iter::once(value), 1, config))
            }
            Claim::Contended => {
                record_growth(GrowthOutcome::Rejected);
                trace!(
                    generation = self.generation.id,
                    offset = self.offset,
                    len = self.len,
                    outcome = GrowthOutcome::Rejected.as_str(),
                    "frontier claimed by another view"
                );
                Extension::Rejected(value)
            }
        }
    }

    /// Append every element of `run` (storage order) after the window if this
    /// segment holds the frontier and the generation has room for all of it.
    /// Returns `None` otherwise; this path never reallocates, so the caller
    /// can fall back to linking `run` by reference.
    pub fn try_extend_from(&self, run: &Self) -> Option<Self>
    where
        T: Clone,
    {
        let count = run.len();
        if count == 0 {
            return Some(self.clone());
        }
        match self.generation.claim(self.end(), count) {
            Claim::Granted { start } => {
                let slots = &self.generation.slots[start..start + count];
                for (slot, value) in slots.iter().zip(run.iter()) {
                    if slot.set(value.clone()).is_err() {
                        return None;
                    }
                }
                record_growth(GrowthOutcome::InPlace);
                Some(self.widened(count))
            }
            Claim::Exhausted | Claim::Contended => {
                record_growth(GrowthOutcome::Rejected);
                trace!(
                    generation = self.generation.id,
                    len = self.len,
                    capacity = self.generation.capacity(),
                    incoming = count,
                    outcome = GrowthOutcome::Rejected.as_str(),
                    "bulk extension refused"
                );
                None
            }
        }
    }

    fn reallocate<I>(&self, tail: I, extra: usize, config: &SequenceConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let needed = self.len.saturating_add(extra);
        let (generation, len) = Generation::filled(self.iter().cloned().chain(tail), |_| {
            config.growth_capacity(needed)
        });
        record_growth(GrowthOutcome::Reallocated);
        trace!(
            from_generation = self.generation.id,
            to_generation = generation.id,
            len,
            capacity = generation.capacity(),
            outcome = GrowthOutcome::Reallocated.as_str(),
            "segment generation reallocated"
        );
        Self {
            generation: Arc::new(generation),
            offset: 0,
            len,
        }
    }
}
