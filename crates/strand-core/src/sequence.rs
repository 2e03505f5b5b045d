//! Persistent sequence handles.
//!
//! A [`Sequence`] owns a *spine*: a [`Segment`] of entries in storage order,
//! innermost (oldest) run first and outermost (most recently prepended) run
//! last. Each entry records `suffix_len`, the number of elements stored in
//! the entries before it, which is the number of elements that come after
//! the run in logical order. Lookups bisect the spine on that prefix sum.
//!
//! Every operation returns a new handle. Runs and spines are shared between
//! handles and only ever grow at a frontier the handle exclusively claims,
//! so no handle can observe another handle's growth.

use std::iter;

use strand_error::{Result, StrandError};
use tracing::trace;

use crate::config::SequenceConfig;
use crate::instrumentation::record_splice;
use crate::segment::{Extension, Segment};

/// One run of a handle plus its prefix-sum annotation.
pub(crate) struct Entry<T> {
    pub(crate) run: Segment<T>,
    pub(crate) suffix_len: usize,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            run: self.run.clone(),
            suffix_len: self.suffix_len,
        }
    }
}

impl<T> Entry<T> {
    const fn new(run: Segment<T>, suffix_len: usize) -> Self {
        Self { run, suffix_len }
    }

    /// Storage position one past this run.
    pub(crate) const fn end(&self) -> usize {
        self.suffix_len + self.run.len()
    }

    fn rebased(&self, removed: usize) -> Self {
        Self::new(self.run.clone(), self.suffix_len.saturating_sub(removed))
    }
}

/// An immutable sequence handle backed by shared growable buffers.
///
/// Index 0 is the most recently prepended element. Cloning a handle is O(1)
/// and shares all storage.
pub struct Sequence<T> {
    pub(crate) spine: Segment<Entry<T>>,
    pub(crate) config: SequenceConfig,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            spine: self.spine.clone(),
            config: self.config,
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sequence<T> {
    /// An empty sequence with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::empty_with(SequenceConfig::default())
    }

    /// An empty sequence with a validated configuration.
    pub fn with_config(config: SequenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty_with(config))
    }

    pub(crate) fn empty_with(config: SequenceConfig) -> Self {
        Self {
            spine: Segment::empty(),
            config,
        }
    }

    /// Build a sequence whose logical order matches `values`.
    #[must_use]
    pub fn from_vec(mut values: Vec<T>) -> Self {
        values.reverse();
        Self::from_storage_order(values)
    }

    /// Build a sequence from `values` in logical order under `config`.
    pub fn from_vec_with_config(mut values: Vec<T>, config: SequenceConfig) -> Result<Self> {
        config.validate()?;
        values.reverse();
        Ok(Self::from_storage_with(values, config))
    }

    /// Rebuild a sequence from elements already in storage order (oldest
    /// first, so the last element becomes the head). No reordering is done.
    #[must_use]
    pub fn from_storage_order(values: Vec<T>) -> Self {
        Self::from_storage_with(values, SequenceConfig::default())
    }

    fn from_storage_with(values: Vec<T>, config: SequenceConfig) -> Self {
        if values.is_empty() {
            return Self::empty_with(config);
        }
        let run = Segment::from_storage_order(values, &config);
        Self {
            spine: Segment::singleton(Entry::new(run, 0), &config),
            config,
        }
    }

    fn derive(&self, spine: Segment<Entry<T>>) -> Self {
        Self {
            spine,
            config: self.config,
        }
    }

    /// Configuration inherited by handles derived from this one.
    #[must_use]
    pub const fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Number of elements. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.outermost().map_or(0, Entry::end)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spine.is_empty()
    }

    /// Number of runs backing this handle.
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.spine.len()
    }

    /// Runs backing this handle, innermost (oldest) first.
    pub fn segments(&self) -> impl Iterator<Item = &Segment<T>> + '_ {
        self.spine.iter().map(|entry| &entry.run)
    }

    pub(crate) fn outermost(&self) -> Option<&Entry<T>> {
        self.spine.get(self.spine.len().checked_sub(1)?)
    }

    fn entry(&self, idx: usize) -> Result<&Entry<T>> {
        self.spine
            .get(idx)
            .ok_or_else(|| StrandError::internal(format!("spine slot {idx} is empty")))
    }

    /// The entry holding storage position `position`: the last one whose
    /// `suffix_len` does not exceed it.
    fn locate(&self, position: usize) -> Result<&Entry<T>> {
        let mut lo = 0;
        let mut hi = self.spine.len();
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.entry(mid)?.suffix_len <= position {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        self.entry(lo)
    }

    /// Element at logical index `index` (0 = most recent).
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        if index >= len {
            return Err(StrandError::IndexOutOfRange { index, len });
        }
        let position = len - 1 - index;
        let entry = self.locate(position)?;
        entry.run.get(position - entry.suffix_len).ok_or_else(|| {
            StrandError::internal(format!("committed slot at position {position} is empty"))
        })
    }

    /// The most recently prepended element.
    pub fn head(&self) -> Result<&T> {
        self.get(0)
    }

    /// The oldest element.
    pub fn last(&self) -> Result<&T> {
        self.get(self.len().saturating_sub(1))
    }

    /// Spine copy with the outermost entry replaced.
    fn replace_outermost(&self, entry: Entry<T>) -> Self {
        let kept = self.spine.len().saturating_sub(1);
        let entries = self.spine.iter().take(kept).cloned().chain(iter::once(entry));
        self.derive(Segment::from_storage_order(entries, &self.config))
    }

    /// Spine with `run` appended as the new outermost entry. The spine is
    /// extended in place when this handle holds its frontier.
    fn push_run(&self, run: Segment<T>) -> Self {
        let entry = Entry::new(run, self.len());
        let spine = match self.spine.try_extend(entry, &self.config) {
            Extension::InPlace(spine) | Extension::Reallocated(spine) => spine,
            Extension::Rejected(entry) => Segment::from_storage_order(
                self.spine.iter().cloned().chain(iter::once(entry)),
                &self.config,
            ),
        };
        self.derive(spine)
    }

    /// A new handle with `value` as its head. `self` is unchanged and stays
    /// independently extensible.
    pub fn prepend(&self, value: T) -> Self
    where
        T: Clone,
    {
        let Some(outer) = self.outermost() else {
            return self.push_run(Segment::singleton(value, &self.config));
        };
        let extension = outer.run.try_extend(value, &self.config);
        trace!(
            generation = outer.run.generation(),
            segments = self.spine.len(),
            outcome = extension.outcome().as_str(),
            "prepend growth guard"
        );
        match extension {
            Extension::InPlace(run) | Extension::Reallocated(run) => {
                self.replace_outermost(Entry::new(run, outer.suffix_len))
            }
            Extension::Rejected(value) => self.push_run(Segment::singleton(value, &self.config)),
        }
    }

    /// The sequence without its head. A single-element sequence yields an
    /// empty one; an empty sequence is an error.
    pub fn drop_first(&self) -> Result<Self> {
        let outer = self
            .outermost()
            .ok_or(StrandError::IndexOutOfRange { index: 0, len: 0 })?;
        if self.len() == 1 {
            return Ok(Self::empty_with(self.config));
        }
        if outer.run.len() >= 2 {
            return Ok(self.replace_outermost(Entry::new(outer.run.shrink_back(), outer.suffix_len)));
        }
        Ok(self.derive(self.spine.shrink_back()))
    }

    /// The sequence without its oldest element. A single-element sequence
    /// yields an empty one; an empty sequence is an error.
    pub fn drop_last(&self) -> Result<Self> {
        let inner = self
            .spine
            .get(0)
            .ok_or(StrandError::IndexOutOfRange { index: 0, len: 0 })?;
        if self.len() == 1 {
            return Ok(Self::empty_with(self.config));
        }
        let rebased = self.spine.iter().skip(1).map(|entry| entry.rebased(1));
        let spine = if inner.run.len() >= 2 {
            let trimmed = Entry::new(inner.run.shrink_front(), 0);
            Segment::from_storage_order(iter::once(trimmed).chain(rebased), &self.config)
        } else {
            Segment::from_storage_order(rebased, &self.config)
        };
        Ok(self.derive(spine))
    }

    /// `self` followed by `other`. Neither input changes, now or under later
    /// prepends on either of them.
    ///
    /// Runs of `self` are linked onto `other`'s spine by reference; a run no
    /// longer than the configured merge limit is instead copied onto the
    /// current outermost run when that run holds its frontier and has room.
    /// A full outermost run is never copied into a new generation here.
    pub fn concat(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let mut entries: Vec<Entry<T>> = other.spine.iter().cloned().collect();
        let mut merged_runs = 0_usize;
        for incoming in self.spine.iter() {
            let merged = if incoming.run.len() <= self.config.splice_merge_limit {
                entries
                    .last()
                    .and_then(|tail| tail.run.try_extend_from(&incoming.run))
            } else {
                None
            };

            match (merged, entries.last_mut()) {
                (Some(run), Some(tail)) => {
                    tail.run = run;
                    merged_runs += 1;
                    record_splice(true);
                }
                _ => {
                    let suffix_len = entries.last().map_or(0, Entry::end);
                    entries.push(Entry::new(incoming.run.clone(), suffix_len));
                    record_splice(false);
                }
            }
        }

        trace!(
            left_segments = self.spine.len(),
            right_segments = other.spine.len(),
            merged_runs,
            result_segments = entries.len(),
            "spliced sequences"
        );
        self.derive(Segment::from_storage_order(entries, &self.config))
    }

    /// Concatenate every handle in order. At least one handle is required.
    pub fn concat_all(handles: &[Self]) -> Result<Self>
    where
        T: Clone,
    {
        let (last, rest) = handles.split_last().ok_or_else(|| {
            StrandError::invalid_argument("concatenate requires at least one sequence")
        })?;
        Ok(rest
            .iter()
            .rev()
            .fold(last.clone(), |acc, left| left.concat(&acc)))
    }
}
