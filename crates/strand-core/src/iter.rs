//! Lazy cursors over a sequence handle.

use std::iter::{FusedIterator, Rev};

use crate::segment::Segment;
use crate::sequence::{Entry, Sequence};

/// Logical-order cursor (head first). Iterating from the back walks storage
/// order instead.
///
/// Each call to [`Sequence::iter`] yields an independent cursor; it never
/// observes elements added to other handles afterward.
pub struct Iter<'a, T> {
    spine: &'a Segment<Entry<T>>,
    // Front cursor: the current run is `spine[front_entry - 1]`, with
    // `front_pos` elements of it still to yield, newest first.
    front_entry: usize,
    front_pos: usize,
    // Back cursor: next storage position `back_pos` within `spine[back_entry]`.
    back_entry: usize,
    back_pos: usize,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(seq: &'a Sequence<T>) -> Self {
        Self {
            spine: &seq.spine,
            front_entry: seq.spine.len(),
            front_pos: seq.outermost().map_or(0, |entry| entry.run.len()),
            back_entry: 0,
            back_pos: 0,
            remaining: seq.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        while self.front_pos == 0 {
            self.front_entry = self.front_entry.checked_sub(1)?;
            self.front_pos = self.spine.get(self.front_entry.checked_sub(1)?)?.run.len();
        }
        self.front_pos -= 1;
        self.remaining -= 1;
        self.spine
            .get(self.front_entry.checked_sub(1)?)?
            .run
            .get(self.front_pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let entry = self.spine.get(self.back_entry)?;
            if self.back_pos < entry.run.len() {
                let item = entry.run.get(self.back_pos);
                self.back_pos += 1;
                self.remaining -= 1;
                return item;
            }
            self.back_entry += 1;
            self.back_pos = 0;
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Sequence<T> {
    /// Cursor in logical order, head first.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Cursor in storage order, oldest element first.
    #[must_use]
    pub fn iter_rev(&self) -> Rev<Iter<'_, T>> {
        self.iter().rev()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
