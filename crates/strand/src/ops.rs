//! Free-function forms of the sequence operations.
//!
//! These are thin aliases over the [`Sequence`] methods for callers that
//! prefer list-library naming (`cons`, `tail`, `init`, `null`).

use strand_core::{Result, Sequence};

/// `x` in front of `seq`.
pub fn prepend<T: Clone>(x: T, seq: &Sequence<T>) -> Sequence<T> {
    seq.prepend(x)
}

/// Alias for [`prepend`].
pub fn cons<T: Clone>(x: T, seq: &Sequence<T>) -> Sequence<T> {
    prepend(x, seq)
}

pub fn head<T>(seq: &Sequence<T>) -> Result<&T> {
    seq.head()
}

pub fn last<T>(seq: &Sequence<T>) -> Result<&T> {
    seq.last()
}

pub fn drop_first<T>(seq: &Sequence<T>) -> Result<Sequence<T>> {
    seq.drop_first()
}

/// Alias for [`drop_first`].
pub fn tail<T>(seq: &Sequence<T>) -> Result<Sequence<T>> {
    drop_first(seq)
}

pub fn drop_last<T>(seq: &Sequence<T>) -> Result<Sequence<T>> {
    seq.drop_last()
}

/// Alias for [`drop_last`].
pub fn init<T>(seq: &Sequence<T>) -> Result<Sequence<T>> {
    drop_last(seq)
}

pub fn length<T>(seq: &Sequence<T>) -> usize {
    seq.len()
}

/// Alias for [`length`].
pub fn len<T>(seq: &Sequence<T>) -> usize {
    length(seq)
}

pub fn get<T>(seq: &Sequence<T>, index: usize) -> Result<&T> {
    seq.get(index)
}

pub fn is_empty<T>(seq: &Sequence<T>) -> bool {
    seq.is_empty()
}

/// Alias for [`is_empty`].
pub fn null<T>(seq: &Sequence<T>) -> bool {
    is_empty(seq)
}

/// Concatenate `seqs` in order. Fails on an empty slice.
pub fn concatenate<T: Clone>(seqs: &[Sequence<T>]) -> Result<Sequence<T>> {
    Sequence::concat_all(seqs)
}

pub fn fold_left<T, A>(init: A, seq: &Sequence<T>, f: impl FnMut(A, &T) -> A) -> A {
    seq.fold_left(init, f)
}

pub fn fold_right<T, A>(init: A, seq: &Sequence<T>, f: impl FnMut(&T, A) -> A) -> A {
    seq.fold_right(init, f)
}

pub fn reverse<T: Clone>(seq: &Sequence<T>) -> Sequence<T> {
    seq.reverse()
}

#[cfg(test)]
mod tests {
    use super::{concatenate, cons, fold_left, fold_right, head, init, null, tail};
    use crate::seq;

    #[test]
    fn aliases_delegate_to_methods() {
        let xs = seq![2, 3];
        let ys = cons(1, &xs);
        assert_eq!(head(&ys), Ok(&1));
        assert_eq!(tail(&ys).expect("non-empty"), xs);
        assert_eq!(init(&ys).expect("non-empty"), seq![1, 2]);
        assert!(null(&tail(&seq![1]).expect("non-empty")));
    }

    #[test]
    fn folds_take_the_accumulator_first() {
        let xs = seq![1, 2, 3];
        assert_eq!(fold_left(0, &xs, |acc, x| acc * 10 + x), 123);
        assert_eq!(fold_right(0, &xs, |x, acc| acc * 10 + x), 321);
    }

    #[test]
    fn concatenate_needs_operands() {
        assert!(concatenate::<i32>(&[]).is_err());
        let joined = concatenate(&[seq![1], seq![2, 3]]).expect("operands");
        assert_eq!(joined, seq![1, 2, 3]);
    }
}
