//! Folds: the traversal every derived operation is built from.

use crate::sequence::Sequence;

impl<T> Sequence<T> {
    /// Fold in storage order (logically right to left), calling
    /// `f(element, acc)` once per element.
    pub fn fold_right<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        self.iter_rev().fold(init, |acc, value| f(value, acc))
    }

    /// Fold in logical order (head first), calling `f(acc, element)` once
    /// per element.
    pub fn fold_left<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(init, f)
    }

    /// [`Self::fold_right`] seeded with the oldest element.
    pub fn reduce_right<F>(&self, mut f: F) -> Option<T>
    where
        T: Clone,
        F: FnMut(&T, T) -> T,
    {
        let mut cursor = self.iter_rev();
        let seed = cursor.next()?.clone();
        Some(cursor.fold(seed, |acc, value| f(value, acc)))
    }

    /// [`Self::fold_left`] seeded with the head.
    pub fn reduce_left<F>(&self, mut f: F) -> Option<T>
    where
        T: Clone,
        F: FnMut(T, &T) -> T,
    {
        let mut cursor = self.iter();
        let seed = cursor.next()?.clone();
        Some(cursor.fold(seed, |acc, value| f(acc, value)))
    }

    /// A new handle with the logical order reversed.
    #[must_use]
    pub fn reverse(&self) -> Self
    where
        T: Clone,
    {
        self.fold_left(Self::empty_with(self.config), |acc, value| acc.prepend(value.clone()))
    }

    /// Elements in logical order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().cloned());
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;

    #[test]
    fn fold_right_sees_elements_oldest_first() {
        let seq = Sequence::from_vec(vec![1, 2, 3]);
        let order = seq.fold_right(Vec::new(), |value, mut acc| {
            acc.push(*value);
            acc
        });
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn fold_left_sees_elements_head_first() {
        let seq = Sequence::from_vec(vec![1, 2, 3]);
        let rendered = seq.fold_left(String::new(), |acc, value| format!("{acc}{value}"));
        assert_eq!(rendered, "123");
    }

    #[test]
    fn fold_right_rebuilds_the_same_sequence() {
        let seq = Sequence::from_vec(vec![1, 2, 3, 4]);
        let rebuilt = seq.fold_right(Sequence::new(), |value, acc| acc.prepend(*value));
        assert_eq!(rebuilt.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn reductions_need_an_element() {
        let empty = Sequence::<i32>::new();
        assert_eq!(empty.reduce_left(|acc, value| acc - value), None);
        assert_eq!(empty.reduce_right(|value, acc| value - acc), None);

        let seq = Sequence::from_vec(vec![10, 3, 2]);
        assert_eq!(seq.reduce_left(|acc, value| acc - value), Some(5));
        // 10 - (3 - 2)
        assert_eq!(seq.reduce_right(|value, acc| value - acc), Some(9));
    }

    #[test]
    fn reverse_keeps_the_original() {
        let seq = Sequence::from_vec(vec![1, 2, 3]);
        let reversed = seq.reverse();
        assert_eq!(reversed.to_vec(), vec![3, 2, 1]);
        assert_eq!(seq.to_vec(), vec![1, 2, 3]);
        assert_eq!(reversed.config(), seq.config());
    }
}
