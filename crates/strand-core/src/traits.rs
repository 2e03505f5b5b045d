//! Standard trait implementations: rendering, equality, collection and serde.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::sequence::Sequence;

/// Renders `[e0, e1, ..., en-1]` in logical order.
impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, value) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Serialize> Serialize for Sequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sequence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_vec)
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;

    #[test]
    fn display_is_comma_space_separated() {
        assert_eq!(Sequence::from_vec(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(Sequence::<i32>::new().to_string(), "[]");
        assert_eq!(Sequence::from_vec(vec!["a"]).to_string(), "[a]");
    }

    #[test]
    fn debug_matches_list_form() {
        let seq = Sequence::from_vec(vec![1, 2]).prepend(0);
        assert_eq!(format!("{seq:?}"), "[0, 1, 2]");
    }

    #[test]
    fn equality_ignores_segment_layout() {
        let flat = Sequence::from_vec(vec![1, 2, 3]);
        let base = Sequence::from_vec(vec![2, 3]);
        let _sibling = base.prepend(0);
        let forked = base.prepend(1);
        assert_eq!(forked.segment_count(), 2);
        assert_eq!(flat, forked);
        assert_ne!(flat, base);
    }

    #[test]
    fn collects_from_iterators() {
        let seq: Sequence<i32> = (1..=4).collect();
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(Sequence::from(vec![5]).to_vec(), vec![5]);
    }

    #[test]
    fn serde_uses_logical_order() {
        let seq = Sequence::from_vec(vec![3, 4]).prepend(2).prepend(1);
        let json = serde_json::to_string(&seq).expect("serialize");
        assert_eq!(json, "[1,2,3,4]");
        let back: Sequence<i32> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, seq);
    }
}
