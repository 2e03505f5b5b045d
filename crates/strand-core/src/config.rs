//! Buffer sizing and splice tuning.

use serde::{Deserialize, Serialize};
use strand_error::{Result, StrandError};

/// Smallest backing array allocated for a new generation.
pub const DEFAULT_MIN_CAPACITY: usize = 8;
/// Largest accepted `min_capacity`. Every new generation allocates at least
/// this many slots, so larger values are rejected by validation.
pub const MAX_MIN_CAPACITY: usize = 1 << 24;
/// Longest run the splice engine copies onto a claimant's frontier instead of
/// linking it by reference.
pub const DEFAULT_SPLICE_MERGE_LIMIT: usize = 64;

/// Per-handle storage configuration.
///
/// Handles derived from another handle (prepend, drop, concatenate) inherit
/// the configuration of the handle the operation was invoked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Minimum slot count of any backing array generation.
    pub min_capacity: usize,
    /// Maximum run length merged into the neighbouring segment during splice.
    /// Zero disables boundary merging entirely.
    pub splice_merge_limit: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            min_capacity: DEFAULT_MIN_CAPACITY,
            splice_merge_limit: DEFAULT_SPLICE_MERGE_LIMIT,
        }
    }
}

impl SequenceConfig {
    /// Reject configurations that cannot back a generation.
    pub fn validate(&self) -> Result<()> {
        if self.min_capacity == 0 {
            tracing::warn!(
                min_capacity = self.min_capacity,
                "rejected sequence config"
            );
            return Err(StrandError::invalid_argument(
                "min_capacity must be at least 1",
            ));
        }
        if self.min_capacity > MAX_MIN_CAPACITY {
            tracing::warn!(
                min_capacity = self.min_capacity,
                max = MAX_MIN_CAPACITY,
                "rejected sequence config"
            );
            return Err(StrandError::invalid_argument(format!(
                "min_capacity {} exceeds the maximum of {MAX_MIN_CAPACITY}",
                self.min_capacity
            )));
        }
        Ok(())
    }

    /// Capacity for a generation that must hold at least `needed` slots.
    #[must_use]
    pub fn capacity_for(&self, needed: usize) -> usize {
        needed
            .checked_next_power_of_two()
            .unwrap_or(needed)
            .max(self.min_capacity)
    }

    /// Capacity for a generation replacing an exhausted one that now needs
    /// `needed` slots. Doubles so repeated growth stays amortized O(1).
    #[must_use]
    pub fn growth_capacity(&self, needed: usize) -> usize {
        self.capacity_for(needed.saturating_mul(2))
    }
}
