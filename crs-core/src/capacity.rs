//! Row growth policy
//!
//! Pure arithmetic deciding how much room a row gets when an insertion
//! overflows it. Applying the decision is up to the owning matrix.

/// Geometric growth applied when a row overflows its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "usize", into = "usize")
)]
pub struct GrowthPolicy {
    factor: usize,
}

impl GrowthPolicy {
    /// Default multiplier applied to the required row size
    pub const DEFAULT_FACTOR: usize = 2;

    /// Create a policy with the given multiplier, clamped to at least 1
    pub const fn new(factor: usize) -> Self {
        Self {
            factor: if factor == 0 { 1 } else { factor },
        }
    }

    /// The multiplier applied to the required row size
    pub const fn factor(&self) -> usize {
        self.factor
    }

    /// Capacity to give a row that must hold `required` entries
    ///
    /// The result is `factor * required`, capped at `num_columns` since a
    /// row never holds more distinct columns than the matrix has, and never
    /// below `required`.
    pub const fn grown_capacity(&self, required: usize, num_columns: usize) -> usize {
        let grown = required.saturating_mul(self.factor);
        let capped = if grown < num_columns { grown } else { num_columns };
        if capped > required {
            capped
        } else {
            required
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FACTOR)
    }
}

impl From<usize> for GrowthPolicy {
    fn from(factor: usize) -> Self {
        Self::new(factor)
    }
}

impl From<GrowthPolicy> for usize {
    fn from(policy: GrowthPolicy) -> Self {
        policy.factor
    }
}
