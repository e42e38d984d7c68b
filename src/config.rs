//! Tuning knobs for the Strassen multiplier.

/// Blocks at least this wide compute their seven products on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// What to do when a block above the 2x2 base case has an odd dimension.
///
/// The chosen policy applies at every recursion level, not only the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OddDimensionPolicy {
    /// Fail with [`MatrixError::OddDimension`](crate::MatrixError::OddDimension).
    #[default]
    Reject,
    /// Multiply the odd block with the classical cubic product.
    Schoolbook,
    /// Pad both operands to the next power of two with `diag(A, I)` before
    /// recursing, then crop the result.
    Pad,
}

/// Options for [`multiply_with`](crate::strassen::multiply_with) and
/// [`power_with`](crate::power::power_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyConfig {
    /// Minimum block dimension for parallel product evaluation.
    pub parallel_threshold: usize,
    pub odd_policy: OddDimensionPolicy,
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            odd_policy: OddDimensionPolicy::Reject,
        }
    }
}

impl MultiplyConfig {
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_odd_policy(mut self, policy: OddDimensionPolicy) -> Self {
        self.odd_policy = policy;
        self
    }

    /// Normalize options, replacing a zero threshold with the default.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.parallel_threshold == 0 {
            self.parallel_threshold = DEFAULT_PARALLEL_THRESHOLD;
        }
        self
    }

    /// Whether a block of dimension `n` fans its products out in parallel.
    pub(crate) fn is_parallel(&self, n: usize) -> bool {
        n >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MultiplyConfig::default();
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.odd_policy, OddDimensionPolicy::Reject);
    }

    #[test]
    fn normalize_zero_threshold() {
        let config = MultiplyConfig::default().with_parallel_threshold(0).normalize();
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn builder_sets_fields() {
        let config = MultiplyConfig::default()
            .with_parallel_threshold(8)
            .with_odd_policy(OddDimensionPolicy::Pad);
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.odd_policy, OddDimensionPolicy::Pad);
        assert!(config.is_parallel(8));
        assert!(!config.is_parallel(4));
    }
}
