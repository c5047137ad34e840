//! Algorithm configuration for the recursive multiply and inverse paths.

use crate::matrix::pad::PadFill;

/// Default Strassen base-case cutover.
///
/// Below this size the seven-product recursion costs more in temporaries
/// than it saves in multiplications, so the naive kernel takes over.
pub const DEFAULT_THRESHOLD: usize = 64;

/// Knobs for [`multiply_with`](crate::multiply_with) and
/// [`invert_with`](crate::invert_with).
///
/// ```
/// use strassen::{Config, PadFill};
///
/// let config = Config::default()
///     .with_threshold(16)
///     .with_pad_fill(PadFill::Identity { off_diagonal: 0.0 });
/// assert_eq!(config.threshold, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Matrices of this size or smaller are multiplied naively.
    pub threshold: usize,
    /// Fill used for the padding cells when `invert` embeds a matrix
    /// into the next power of two.
    pub pad_fill: PadFill,
    /// 1×1 blocks with magnitude at or below this are treated as singular.
    /// Negative values act as `0.0`. Cancellation noise is reported as
    /// `NumericalInstability` regardless of this setting.
    pub singular_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            pad_fill: PadFill::Identity { off_diagonal: 0.0 },
            singular_tolerance: 0.0,
        }
    }
}

impl Config {
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_pad_fill(mut self, pad_fill: PadFill) -> Self {
        self.pad_fill = pad_fill;
        self
    }

    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    /// Threshold clamped so a 1×1 block always hits the base case.
    pub(crate) fn effective_threshold(&self) -> usize {
        self.threshold.max(1)
    }
}
