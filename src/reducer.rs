//! Scalar reduction of plane stress samples.

use crate::tensor::TensorSample;

/// Compute the plane stress von Mises equivalent of a sample.
///
/// Evaluates `sqrt(sxx² + syy² − sxx·syy + 3·txy²)`. The invariant is non-negative for any real
/// sample, but round-off can push it a hair below zero, so it is floored at zero before the
/// square root. The function is total: every real input yields a finite, non-negative value
/// unless the input itself overflows.
///
/// See <https://en.wikipedia.org/wiki/Von_Mises_yield_criterion>.
///
/// # Examples
/// ```
/// use stressmap::{sample, von_mises};
///
/// assert_eq!(von_mises(sample(5.0, 0.0, 0.0)), 5.0);
/// assert_eq!(von_mises(sample(0.0, 0.0, 0.0)), 0.0);
/// ```
#[must_use]
pub fn von_mises(sample: TensorSample) -> f64 {
    let TensorSample { xx, yy, xy } = sample;
    let invariant = xx * xx + yy * yy - xx * yy + 3.0 * xy * xy;
    invariant.max(0.0).sqrt()
}
