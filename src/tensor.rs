//! Plane stress samples stored in Voigt order.

use nalgebra::{Matrix2, Vector3};
use serde::{Deserialize, Serialize};

/// Two dimensional stress (or strain) state at one quadrature point.
///
/// Components follow the Voigt ordering used by the host solver: the two normal components
/// first and the shear component last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct TensorSample {
    /// Normal component along the local X axis.
    pub xx: f64,
    /// Normal component along the local Y axis.
    pub yy: f64,
    /// Shear component in the XY plane.
    pub xy: f64,
}

impl TensorSample {
    /// Create a [`TensorSample`] with explicit components.
    #[must_use]
    pub const fn new(xx: f64, yy: f64, xy: f64) -> Self {
        Self { xx, yy, xy }
    }

    /// Build a sample from a 2x2 tensor.
    ///
    /// The off-diagonal terms are averaged, so a slightly asymmetric matrix produced by
    /// round-off still maps onto a single shear component.
    #[must_use]
    pub fn from_matrix(matrix: &Matrix2<f64>) -> Self {
        Self::new(
            matrix[(0, 0)],
            matrix[(1, 1)],
            0.5 * (matrix[(0, 1)] + matrix[(1, 0)]),
        )
    }

    /// Expand the sample into the full symmetric 2x2 tensor.
    #[must_use]
    pub fn to_matrix(self) -> Matrix2<f64> {
        Matrix2::new(self.xx, self.xy, self.xy, self.yy)
    }

    /// Convert the sample into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.xx, self.yy, self.xy)
    }

    /// Von Mises equivalent of this sample, see [`von_mises`](crate::von_mises).
    #[must_use]
    pub fn von_mises(self) -> f64 {
        crate::reducer::von_mises(self)
    }
}

impl From<[f64; 3]> for TensorSample {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<TensorSample> for [f64; 3] {
    fn from(value: TensorSample) -> Self {
        [value.xx, value.yy, value.xy]
    }
}

impl From<Vector3<f64>> for TensorSample {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<TensorSample> for Vector3<f64> {
    fn from(value: TensorSample) -> Self {
        value.to_vector()
    }
}

impl From<Matrix2<f64>> for TensorSample {
    fn from(value: Matrix2<f64>) -> Self {
        Self::from_matrix(&value)
    }
}

/// Convenience helper for creating [`TensorSample`] instances.
///
/// # Examples
/// ```
/// use stressmap::sample;
///
/// let shear = sample(0.0, 0.0, 2.5);
/// assert_eq!(shear.xy, 2.5);
/// ```
#[must_use]
pub const fn sample(xx: f64, yy: f64, xy: f64) -> TensorSample {
    TensorSample::new(xx, yy, xy)
}
