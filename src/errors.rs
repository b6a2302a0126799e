//! Error and warning types produced while reducing stress samples to cell data.

use thiserror::Error;

/// Error returned when the sample and volume sequences do not describe the same mesh.
///
/// Every cell contributes exactly `samples_per_cell` samples and one volume. A mismatch means
/// the host wired the pipeline incorrectly, so the aggregation is aborted instead of padded or
/// truncated.
///
/// # Examples
///
/// ```
/// use stressmap::{sample, AggregationError, FieldAggregator};
///
/// let samples = vec![sample(1.0, 0.0, 0.0); 7];
/// let error = FieldAggregator::new()
///     .aggregate(&samples, &[1.0, 1.0])
///     .expect_err("seven samples cannot fill two cells");
/// assert!(matches!(error, AggregationError::InputShape { samples: 7, volumes: 2, .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// Returned when the number of samples does not match the number of volumes.
    #[error(
        "{samples} samples cannot be split into {volumes} cells of {samples_per_cell} samples each"
    )]
    InputShape {
        /// Number of tensor samples supplied.
        samples: usize,
        /// Number of cell volumes supplied.
        volumes: usize,
        /// Samples the layout expects per cell.
        samples_per_cell: usize,
    },
    /// Returned when the display buffer length does not fit in `usize`.
    #[error("{cells} cells of {slots_per_cell} display slots overflow the display buffer")]
    DisplayTooLarge {
        /// Number of cells in the step.
        cells: usize,
        /// Display slots the layout expects per cell.
        slots_per_cell: usize,
    },
}

/// Error returned when a [`QuadLayout`](crate::QuadLayout) cannot describe any mesh.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Returned when a cell is declared to carry no quadrature samples.
    #[error("a cell must carry at least one sample")]
    NoSamplesPerCell,
    /// Returned when a cell is declared to map onto no display slots.
    #[error("a cell must map to at least one display slot")]
    NoDisplaySlotsPerCell,
    /// Returned when a cell is declared to carry more samples than supported.
    #[error("{0} samples per cell exceeds the supported maximum")]
    TooManySamplesPerCell(usize),
    /// Returned when a cell is declared to map onto more display slots than supported.
    #[error("{0} display slots per cell exceeds the supported maximum")]
    TooManyDisplaySlotsPerCell(usize),
}

/// Error returned when host cell data text cannot be decoded.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CellDataError {
    /// Returned when a token is not a decimal number.
    #[error("token {index} ({token:?}) is not a number")]
    InvalidToken {
        /// Zero-based position of the token.
        index: usize,
        /// Offending text.
        token: String,
    },
    /// Returned when the value count does not fill whole cells.
    #[error("{values} values cannot be split into cells of {slots_per_cell} slots")]
    PartialCell {
        /// Number of values decoded.
        values: usize,
        /// Display slots per cell expected by the layout.
        slots_per_cell: usize,
    },
}

/// Warning attached to a step when a cell volume cannot normalise its samples.
///
/// Zero, negative or non-finite volumes are degenerate cells. The aggregator still divides by
/// them and lets the resulting non-finite or negative value through; the warning only tells
/// the caller which slots are affected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("cell {cell} has degenerate volume {volume}")]
pub struct DegenerateCell {
    /// Index of the cell in the volume table.
    pub cell: usize,
    /// Volume the host reported for the cell.
    pub volume: f64,
}

impl DegenerateCell {
    /// Inspect a single volume and return a warning when it is degenerate.
    #[must_use]
    pub fn check(cell: usize, volume: f64) -> Option<Self> {
        if volume.is_finite() && volume > 0.0 {
            None
        } else {
            Some(Self { cell, volume })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_volume_is_not_degenerate() {
        assert_eq!(DegenerateCell::check(3, 0.25), None);
    }

    #[test]
    fn zero_negative_and_nan_volumes_are_degenerate() {
        for volume in [0.0, -1.0, f64::INFINITY] {
            let warning = DegenerateCell::check(2, volume).expect("degenerate volume flagged");
            assert_eq!(warning.cell, 2);
            assert_eq!(warning.volume, volume);
        }
        let nan = DegenerateCell::check(0, f64::NAN).expect("nan volume flagged");
        assert!(nan.volume.is_nan());
    }

    #[test]
    fn shape_error_names_both_lengths() {
        let error = AggregationError::InputShape {
            samples: 7,
            volumes: 2,
            samples_per_cell: 4,
        };
        assert_eq!(
            error.to_string(),
            "7 samples cannot be split into 2 cells of 4 samples each"
        );
    }

    #[test]
    fn oversized_display_names_cells_and_slots() {
        let error = AggregationError::DisplayTooLarge {
            cells: 3,
            slots_per_cell: usize::MAX,
        };
        assert!(error.to_string().starts_with("3 cells of "));
    }
}
