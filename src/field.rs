//! Accumulation of quadrature point samples into per-cell display values.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{AggregationError, DegenerateCell, LayoutError};
use crate::reducer::von_mises;
use crate::tensor::TensorSample;

/// How quad cells map onto solver samples and display slots.
///
/// The solver evaluates every quad at four quadrature points and the display splits every
/// quad into two triangles, which is what [`QuadLayout::default`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadLayout {
    /// Quadrature samples the solver reports for each cell.
    pub samples_per_cell: usize,
    /// Display elements each cell is split into.
    pub display_slots_per_cell: usize,
}

impl Default for QuadLayout {
    fn default() -> Self {
        Self {
            samples_per_cell: 4,
            display_slots_per_cell: 2,
        }
    }
}

impl QuadLayout {
    /// Upper bound accepted for either per-cell count.
    pub const MAX_PER_CELL: usize = 256;

    /// Check that the layout can describe at least one cell.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when either count is zero or above
    /// [`QuadLayout::MAX_PER_CELL`].
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.samples_per_cell == 0 {
            return Err(LayoutError::NoSamplesPerCell);
        }
        if self.display_slots_per_cell == 0 {
            return Err(LayoutError::NoDisplaySlotsPerCell);
        }
        if self.samples_per_cell > Self::MAX_PER_CELL {
            return Err(LayoutError::TooManySamplesPerCell(self.samples_per_cell));
        }
        if self.display_slots_per_cell > Self::MAX_PER_CELL {
            return Err(LayoutError::TooManyDisplaySlotsPerCell(
                self.display_slots_per_cell,
            ));
        }
        Ok(())
    }

    /// Number of cells described by `samples`, when it divides evenly.
    fn cell_count(&self, samples: usize) -> Option<usize> {
        (samples % self.samples_per_cell == 0).then(|| samples / self.samples_per_cell)
    }
}

/// Scalar values handed to the host colour map, one run of slots per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayBuffer {
    /// Flat slot values in cell-major order.
    values: Vec<f64>,
    /// Slots owned by every cell.
    slots_per_cell: usize,
}

impl DisplayBuffer {
    /// Create a zeroed buffer of `len` slots.
    fn zeroed(len: usize, slots_per_cell: usize) -> Self {
        Self {
            values: vec![0.0; len],
            slots_per_cell,
        }
    }

    /// Wrap existing slot values, e.g. decoded host cell data.
    pub(crate) fn from_values(values: Vec<f64>, slots_per_cell: usize) -> Self {
        Self {
            values,
            slots_per_cell,
        }
    }

    /// Number of slots in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the buffer holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of cells represented by the buffer.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.values.len() / self.slots_per_cell
    }

    /// Slots owned by every cell.
    #[must_use]
    pub fn slots_per_cell(&self) -> usize {
        self.slots_per_cell
    }

    /// Slot values of one cell, or `None` past the end of the buffer.
    #[must_use]
    pub fn cell(&self, cell: usize) -> Option<&[f64]> {
        let start = cell.checked_mul(self.slots_per_cell)?;
        let end = start.checked_add(self.slots_per_cell)?;
        self.values.get(start..end)
    }

    /// Largest finite slot value, ignoring degenerate cells.
    #[must_use]
    pub fn peak(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .reduce(f64::max)
    }

    /// Flat view of all slots.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Give up the buffer and return the flat slot values.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for DisplayBuffer {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Display buffer together with the degenerate cells encountered while filling it.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregation {
    /// Accumulated display values.
    pub buffer: DisplayBuffer,
    /// Cells whose volume could not normalise their samples.
    pub degenerate_cells: Vec<DegenerateCell>,
}

/// Reduces quadrature point stress samples to one averaged value per display slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldAggregator {
    /// Cell layout shared by the solver output and the display.
    layout: QuadLayout,
}

impl FieldAggregator {
    /// Create an aggregator for four-sample quads split into two triangles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator for a custom layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the layout has a zero or oversized count.
    pub fn with_layout(layout: QuadLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self { layout })
    }

    /// Layout used by this aggregator.
    #[must_use]
    pub fn layout(&self) -> QuadLayout {
        self.layout
    }

    /// Reduce `samples` to a display buffer.
    ///
    /// Samples are cell-major: sample `i` belongs to cell `i / samples_per_cell`. Each sample
    /// contributes `von_mises(sample) / (volume * samples_per_cell)` to every display slot of
    /// its cell, so a cell's slots end up holding the volume-normalised mean of its samples.
    /// Degenerate volumes are not masked; see [`FieldAggregator::aggregate_with_warnings`].
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InputShape`] when `samples` does not hold exactly
    /// `samples_per_cell` samples for every entry of `volumes`, and
    /// [`AggregationError::DisplayTooLarge`] when the buffer length overflows.
    ///
    /// # Examples
    /// ```
    /// use stressmap::{sample, FieldAggregator};
    ///
    /// let samples = vec![sample(1.0, 1.0, 0.0); 4];
    /// let buffer = FieldAggregator::new().aggregate(&samples, &[1.0]).expect("one cell");
    /// assert_eq!(buffer.as_slice(), &[1.0, 1.0]);
    /// ```
    pub fn aggregate(
        &self,
        samples: &[TensorSample],
        volumes: &[f64],
    ) -> Result<DisplayBuffer, AggregationError> {
        self.aggregate_with_warnings(samples, volumes)
            .map(|aggregation| aggregation.buffer)
    }

    /// Reduce `samples` and report every cell with a zero, negative or non-finite volume.
    ///
    /// The values of degenerate cells are still computed by plain division, so they surface as
    /// infinities, NaNs or negative values in the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InputShape`] under the same conditions as
    /// [`FieldAggregator::aggregate`], and [`AggregationError::DisplayTooLarge`] when the
    /// display buffer length does not fit in `usize`.
    pub fn aggregate_with_warnings(
        &self,
        samples: &[TensorSample],
        volumes: &[f64],
    ) -> Result<Aggregation, AggregationError> {
        let samples_per_cell = self.layout.samples_per_cell;
        let slots_per_cell = self.layout.display_slots_per_cell;
        let cells = self
            .layout
            .cell_count(samples.len())
            .filter(|&cells| cells == volumes.len())
            .ok_or(AggregationError::InputShape {
                samples: samples.len(),
                volumes: volumes.len(),
                samples_per_cell,
            })?;

        let degenerate_cells: Vec<DegenerateCell> = volumes
            .iter()
            .enumerate()
            .filter_map(|(cell, &volume)| DegenerateCell::check(cell, volume))
            .collect();
        for warning in &degenerate_cells {
            warn!("{warning}; its display values are not physical");
        }

        let len = cells
            .checked_mul(slots_per_cell)
            .ok_or(AggregationError::DisplayTooLarge {
                cells,
                slots_per_cell,
            })?;
        // Every slot index below is bounded by `len`.
        let mut buffer = DisplayBuffer::zeroed(len, slots_per_cell);
        let weight = samples_per_cell as f64;
        for (index, sample) in samples.iter().enumerate() {
            let cell = index / samples_per_cell;
            let value = von_mises(*sample) / (volumes[cell] * weight);
            let first_slot = cell * slots_per_cell;
            for slot in &mut buffer.values[first_slot..first_slot + slots_per_cell] {
                *slot += value;
            }
        }

        debug!(
            "aggregated {} samples into {} cells ({} degenerate)",
            samples.len(),
            cells,
            degenerate_cells.len()
        );
        Ok(Aggregation {
            buffer,
            degenerate_cells,
        })
    }
}
