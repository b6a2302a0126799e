//! Boundary between the simulation host and the stress reduction.
//!
//! The host owns the solver output, the cell volumes and the colour-mapped display node. It
//! exposes the first two through [`StressSource`] and accepts results through
//! [`CellDataSink`]. [`ColorMapController`] is called once at the end of every animation step
//! and wires the two together.

use std::fmt::Write;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{AggregationError, CellDataError, DegenerateCell};
use crate::field::{DisplayBuffer, FieldAggregator};
use crate::tensor::TensorSample;

/// Host object that exposes the solver output for the current step.
pub trait StressSource {
    /// Quadrature point samples in cell-major order.
    fn samples(&self) -> &[TensorSample];

    /// One volume per cell, in the same cell order as [`StressSource::samples`].
    fn volumes(&self) -> &[f64];
}

/// Host object that displays one scalar per display slot.
pub trait CellDataSink {
    /// Replace the displayed cell data with `values`.
    fn write_cell_data(&mut self, values: &DisplayBuffer);
}

/// One step of solver output in a serialisable form.
///
/// # Examples
/// ```
/// use stressmap::{sample, StepInput};
///
/// let step: StepInput = serde_json::from_str(
///     r#"{ "samples": [[1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
///          "volumes": [1.0] }"#,
/// )
/// .expect("valid step");
/// assert_eq!(step.samples[0], sample(1.0, 1.0, 0.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    /// Quadrature point samples in cell-major order.
    pub samples: Vec<TensorSample>,
    /// One volume per cell.
    pub volumes: Vec<f64>,
}

impl StressSource for StepInput {
    fn samples(&self) -> &[TensorSample] {
        &self.samples
    }

    fn volumes(&self) -> &[f64] {
        &self.volumes
    }
}

/// Host display field that stores the encoded text the colour map reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextCellData {
    /// Space separated values, see [`encode_cell_data`].
    pub value: String,
}

impl CellDataSink for TextCellData {
    fn write_cell_data(&mut self, values: &DisplayBuffer) {
        self.value = encode_cell_data(values);
    }
}

/// Summary of one controller step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Zero-based index of the step since the controller was created.
    pub step: u64,
    /// Number of cells written to the display.
    pub cells: usize,
    /// Largest finite display value, if any.
    pub peak: Option<f64>,
    /// Cells whose values are not finite because of their volume.
    pub degenerate_cells: Vec<DegenerateCell>,
}

/// Per-step controller that keeps a display node in sync with the solver stresses.
#[derive(Clone, Debug, Default)]
pub struct ColorMapController {
    /// Reduction applied to every step.
    aggregator: FieldAggregator,
    /// Steps completed so far.
    steps: u64,
}

impl ColorMapController {
    /// Create a controller around `aggregator`.
    #[must_use]
    pub fn new(aggregator: FieldAggregator) -> Self {
        Self {
            aggregator,
            steps: 0,
        }
    }

    /// Number of steps written to a sink so far.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Reduce the stresses of the step that just ended and push them to `sink`.
    ///
    /// The sink is left untouched when the step fails.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InputShape`] when the source does not hold a whole number
    /// of cells, or [`AggregationError::DisplayTooLarge`] when the cell data cannot be sized.
    /// The step is not retried; the next call handles the next step.
    pub fn on_end_animation_step<S, D>(
        &mut self,
        source: &S,
        sink: &mut D,
    ) -> Result<StepReport, AggregationError>
    where
        S: StressSource + ?Sized,
        D: CellDataSink + ?Sized,
    {
        let aggregation = self
            .aggregator
            .aggregate_with_warnings(source.samples(), source.volumes())
            .map_err(|error| {
                warn!("step {} skipped: {error}", self.steps);
                error
            })?;
        sink.write_cell_data(&aggregation.buffer);

        let report = StepReport {
            step: self.steps,
            cells: aggregation.buffer.cell_count(),
            peak: aggregation.buffer.peak(),
            degenerate_cells: aggregation.degenerate_cells,
        };
        info!(
            "step {}: {} cells, peak {:?}",
            report.step, report.cells, report.peak
        );
        self.steps += 1;
        Ok(report)
    }
}

/// Encode display values as the space separated text the host colour map reads.
///
/// # Examples
/// ```
/// use stressmap::{encode_cell_data, sample, FieldAggregator};
///
/// let samples = vec![sample(1.0, 1.0, 0.0); 4];
/// let buffer = FieldAggregator::new().aggregate(&samples, &[2.0]).expect("one cell");
/// assert_eq!(encode_cell_data(&buffer), "0.5 0.5");
/// ```
#[must_use]
pub fn encode_cell_data(values: &DisplayBuffer) -> String {
    let mut output = String::new();
    for (index, value) in values.as_slice().iter().enumerate() {
        if index > 0 {
            output.push(' ');
        }
        write!(&mut output, "{value}").expect("writing to string cannot fail");
    }
    output
}

/// Parse host cell data text back into a display buffer.
///
/// Tokens may be separated by any whitespace.
///
/// # Errors
///
/// Returns [`CellDataError::InvalidToken`] for text that is not a number and
/// [`CellDataError::PartialCell`] when the values do not fill whole cells of
/// `slots_per_cell` slots.
pub fn decode_cell_data(text: &str, slots_per_cell: usize) -> Result<DisplayBuffer, CellDataError> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse::<f64>().map_err(|_| CellDataError::InvalidToken {
                index,
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;
    if slots_per_cell == 0 || values.len() % slots_per_cell != 0 {
        return Err(CellDataError::PartialCell {
            values: values.len(),
            slots_per_cell,
        });
    }
    Ok(DisplayBuffer::from_values(values, slots_per_cell))
}
