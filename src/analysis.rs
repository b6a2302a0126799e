use std::error::Error;

use stressmap::{
    ColorMapController, FieldAggregator, QuadLayout, StepInput, StepReport, TextCellData,
};

/// Outcome of reducing one step from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSummary {
    /// Controller report for the step.
    pub report: StepReport,
    /// Layout the step was reduced with.
    pub layout: QuadLayout,
    /// Encoded cell data as the host display field would receive it.
    pub cell_data: String,
}

/// Run the colour-map controller once over `step`.
///
/// The step is reduced exactly as the host would at the end of an animation step, with the
/// display field captured as text.
pub fn run_step(step: &StepInput, layout: QuadLayout) -> Result<StepSummary, Box<dyn Error>> {
    let aggregator = FieldAggregator::with_layout(layout)?;
    let mut controller = ColorMapController::new(aggregator);
    let mut display = TextCellData::default();
    let report = controller.on_end_animation_step(step, &mut display)?;
    Ok(StepSummary {
        report,
        layout,
        cell_data: display.value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stressmap::{sample, AggregationError, LayoutError};

    #[test]
    fn produces_expected_cell_data() {
        let step = StepInput {
            samples: vec![sample(1.0, 1.0, 0.0); 4],
            volumes: vec![1.0],
        };
        let summary = run_step(&step, QuadLayout::default()).expect("step runs");
        assert_eq!(summary.report.cells, 1);
        assert_eq!(summary.report.peak, Some(1.0));
        assert_eq!(summary.cell_data, "1 1");
    }

    #[test]
    fn miswired_step_is_a_shape_error() {
        let step = StepInput {
            samples: vec![sample(1.0, 1.0, 0.0); 7],
            volumes: vec![1.0, 1.0],
        };
        let error = run_step(&step, QuadLayout::default()).expect_err("shape mismatch");
        assert!(error.downcast_ref::<AggregationError>().is_some());
    }

    #[test]
    fn invalid_layout_is_rejected_before_reduction() {
        let layout = QuadLayout {
            samples_per_cell: 0,
            display_slots_per_cell: 2,
        };
        let error = run_step(&StepInput::default(), layout).expect_err("invalid layout");
        assert_eq!(
            error.downcast_ref::<LayoutError>(),
            Some(&LayoutError::NoSamplesPerCell)
        );
    }
}
