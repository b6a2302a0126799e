use crate::analysis::StepSummary;
use std::fmt::Write;

/// Render a textual summary of one reduced step.
///
/// The last line is the encoded cell data exactly as the host display field receives it, so
/// the output can be piped into other tooling.
#[must_use]
pub fn render_summary(summary: &StepSummary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Von Mises colour map, step {} ({} samples per cell, {} display slots per cell)",
        summary.report.step,
        summary.layout.samples_per_cell,
        summary.layout.display_slots_per_cell
    )
    .expect("writing to string cannot fail");

    writeln!(&mut output, "Cells: {}", summary.report.cells)
        .expect("writing to string cannot fail");

    if let Some(peak) = summary.report.peak {
        writeln!(&mut output, "Peak cell value: {peak:.6e}").expect("writing to string cannot fail");
    } else {
        output.push_str("Peak cell value: not available (no finite cells)\n");
    }

    // Degenerate cells are listed rather than clamped so the host volumes can be checked.
    for warning in &summary.report.degenerate_cells {
        writeln!(&mut output, "Warning: {warning}").expect("writing to string cannot fail");
    }

    writeln!(&mut output, "cellData: {}", summary.cell_data)
        .expect("writing to string cannot fail");

    output
}
