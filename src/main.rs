mod analysis;
mod input;
mod report;

use analysis::run_step;
use clap::Parser;
use input::{load, Cli};
use report::render_summary;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics from the library go through `log`; RUST_LOG selects the level.
    env_logger::init();

    // One step of solver output plus an optional layout override, both as JSON.
    let cli = Cli::parse();
    let (step, layout) = load(&cli)?;

    // Reduce the step the same way the host controller does at the end of an animation step
    // and capture the text the display field would receive.
    let summary = run_step(&step, layout)?;

    let report = render_summary(&summary);
    print!("{report}");

    Ok(())
}
