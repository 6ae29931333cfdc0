mod analysis;
mod conditions;
mod report;

use analysis::run_analysis;
use beamx::SolverOptions;
use conditions::build_propped_cantilever;
use report::render_summary;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // RUST_LOG=debug shows each solver step.
    env_logger::init();

    // Define the beam, its supports and its load. Positions are measured
    // from the fixed end.
    let (beam, properties) = build_propped_cantilever()?;

    // Solve with the default reporting policy: five decimals, noise below
    // 1e-5 shown as zero, off-node loads dropped with a warning.
    let options = SolverOptions::default();
    let summary = run_analysis(&beam, properties, &options)?;

    let report = render_summary(&summary, &options);
    println!("{report}");

    Ok(())
}
