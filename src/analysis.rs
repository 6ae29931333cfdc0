use crate::conditions::ProppedCantileverProperties;
use beamx::{Beam, SolveError, Solution, SolverOptions};

/// Solution of the demonstration beam with the figures the report highlights.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Full solver output.
    pub solution: Solution,
    /// Largest nodal deflection magnitude and the node position where it occurs.
    pub peak_deflection: (f64, f64),
    /// Sum of vertical reactions, which must balance the applied load.
    pub total_reaction: f64,
    /// Properties that generated the result, exposed for reporting.
    pub properties: ProppedCantileverProperties,
}

/// Solve the demonstration beam and extract the key response figures.
pub fn run_analysis(
    beam: &Beam,
    properties: ProppedCantileverProperties,
    options: &SolverOptions,
) -> Result<AnalysisSummary, SolveError> {
    let solution = beam.solve(options)?;

    let peak_deflection = solution
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(node, &position)| {
            solution
                .displacement(node)
                .map(|deflection| (deflection, position))
        })
        .fold((0.0_f64, 0.0_f64), |peak, candidate| {
            if candidate.0.abs() > peak.0.abs() {
                candidate
            } else {
                peak
            }
        });

    let total_reaction = (0..solution.node_count())
        .filter_map(|node| solution.reaction_force(node))
        .sum();

    Ok(AnalysisSummary {
        solution,
        peak_deflection,
        total_reaction,
        properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::build_propped_cantilever;

    #[test]
    fn reactions_balance_the_load() {
        let (beam, properties) = build_propped_cantilever().expect("valid setup");
        let summary =
            run_analysis(&beam, properties, &SolverOptions::default()).expect("analysis runs");

        assert!((summary.total_reaction + properties.load).abs() < 1.0e-5);
        // The only free translational node is under the load.
        assert_eq!(summary.peak_deflection.1, properties.load_position);
        assert!(summary.peak_deflection.0 < 0.0);
    }
}
