use crate::analysis::AnalysisSummary;
use beamx::SolverOptions;
use nalgebra::{DMatrix, Matrix4};
use std::fmt::Write;

/// Append a matrix to `output`, one bracketed row per line.
fn write_matrix<I>(output: &mut String, rows: I, precision: usize)
where
    I: IntoIterator<Item = Vec<f64>>,
{
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|value| format!("{value:>10.precision$}"))
            .collect();
        writeln!(output, "  [{} ]", cells.join(" ")).expect("writing to string cannot fail");
    }
}

/// Rows of a fixed-size element matrix, rounded for display.
fn element_rows(matrix: &Matrix4<f64>, options: &SolverOptions) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().map(|&v| options.round_stiffness(v)).collect())
        .collect()
}

/// Rows of a dynamically sized matrix.
fn global_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Render the worked solution as text, following the order of a hand
/// calculation: elements, assembly, unknowns, reactions.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary, options: &SolverOptions) -> String {
    let solution = &summary.solution;
    let properties = &summary.properties;
    let decimals = options.decimals as usize;
    let stiffness_decimals = options.stiffness_decimals as usize;
    let mut output = String::new();

    writeln!(
        &mut output,
        "Propped cantilever (L = {} m, EI = {}, P = {:+} at {} m)",
        properties.length,
        properties.elastic_modulus * properties.second_moment,
        properties.load,
        properties.load_position
    )
    .expect("writing to string cannot fail");

    let nodes: Vec<String> = solution.nodes.iter().map(f64::to_string).collect();
    writeln!(&mut output, "Nodes: {}", nodes.join(", ")).expect("writing to string cannot fail");

    for (index, element) in solution.element_stiffness.iter().enumerate() {
        writeln!(
            &mut output,
            "Element {} stiffness ({} m to {} m):",
            index + 1,
            solution.nodes[index],
            solution.nodes[index + 1]
        )
        .expect("writing to string cannot fail");
        write_matrix(
            &mut output,
            element_rows(element, options),
            stiffness_decimals,
        );
    }

    output.push_str("Global stiffness matrix:\n");
    write_matrix(
        &mut output,
        global_rows(&solution.rounded_global_stiffness(options)),
        stiffness_decimals,
    );

    // Each node carries a displacement and a rotation; the reactions share the
    // same ordering as force and moment.
    output.push_str(
        "Node      displacement        rotation        reaction force  reaction moment\n",
    );
    let dofs = solution.rounded_dofs(options);
    for (node, position) in solution.nodes.iter().enumerate() {
        writeln!(
            &mut output,
            "{position:<8} {:>+16.decimals$} {:>+16.decimals$} {:>+16.decimals$} {:>+16.decimals$}",
            dofs[node * 2],
            dofs[node * 2 + 1],
            solution.reactions[node * 2],
            solution.reactions[node * 2 + 1],
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("Node      nodal force      nodal moment\n");
    let forces = solution.rounded_forces(options);
    for (node, position) in solution.nodes.iter().enumerate() {
        writeln!(
            &mut output,
            "{position:<8} {:>+16.decimals$} {:>+16.decimals$}",
            forces[node * 2],
            forces[node * 2 + 1],
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Peak deflection: {:+.decimals$} at {} m",
        summary.peak_deflection.0, summary.peak_deflection.1
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Sum of vertical reactions: {:+.decimals$}",
        summary.total_reaction
    )
    .expect("writing to string cannot fail");
    output.push_str("* Anticlockwise and upwards directions are taken as positive.\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::conditions::build_propped_cantilever;

    #[test]
    fn formats_worked_solution() {
        let options = SolverOptions::default();
        let (beam, properties) = build_propped_cantilever().expect("valid setup");
        let summary = run_analysis(&beam, properties, &options).expect("analysis runs");
        let report = render_summary(&summary, &options);

        assert!(report.contains("Propped cantilever (L = 10 m"));
        assert!(report.contains("Nodes: 0, 3, 10"));
        assert!(report.contains("Element 2 stiffness (3 m to 10 m):"));
        assert!(report.contains("Sum of vertical reactions: +1.00000"));
        assert!(report.ends_with("taken as positive.\n"));
        assert!(report.contains("nodal force"));
        // The loaded node carries the applied force K·d = P.
        let loaded_node = format!("{:<8} {:>+16.5} {:>+16.5}\n", 3.0, -1.0, 0.0);
        assert!(report.contains(&loaded_node));
    }

    #[test]
    fn stiffness_precision_follows_options() {
        let options = SolverOptions {
            stiffness_decimals: 3,
            ..SolverOptions::default()
        };
        let (beam, properties) = build_propped_cantilever().expect("valid setup");
        let summary = run_analysis(&beam, properties, &options).expect("analysis runs");
        let report = render_summary(&summary, &options);

        // 4EI/L for the 3 m element.
        assert!(report.contains("     1.333"));
        assert!(!render_summary(&summary, &SolverOptions::default()).contains("     1.333"));
    }
}
