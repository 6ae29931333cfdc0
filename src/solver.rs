//! Reduced linear solve, force recovery and the end-to-end beam solve.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector, Matrix4};
use serde::Serialize;

use crate::beam::Beam;
use crate::errors::{BeamItem, SolveError};
use crate::loads::assemble_loads;
use crate::nodes::{generate_nodes, node_index};
use crate::options::{Placement, SolverOptions};
use crate::stiffness::assemble;
use crate::supports::{check_stability, encode_dofs, encode_reactions, Dof, Support};

/// Results of a beam solve, ready for tabular display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    /// Analysis node positions in ascending order.
    pub nodes: Vec<f64>,
    /// Stiffness matrix of each element, element `i` joining nodes `i` and `i + 1`.
    pub element_stiffness: Vec<Matrix4<f64>>,
    /// Global stiffness matrix before boundary conditions.
    pub global_stiffness: DMatrix<f64>,
    /// Applied nodal loads, including distributed-load equivalents.
    pub loads: DVector<f64>,
    /// Resolved displacement and rotation of every node.
    pub dofs: DVector<f64>,
    /// Nodal forces `K · d`.
    pub forces: DVector<f64>,
    /// Support reactions, zero at unrestrained DOFs.
    pub reactions: DVector<f64>,
}

impl Solution {
    /// Number of analysis nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the node at exactly `position`.
    #[must_use]
    pub fn node_index(&self, position: f64) -> Option<usize> {
        node_index(&self.nodes, position)
    }

    /// Transverse displacement of node `node`.
    #[must_use]
    pub fn displacement(&self, node: usize) -> Option<f64> {
        self.dofs.get(node * 2).copied()
    }

    /// Rotation of node `node`.
    #[must_use]
    pub fn rotation(&self, node: usize) -> Option<f64> {
        self.dofs.get(node * 2 + 1).copied()
    }

    /// Vertical reaction at node `node`.
    #[must_use]
    pub fn reaction_force(&self, node: usize) -> Option<f64> {
        self.reactions.get(node * 2).copied()
    }

    /// Moment reaction at node `node`.
    #[must_use]
    pub fn reaction_moment(&self, node: usize) -> Option<f64> {
        self.reactions.get(node * 2 + 1).copied()
    }

    /// Resolved DOFs rounded for display.
    #[must_use]
    pub fn rounded_dofs(&self, options: &SolverOptions) -> DVector<f64> {
        self.dofs.map(|value| options.round(value))
    }

    /// Nodal forces rounded for display.
    #[must_use]
    pub fn rounded_forces(&self, options: &SolverOptions) -> DVector<f64> {
        self.forces.map(|value| options.round(value))
    }

    /// Global stiffness matrix rounded for display.
    #[must_use]
    pub fn rounded_global_stiffness(&self, options: &SolverOptions) -> DMatrix<f64> {
        self.global_stiffness
            .map(|value| options.round_stiffness(value))
    }

    /// Serialise the solution to JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Solve `stiffness · x = loads`, refusing singular or ill-conditioned systems.
///
/// # Errors
///
/// Returns [`SolveError::SingularSystem`] when a pivot vanishes relative to
/// the largest pivot or the solution is not finite.
pub fn solve_reduced(
    stiffness: DMatrix<f64>,
    loads: &DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let size = loads.len();
    if size == 0 {
        return Ok(DVector::zeros(0));
    }
    let lu = stiffness.lu();
    let pivots = lu.u().diagonal().map(f64::abs);
    let largest = pivots.max();
    let smallest = pivots.min();
    let tolerance = largest * f64::EPSILON * size as f64;
    if !largest.is_normal() || smallest <= tolerance {
        return Err(SolveError::SingularSystem);
    }
    let solution = lu.solve(loads).ok_or(SolveError::SingularSystem)?;
    if solution.iter().all(|value| value.is_finite()) {
        Ok(solution)
    } else {
        Err(SolveError::SingularSystem)
    }
}

/// Solve for the unknown DOFs only.
///
/// Returns the solved values in the order the unknowns appear in `dofs`; the
/// result is empty when every DOF is known.
///
/// # Errors
///
/// Returns [`SolveError::SingularSystem`] when the reduced stiffness matrix
/// cannot be inverted.
pub fn solve_unknowns(
    stiffness: &DMatrix<f64>,
    dofs: &[Dof],
    loads: &DVector<f64>,
) -> Result<Vec<(usize, f64)>, SolveError> {
    let unknown: Vec<usize> = dofs
        .iter()
        .enumerate()
        .filter(|(_, dof)| dof.is_unknown())
        .map(|(index, _)| index)
        .collect();
    debug!("solving for {} unknown DOFs of {}", unknown.len(), dofs.len());
    if unknown.is_empty() {
        return Ok(Vec::new());
    }

    let size = unknown.len();
    let reduced_stiffness =
        DMatrix::from_fn(size, size, |row, col| stiffness[(unknown[row], unknown[col])]);
    let reduced_loads = DVector::from_fn(size, |row, _| loads[unknown[row]]);
    let solution = solve_reduced(reduced_stiffness, &reduced_loads)?;
    Ok(unknown.into_iter().zip(solution.iter().copied()).collect())
}

/// Resolve every DOF, substituting solved values for the unknowns.
///
/// # Errors
///
/// Returns [`SolveError::SingularSystem`] when the reduced stiffness matrix
/// cannot be inverted.
pub fn solve_dofs(
    stiffness: &DMatrix<f64>,
    dofs: &[Dof],
    loads: &DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let mut resolved = DVector::from_iterator(
        dofs.len(),
        dofs.iter().map(|dof| dof.known().unwrap_or(0.0)),
    );
    for (index, value) in solve_unknowns(stiffness, dofs, loads)? {
        resolved[index] = value;
    }
    Ok(resolved)
}

/// Nodal forces produced by a resolved DOF vector.
#[must_use]
pub fn recover_forces(stiffness: &DMatrix<f64>, dofs: &DVector<f64>) -> DVector<f64> {
    stiffness * dofs
}

/// Reactions at restrained DOFs as `force - load`, rounded for reporting.
///
/// DOFs whose placeholder is known keep that value (zero at free DOFs).
#[must_use]
pub fn recover_reactions(
    forces: &DVector<f64>,
    loads: &DVector<f64>,
    placeholders: &[Dof],
    options: &SolverOptions,
) -> DVector<f64> {
    DVector::from_iterator(
        placeholders.len(),
        placeholders
            .iter()
            .enumerate()
            .map(|(index, placeholder)| match placeholder {
                Dof::Known(value) => *value,
                Dof::Unknown => options.round(forces[index] - loads[index]),
            }),
    )
}

/// Supports that sit on a node, applying the placement policy to the rest.
fn placed_supports(
    nodes: &[f64],
    supports: &[Support],
    placement: Placement,
) -> Result<Vec<Support>, SolveError> {
    let mut placed = Vec::with_capacity(supports.len());
    for support in supports {
        if node_index(nodes, support.position).is_some() {
            placed.push(*support);
            continue;
        }
        match placement {
            Placement::Strict => {
                return Err(SolveError::OffBeam {
                    item: BeamItem::Support,
                    position: support.position,
                })
            }
            Placement::Lenient => {
                warn!(
                    "{:?} support at {} is off the beam and was dropped",
                    support.kind, support.position
                );
            }
        }
    }
    Ok(placed)
}

/// Solve a beam with the direct stiffness method.
///
/// Geometry, section and support stability are checked before any matrix is
/// built. The beam is only read.
///
/// # Errors
///
/// - [`SolveError::MissingGeometry`] when the length is not positive.
/// - [`SolveError::InvalidSection`] when E or I is not positive.
/// - [`SolveError::UnstableStructure`] when the supports cannot restrain the beam.
/// - [`SolveError::OffBeam`] in strict placement mode for items off a node.
/// - [`SolveError::SingularSystem`] when the reduced system cannot be solved.
///
/// # Examples
/// ```
/// use beamx::{solve, Beam, SolveError, SolverOptions, SupportKind, Instability};
///
/// let mut beam = Beam::new(5.0);
/// beam.set_support(0.0, SupportKind::Rolled).unwrap();
/// beam.set_support(5.0, SupportKind::Rolled).unwrap();
/// let error = solve(&beam, &SolverOptions::default()).unwrap_err();
/// assert_eq!(error, SolveError::UnstableStructure(Instability::OnlyRollers));
/// ```
pub fn solve(beam: &Beam, options: &SolverOptions) -> Result<Solution, SolveError> {
    let length = beam.length();
    if !(length.is_finite() && length > 0.0) {
        return Err(SolveError::MissingGeometry(length));
    }
    let elastic_modulus = beam.elastic_modulus();
    let second_moment = beam.second_moment();
    let valid_section = [elastic_modulus, second_moment]
        .iter()
        .all(|value| value.is_finite() && *value > 0.0);
    if !valid_section {
        return Err(SolveError::InvalidSection {
            elastic_modulus,
            second_moment,
        });
    }

    let nodes = generate_nodes(length, beam.referenced_positions());
    let supports = placed_supports(&nodes, beam.supports(), options.placement)?;
    check_stability(&supports)?;
    if !beam.is_loaded() {
        debug!("beam carries no loads; every result will be zero");
    }
    debug!("generated {} nodes for a beam of length {length}", nodes.len());

    let assembly = assemble(&nodes, elastic_modulus, second_moment);
    let dofs = encode_dofs(&nodes, &supports);
    let placeholders = encode_reactions(&nodes, &supports);
    let loads = assemble_loads(
        &nodes,
        beam.point_loads(),
        beam.moments(),
        beam.distributed_loads(),
        options.placement,
    )?;

    let resolved = solve_dofs(&assembly.global, &dofs, &loads)?;
    let forces = recover_forces(&assembly.global, &resolved);
    let reactions = recover_reactions(&forces, &loads, &placeholders, options);

    Ok(Solution {
        nodes,
        element_stiffness: assembly.elements,
        global_stiffness: assembly.global,
        loads,
        dofs: resolved,
        forces,
        reactions,
    })
}
