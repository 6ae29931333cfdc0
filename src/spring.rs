//! Axial spring chains, the one-dimensional warm-up for the stiffness method.

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::errors::{Instability, SolveError};
use crate::options::SolverOptions;
use crate::solver::{recover_forces, recover_reactions, solve_dofs};
use crate::supports::Dof;

/// Springs in series, spring `i` joining node `i` to node `i + 1`.
///
/// # Examples
/// ```
/// use beamx::{SolverOptions, SpringChain};
///
/// let chain = SpringChain::new(vec![100.0]).with_fixed(0).with_load(1, 5.0);
/// let solution = chain.solve(&SolverOptions::default()).unwrap();
/// assert_eq!(solution.displacements[1], 0.05);
/// assert_eq!(solution.reactions[0], -5.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringChain {
    /// Axial stiffness of each spring.
    stiffnesses: Vec<f64>,
    /// Nodes held at zero displacement.
    fixed: Vec<usize>,
    /// Axial force applied at each node.
    loads: Vec<f64>,
}

/// Results of a spring chain solve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpringSolution {
    /// Assembled stiffness matrix.
    pub stiffness: DMatrix<f64>,
    /// Displacement of each node.
    pub displacements: DVector<f64>,
    /// Nodal forces `K · u`.
    pub forces: DVector<f64>,
    /// Reactions at fixed nodes, zero elsewhere.
    pub reactions: DVector<f64>,
    /// Tension in each spring.
    pub spring_forces: Vec<f64>,
}

impl SpringChain {
    /// Create an unloaded, unrestrained chain.
    #[must_use]
    pub fn new(stiffnesses: Vec<f64>) -> Self {
        let nodes = stiffnesses.len() + 1;
        Self {
            stiffnesses,
            fixed: Vec::new(),
            loads: vec![0.0; nodes],
        }
    }

    /// Number of nodes, one more than the number of springs.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.stiffnesses.len() + 1
    }

    /// Hold `node` at zero displacement.
    #[must_use]
    pub fn with_fixed(mut self, node: usize) -> Self {
        if !self.fixed.contains(&node) {
            self.fixed.push(node);
        }
        self
    }

    /// Apply an axial force at `node`, replacing any earlier force there.
    ///
    /// Forces on nodes beyond the chain are ignored.
    #[must_use]
    pub fn with_load(mut self, node: usize, force: f64) -> Self {
        if let Some(load) = self.loads.get_mut(node) {
            *load = force;
        }
        self
    }

    /// Assemble the chain stiffness matrix from `k · [[1, -1], [-1, 1]]` blocks.
    #[must_use]
    pub fn stiffness_matrix(&self) -> DMatrix<f64> {
        let size = self.node_count();
        let mut matrix = DMatrix::zeros(size, size);
        for (index, &k) in self.stiffnesses.iter().enumerate() {
            matrix[(index, index)] += k;
            matrix[(index, index + 1)] -= k;
            matrix[(index + 1, index)] -= k;
            matrix[(index + 1, index + 1)] += k;
        }
        matrix
    }

    /// Solve for nodal displacements, reactions and spring tensions.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidSpring`] for a non-positive stiffness,
    /// [`SolveError::UnstableStructure`] when no node inside the chain is
    /// fixed, and [`SolveError::SingularSystem`] if the reduced system cannot
    /// be solved.
    pub fn solve(&self, options: &SolverOptions) -> Result<SpringSolution, SolveError> {
        if let Some((index, &stiffness)) = self
            .stiffnesses
            .iter()
            .enumerate()
            .find(|(_, k)| !(k.is_finite() && **k > 0.0))
        {
            return Err(SolveError::InvalidSpring { index, stiffness });
        }
        let size = self.node_count();
        let dofs: Vec<Dof> = (0..size)
            .map(|node| {
                if self.fixed.contains(&node) {
                    Dof::Known(0.0)
                } else {
                    Dof::Unknown
                }
            })
            .collect();
        if dofs.iter().all(|dof| dof.is_unknown()) {
            return Err(Instability::NoSupports.into());
        }
        debug!("solving spring chain with {size} nodes");

        let stiffness = self.stiffness_matrix();
        let loads = DVector::from_fn(size, |node, _| self.loads.get(node).copied().unwrap_or(0.0));
        let displacements = solve_dofs(&stiffness, &dofs, &loads)?;
        let forces = recover_forces(&stiffness, &displacements);
        let placeholders: Vec<Dof> = dofs
            .iter()
            .map(|dof| dof.reaction_placeholder())
            .collect();
        let reactions = recover_reactions(&forces, &loads, &placeholders, options);
        let spring_forces = self
            .stiffnesses
            .iter()
            .enumerate()
            .map(|(index, k)| options.round(k * (displacements[index + 1] - displacements[index])))
            .collect();

        Ok(SpringSolution {
            stiffness,
            displacements,
            forces,
            reactions,
            spring_forces,
        })
    }
}
