#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod beam;
mod errors;
mod loads;
mod nodes;
mod options;
mod solver;
mod spring;
mod stiffness;
mod supports;

pub use beam::{Beam, DEFAULT_ELASTIC_MODULUS, DEFAULT_SECOND_MOMENT};
pub use errors::{BeamEditError, BeamItem, Instability, SolveError};
pub use loads::{assemble_loads, DistributedLoad, EquivalentEndLoads, Moment, PointLoad};
pub use nodes::{generate_nodes, node_index};
pub use options::{Placement, SolverOptions};
pub use solver::{
    recover_forces, recover_reactions, solve, solve_dofs, solve_reduced, solve_unknowns, Solution,
};
pub use spring::{SpringChain, SpringSolution};
pub use stiffness::{assemble, element_stiffness, Assembly};
pub use supports::{check_stability, encode_dofs, encode_reactions, Dof, Support, SupportKind};
