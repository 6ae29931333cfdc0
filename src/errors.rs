//! Error types produced while editing or solving beams.

use std::fmt;

use thiserror::Error;

/// Kind of item placed along a beam, used to describe rejected positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamItem {
    /// A support.
    Support,
    /// A transverse point load.
    PointLoad,
    /// An applied moment.
    Moment,
    /// An endpoint of a uniformly distributed load.
    DistributedLoad,
}

impl fmt::Display for BeamItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Support => "support",
            Self::PointLoad => "point load",
            Self::Moment => "moment",
            Self::DistributedLoad => "distributed load",
        };
        f.write_str(name)
    }
}

/// Reason a beam is rejected as statically unstable before any assembly.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Instability {
    /// Returned when the beam has no supports at all.
    #[error("the beam has no supports")]
    NoSupports,
    /// Returned when every support is a roller.
    #[error("every support is a roller; add a fixed or pinned support")]
    OnlyRollers,
    /// Returned when the supports provide fewer than three reaction components.
    #[error("supports provide {available} reaction components, at least 3 are required")]
    InsufficientReactions {
        /// Number of reaction components the supports provide.
        available: usize,
    },
}

/// Error returned when a beam solve fails.
///
/// Every variant is terminal for the solve attempt; no partial results are
/// produced and callers must correct the problem before solving again.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the beam length is undefined, zero or negative.
    #[error("beam length must be positive (received {0})")]
    MissingGeometry(f64),
    /// Returned when the elastic modulus or second moment of area is not positive.
    #[error("section properties must be positive (E = {elastic_modulus}, I = {second_moment})")]
    InvalidSection {
        /// Rejected elastic modulus.
        elastic_modulus: f64,
        /// Rejected second moment of area.
        second_moment: f64,
    },
    /// Returned when the supports cannot hold the beam in equilibrium.
    #[error("the beam is unstable: {0}")]
    UnstableStructure(#[from] Instability),
    /// Returned in strict placement mode when an item does not sit on a node.
    #[error("{item} at {position} does not coincide with a node on the beam")]
    OffBeam {
        /// Kind of the misplaced item.
        item: BeamItem,
        /// Position of the misplaced item.
        position: f64,
    },
    /// Returned when the reduced stiffness matrix cannot be inverted.
    #[error("reduced stiffness matrix is singular; check supports")]
    SingularSystem,
    /// Returned when a spring in a spring chain has non-positive stiffness.
    #[error("spring {index} has non-positive stiffness {stiffness}")]
    InvalidSpring {
        /// Index of the offending spring.
        index: usize,
        /// Rejected stiffness.
        stiffness: f64,
    },
}

/// Error returned when editing a [`Beam`](crate::Beam) with invalid data.
///
/// # Examples
///
/// ```
/// use beamx::{Beam, BeamEditError, SupportKind};
///
/// let mut beam = Beam::new(10.0);
/// let error = beam
///     .set_support(12.0, SupportKind::Pinned)
///     .expect_err("support beyond the beam is rejected");
/// assert_eq!(error, BeamEditError::OutOfBounds { position: 12.0, length: 10.0 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BeamEditError {
    /// Returned when the beam length is zero, negative or not finite.
    #[error("beam length must be positive (received {0})")]
    NonPositiveLength(f64),
    /// Returned when the elastic modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {0})")]
    NonPositiveElasticModulus(f64),
    /// Returned when the second moment of area is zero, negative or not finite.
    #[error("second moment of area must be positive (received {0})")]
    NonPositiveSecondMoment(f64),
    /// Returned when a position lies outside `[0, length]`.
    #[error("position {position} lies outside the beam [0, {length}]")]
    OutOfBounds {
        /// Rejected position.
        position: f64,
        /// Current beam length.
        length: f64,
    },
    /// Returned when a fixed support is placed anywhere but a beam end.
    #[error("fixed supports can only be placed at the ends of the beam (0 or {length})")]
    FixedSupportNotAtEnd {
        /// Current beam length.
        length: f64,
    },
    /// Returned when a distributed load does not end after it starts.
    #[error("distributed load must end after it starts (start {start}, end {end})")]
    EmptySpan {
        /// Start of the rejected span.
        start: f64,
        /// End of the rejected span.
        end: f64,
    },
    /// Returned when a distributed load overlaps one already on the beam.
    #[error("a distributed load already covers part of [{start}, {end}]")]
    OverlappingDistributedLoad {
        /// Start of the rejected span.
        start: f64,
        /// End of the rejected span.
        end: f64,
    },
    /// Returned when removing an item that is not on the beam.
    #[error("no {item} at {position}")]
    NotFound {
        /// Kind of the missing item.
        item: BeamItem,
        /// Position that was looked up.
        position: f64,
    },
}
