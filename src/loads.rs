//! Applied loads and global load-vector assembly.
//!
//! Upward forces and anticlockwise moments are positive.

use log::warn;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::errors::{BeamItem, SolveError};
use crate::nodes::node_index;
use crate::options::Placement;

/// Transverse force applied at a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Distance from the left end of the beam.
    pub position: f64,
    /// Signed force, upward positive.
    pub force: f64,
}

impl PointLoad {
    /// Create a point load from a signed force.
    #[must_use]
    pub const fn new(position: f64, force: f64) -> Self {
        Self { position, force }
    }

    /// Create a point load from a downward magnitude.
    ///
    /// # Examples
    /// ```
    /// use beamx::PointLoad;
    ///
    /// assert_eq!(PointLoad::downward(2.0, 5.0).force, -5.0);
    /// ```
    #[must_use]
    pub fn downward(position: f64, magnitude: f64) -> Self {
        Self::new(position, -magnitude)
    }
}

/// Concentrated moment applied at a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    /// Distance from the left end of the beam.
    pub position: f64,
    /// Signed moment, anticlockwise positive.
    pub moment: f64,
}

impl Moment {
    /// Create a moment from a signed value.
    #[must_use]
    pub const fn new(position: f64, moment: f64) -> Self {
        Self { position, moment }
    }

    /// Create a moment from a clockwise magnitude.
    #[must_use]
    pub fn clockwise(position: f64, magnitude: f64) -> Self {
        Self::new(position, -magnitude)
    }
}

/// Uniform load acting over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Start of the loaded span.
    pub start: f64,
    /// End of the loaded span.
    pub end: f64,
    /// Signed intensity per unit length, upward positive.
    pub intensity: f64,
}

/// Statically equivalent nodal loads replacing a distributed load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquivalentEndLoads {
    /// Force at the start node.
    pub start_force: f64,
    /// Moment at the start node.
    pub start_moment: f64,
    /// Force at the end node.
    pub end_force: f64,
    /// Moment at the end node.
    pub end_moment: f64,
}

impl DistributedLoad {
    /// Create a distributed load from a signed intensity.
    #[must_use]
    pub const fn new(start: f64, end: f64, intensity: f64) -> Self {
        Self {
            start,
            end,
            intensity,
        }
    }

    /// Create a distributed load from a downward intensity.
    #[must_use]
    pub fn downward(start: f64, end: f64, magnitude: f64) -> Self {
        Self::new(start, end, -magnitude)
    }

    /// Length of the loaded span.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Resultant force of the load.
    #[must_use]
    pub fn total_force(&self) -> f64 {
        self.intensity * self.span()
    }

    /// Fixed-end equivalent loads: `wL/2` at each end, `wL²/12` at the start
    /// and `-wL²/12` at the end.
    ///
    /// # Examples
    /// ```
    /// use beamx::DistributedLoad;
    ///
    /// let loads = DistributedLoad::new(0.0, 6.0, -2.0).equivalent_end_loads();
    /// assert_eq!(loads.start_force, -6.0);
    /// assert_eq!(loads.start_moment, -6.0);
    /// assert_eq!(loads.end_force, -6.0);
    /// assert_eq!(loads.end_moment, 6.0);
    /// ```
    #[must_use]
    pub fn equivalent_end_loads(&self) -> EquivalentEndLoads {
        let length = self.span();
        let force = self.intensity * length / 2.0;
        let moment = self.intensity * length.powi(2) / 12.0;
        EquivalentEndLoads {
            start_force: force,
            start_moment: moment,
            end_force: force,
            end_moment: -moment,
        }
    }
}

/// Resolve the node for an item, applying the placement policy when it is missing.
fn locate(
    nodes: &[f64],
    item: BeamItem,
    position: f64,
    placement: Placement,
) -> Result<Option<usize>, SolveError> {
    match node_index(nodes, position) {
        Some(index) => Ok(Some(index)),
        None => match placement {
            Placement::Strict => Err(SolveError::OffBeam { item, position }),
            Placement::Lenient => {
                warn!("{item} at {position} is not on a node and was dropped");
                Ok(None)
            }
        },
    }
}

/// Assemble the global load vector.
///
/// Point loads overwrite the displacement entry of their node, moments and
/// distributed-load equivalents accumulate. Items that do not sit exactly on a
/// node are dropped or rejected according to `placement`.
///
/// # Errors
///
/// Returns [`SolveError::OffBeam`] in strict placement mode when an item does
/// not coincide with a node.
pub fn assemble_loads(
    nodes: &[f64],
    point_loads: &[PointLoad],
    moments: &[Moment],
    distributed_loads: &[DistributedLoad],
    placement: Placement,
) -> Result<DVector<f64>, SolveError> {
    let mut loads = DVector::zeros(nodes.len() * 2);

    for load in point_loads {
        if let Some(index) = locate(nodes, BeamItem::PointLoad, load.position, placement)? {
            loads[index * 2] = load.force;
        }
    }

    for moment in moments {
        if let Some(index) = locate(nodes, BeamItem::Moment, moment.position, placement)? {
            loads[index * 2 + 1] += moment.moment;
        }
    }

    for load in distributed_loads {
        let start = locate(nodes, BeamItem::DistributedLoad, load.start, placement)?;
        let end = locate(nodes, BeamItem::DistributedLoad, load.end, placement)?;
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };
        let equivalent = load.equivalent_end_loads();
        loads[start * 2] += equivalent.start_force;
        loads[start * 2 + 1] += equivalent.start_moment;
        loads[end * 2] += equivalent.end_force;
        loads[end * 2 + 1] += equivalent.end_moment;
    }

    Ok(loads)
}
