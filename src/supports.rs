//! Support types and boundary-condition encoding.

use serde::{Deserialize, Serialize};

use crate::errors::Instability;

/// Restraint offered by a support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Restrains displacement; rotation is free.
    Pinned,
    /// Restrains displacement only and provides no horizontal restraint.
    Rolled,
    /// Restrains both displacement and rotation.
    Fixed,
}

impl SupportKind {
    /// Whether the rotational degree of freedom is restrained.
    #[must_use]
    pub const fn restrains_rotation(self) -> bool {
        matches!(self, Self::Fixed)
    }

    /// Number of reaction components the support provides in a planar beam
    /// (horizontal, vertical and moment for a fixed support).
    #[must_use]
    pub const fn reaction_components(self) -> usize {
        match self {
            Self::Fixed => 3,
            Self::Pinned => 2,
            Self::Rolled => 1,
        }
    }
}

/// A support at a position along the beam.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Distance from the left end of the beam.
    pub position: f64,
    /// Restraint type.
    pub kind: SupportKind,
}

impl Support {
    /// Create a support.
    #[must_use]
    pub const fn new(position: f64, kind: SupportKind) -> Self {
        Self { position, kind }
    }
}

/// State of a single degree of freedom before the solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Dof {
    /// Prescribed value.
    Known(f64),
    /// Value to be solved for.
    Unknown,
}

impl Dof {
    /// Whether the value is still to be solved.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The prescribed value, if any.
    #[must_use]
    pub const fn known(self) -> Option<f64> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// The matching reaction placeholder: a prescribed DOF has an unknown
    /// reaction, a free DOF has none.
    #[must_use]
    pub const fn reaction_placeholder(self) -> Self {
        match self {
            Self::Known(_) => Self::Unknown,
            Self::Unknown => Self::Known(0.0),
        }
    }
}

/// Find the support, if any, sitting exactly on `node`.
fn support_at(supports: &[Support], node: f64) -> Option<SupportKind> {
    supports
        .iter()
        .find(|support| support.position == node)
        .map(|support| support.kind)
}

/// Build the DOF vector for the given nodes.
///
/// Restrained DOFs are `Known(0.0)`; everything else is `Unknown`. Entry `2k`
/// is the displacement and `2k + 1` the rotation of node `k`.
///
/// # Examples
/// ```
/// use beamx::{encode_dofs, Dof, Support, SupportKind};
///
/// let nodes = [0.0, 5.0];
/// let supports = [Support::new(0.0, SupportKind::Fixed)];
/// let dofs = encode_dofs(&nodes, &supports);
/// assert_eq!(dofs, vec![Dof::Known(0.0), Dof::Known(0.0), Dof::Unknown, Dof::Unknown]);
/// ```
#[must_use]
pub fn encode_dofs(nodes: &[f64], supports: &[Support]) -> Vec<Dof> {
    let mut dofs = Vec::with_capacity(nodes.len() * 2);
    for &node in nodes {
        match support_at(supports, node) {
            Some(kind) => {
                dofs.push(Dof::Known(0.0));
                dofs.push(if kind.restrains_rotation() {
                    Dof::Known(0.0)
                } else {
                    Dof::Unknown
                });
            }
            None => {
                dofs.push(Dof::Unknown);
                dofs.push(Dof::Unknown);
            }
        }
    }
    dofs
}

/// Build the reaction placeholder vector, the mirror image of [`encode_dofs`].
///
/// Restrained DOFs carry an `Unknown` reaction; free DOFs are `Known(0.0)`
/// since an unrestrained DOF cannot develop a reaction.
#[must_use]
pub fn encode_reactions(nodes: &[f64], supports: &[Support]) -> Vec<Dof> {
    encode_dofs(nodes, supports)
        .into_iter()
        .map(Dof::reaction_placeholder)
        .collect()
}

/// Reject support layouts that cannot hold a beam in equilibrium.
///
/// # Errors
///
/// Returns [`Instability::NoSupports`] for an unsupported beam,
/// [`Instability::OnlyRollers`] when every support is a roller, and
/// [`Instability::InsufficientReactions`] when fewer than three reaction
/// components are available.
pub fn check_stability(supports: &[Support]) -> Result<(), Instability> {
    if supports.is_empty() {
        return Err(Instability::NoSupports);
    }
    if supports
        .iter()
        .all(|support| support.kind == SupportKind::Rolled)
    {
        return Err(Instability::OnlyRollers);
    }
    let available: usize = supports
        .iter()
        .map(|support| support.kind.reaction_components())
        .sum();
    if available < 3 {
        return Err(Instability::InsufficientReactions { available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_support_kind() {
        let nodes = [0.0, 3.0, 6.0, 10.0];
        let supports = [
            Support::new(0.0, SupportKind::Fixed),
            Support::new(3.0, SupportKind::Pinned),
            Support::new(10.0, SupportKind::Rolled),
        ];
        let dofs = encode_dofs(&nodes, &supports);
        assert_eq!(
            dofs,
            vec![
                Dof::Known(0.0),
                Dof::Known(0.0),
                Dof::Known(0.0),
                Dof::Unknown,
                Dof::Unknown,
                Dof::Unknown,
                Dof::Known(0.0),
                Dof::Unknown,
            ]
        );

        let reactions = encode_reactions(&nodes, &supports);
        assert_eq!(
            reactions,
            vec![
                Dof::Unknown,
                Dof::Unknown,
                Dof::Unknown,
                Dof::Known(0.0),
                Dof::Known(0.0),
                Dof::Known(0.0),
                Dof::Unknown,
                Dof::Known(0.0),
            ]
        );
    }

    #[test]
    fn supports_off_node_are_ignored() {
        let dofs = encode_dofs(&[0.0, 10.0], &[Support::new(4.0, SupportKind::Fixed)]);
        assert!(dofs.iter().all(|dof| dof.is_unknown()));
    }

    #[test]
    fn rollers_alone_are_unstable() {
        let supports = [
            Support::new(0.0, SupportKind::Rolled),
            Support::new(4.0, SupportKind::Rolled),
            Support::new(8.0, SupportKind::Rolled),
        ];
        assert_eq!(check_stability(&supports), Err(Instability::OnlyRollers));
    }

    #[test]
    fn counts_reaction_components() {
        assert_eq!(check_stability(&[]), Err(Instability::NoSupports));
        assert_eq!(
            check_stability(&[Support::new(0.0, SupportKind::Pinned)]),
            Err(Instability::InsufficientReactions { available: 2 })
        );
        assert_eq!(
            check_stability(&[Support::new(0.0, SupportKind::Fixed)]),
            Ok(())
        );
        assert_eq!(
            check_stability(&[
                Support::new(0.0, SupportKind::Pinned),
                Support::new(5.0, SupportKind::Rolled),
            ]),
            Ok(())
        );
    }

    #[test]
    fn only_fixed_supports_restrain_rotation() {
        assert!(SupportKind::Fixed.restrains_rotation());
        assert!(!SupportKind::Pinned.restrains_rotation());
        assert!(!SupportKind::Rolled.restrains_rotation());
    }

    #[test]
    fn dof_accessors() {
        assert_eq!(Dof::Known(2.5).known(), Some(2.5));
        assert_eq!(Dof::Unknown.known(), None);
        assert!(!Dof::Known(0.0).is_unknown());
    }
}
