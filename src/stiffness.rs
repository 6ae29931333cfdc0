//! Element stiffness matrices and global assembly.

use nalgebra::{DMatrix, Matrix4};

/// Euler-Bernoulli stiffness matrix of a two-node beam element.
///
/// Local DOFs are ordered displacement and rotation at the start node, then
/// displacement and rotation at the end node. A zero `length` produces
/// non-finite entries; callers generate nodes without duplicates.
///
/// # Examples
/// ```
/// use beamx::element_stiffness;
///
/// let k = element_stiffness(2.0, 1.0, 1.0);
/// assert_eq!(k[(0, 0)], 1.5);
/// assert_eq!(k[(1, 1)], 2.0);
/// assert_eq!(k[(1, 3)], 1.0);
/// ```
#[must_use]
pub fn element_stiffness(length: f64, elastic_modulus: f64, second_moment: f64) -> Matrix4<f64> {
    let ei = elastic_modulus * second_moment;
    let a = 12.0 * ei / length.powi(3);
    let b = 6.0 * ei / length.powi(2);
    let c = 4.0 * ei / length;
    let d = 2.0 * ei / length;
    Matrix4::new(
        a, b, -a, b, //
        b, c, -b, d, //
        -a, -b, a, -b, //
        b, d, -b, c,
    )
}

/// Stiffness matrices for a beam discretised at `nodes`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    /// One matrix per element, element `i` joining node `i` to node `i + 1`.
    pub elements: Vec<Matrix4<f64>>,
    /// Global `(2N)×(2N)` stiffness matrix.
    pub global: DMatrix<f64>,
}

/// Assemble the global stiffness matrix for consecutive elements between `nodes`.
///
/// Element `i` maps its local DOFs onto global DOFs `2i..2i + 4`; overlapping
/// entries at shared nodes accumulate.
#[must_use]
pub fn assemble(nodes: &[f64], elastic_modulus: f64, second_moment: f64) -> Assembly {
    let dof = nodes.len() * 2;
    let mut global = DMatrix::zeros(dof, dof);
    let mut elements = Vec::with_capacity(nodes.len().saturating_sub(1));
    for (index, span) in nodes.windows(2).enumerate() {
        let local = element_stiffness(span[1] - span[0], elastic_modulus, second_moment);
        let offset = index * 2;
        for row in 0..4 {
            for col in 0..4 {
                global[(offset + row, offset + col)] += local[(row, col)];
            }
        }
        elements.push(local);
    }
    Assembly { elements, global }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    use super::*;

    #[test]
    fn element_matches_closed_form() {
        let (length, e, i) = (4.0, 200.0e6, 1.0e-5);
        let ei = e * i;
        let k = element_stiffness(length, e, i);
        assert_relative_eq!(k[(0, 0)], 12.0 * ei / 64.0);
        assert_relative_eq!(k[(0, 1)], 6.0 * ei / 16.0);
        assert_relative_eq!(k[(2, 3)], -6.0 * ei / 16.0);
        assert_relative_eq!(k[(3, 3)], 4.0 * ei / 4.0);
        assert_relative_eq!(k[(1, 3)], 2.0 * ei / 4.0);
        assert_eq!(k, k.transpose());
    }

    #[test]
    fn single_element_is_the_element_matrix() {
        let assembly = assemble(&[0.0, 3.0], 2.0, 5.0);
        assert_eq!(assembly.elements.len(), 1);
        assert_eq!(assembly.global.nrows(), 4);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(assembly.global[(row, col)], assembly.elements[0][(row, col)]);
            }
        }
    }

    #[test]
    fn shared_node_accumulates() {
        let nodes = [0.0, 2.0, 5.0];
        let assembly = assemble(&nodes, 1.0, 1.0);
        let first = element_stiffness(2.0, 1.0, 1.0);
        let second = element_stiffness(3.0, 1.0, 1.0);
        assert_relative_eq!(assembly.global[(2, 2)], first[(2, 2)] + second[(0, 0)]);
        assert_relative_eq!(assembly.global[(3, 3)], first[(3, 3)] + second[(1, 1)]);
        assert_relative_eq!(assembly.global[(2, 3)], first[(2, 3)] + second[(0, 1)]);
        assert_eq!(assembly.global[(0, 4)], 0.0);
        assert_eq!(assembly.global[(1, 5)], 0.0);
    }

    #[test]
    fn global_is_symmetric_and_free_of_rigid_body_forces() {
        let nodes = [0.0, 1.5, 4.0, 4.5, 9.0];
        let assembly = assemble(&nodes, 210.0e6, 8.0e-6);
        let k = &assembly.global;
        assert_eq!(k, &k.transpose());

        let scale = k.amax();
        let translation = DVector::from_fn(nodes.len() * 2, |dof, _| {
            if dof % 2 == 0 {
                1.0
            } else {
                0.0
            }
        });
        let rotation = DVector::from_fn(nodes.len() * 2, |dof, _| {
            if dof % 2 == 0 {
                nodes[dof / 2]
            } else {
                1.0
            }
        });
        for mode in [translation, rotation] {
            let forces = k * mode;
            assert_relative_eq!(forces.amax() / scale, 0.0, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn empty_node_list_gives_empty_matrix() {
        let assembly = assemble(&[], 1.0, 1.0);
        assert!(assembly.elements.is_empty());
        assert_eq!(assembly.global.nrows(), 0);
    }
}
