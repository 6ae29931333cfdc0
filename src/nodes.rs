//! Analysis node generation.

/// Derive the sorted analysis nodes for a beam of `length`.
///
/// The nodes are both beam ends plus every referenced position that lies on
/// the beam. Positions outside `[0, length]` or not finite are ignored, and
/// duplicates are removed by exact equality. A non-positive length yields no
/// nodes.
///
/// # Examples
/// ```
/// use beamx::generate_nodes;
///
/// let nodes = generate_nodes(10.0, [3.0, 10.0, 3.0, 12.0]);
/// assert_eq!(nodes, vec![0.0, 3.0, 10.0]);
/// ```
#[must_use]
pub fn generate_nodes<I>(length: f64, positions: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    if !(length.is_finite() && length > 0.0) {
        return Vec::new();
    }
    let mut nodes: Vec<f64> = [0.0, length]
        .into_iter()
        .chain(positions)
        .filter(|position| (0.0..=length).contains(position))
        .collect();
    nodes.sort_by(f64::total_cmp);
    nodes.dedup();
    nodes
}

/// Index of the node at exactly `position`.
#[must_use]
pub fn node_index(nodes: &[f64], position: f64) -> Option<usize> {
    nodes.iter().position(|&node| node == position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_contains_both_ends() {
        assert_eq!(generate_nodes(6.0, []), vec![0.0, 6.0]);
    }

    #[test]
    fn sorts_and_deduplicates() {
        let nodes = generate_nodes(10.0, [7.5, 2.0, 0.0, 7.5, 5.0, 2.0]);
        assert_eq!(nodes, vec![0.0, 2.0, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn ignores_positions_off_the_beam() {
        let nodes = generate_nodes(4.0, [-1.0, 5.0, f64::NAN, 1.0]);
        assert_eq!(nodes, vec![0.0, 1.0, 4.0]);
    }

    #[test]
    fn missing_length_gives_no_nodes() {
        assert!(generate_nodes(0.0, [1.0]).is_empty());
        assert!(generate_nodes(-3.0, []).is_empty());
    }

    #[test]
    fn looks_up_nodes_exactly() {
        let nodes = [0.0, 2.5, 5.0];
        assert_eq!(node_index(&nodes, 2.5), Some(1));
        assert_eq!(node_index(&nodes, 2.500_001), None);
    }
}
