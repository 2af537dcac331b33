//! Edge-set algebra. Every operation returns a fresh graph and leaves its
//! operands untouched.
//!
//! Binary operations require equal node counts and panic otherwise; the
//! runtime entry points check sizes before calling in.

use crate::graph::{AdjGraph, EdgeKind};
use crate::matrix::BitMatrix;

impl<K: EdgeKind> AdjGraph<K> {
    /// Complement: every absent cell becomes present and vice versa,
    /// including the diagonal.
    pub fn negate(&self) -> Self {
        let mut result = self.clone();
        result.adj.invert();
        result
    }

    /// Edges present in both graphs.
    pub fn intersect(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a.and_assign(b))
    }

    /// Edges present in either graph.
    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a.or_assign(b))
    }

    /// Edges of `self` that are absent from `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a.and_not_assign(b))
    }

    fn combine(&self, other: &Self, op: impl FnOnce(&mut BitMatrix, &BitMatrix)) -> Self {
        assert_eq!(
            self.node_count(),
            other.node_count(),
            "graph algebra on graphs of different sizes"
        );
        let mut result = self.clone();
        op(&mut result.adj, &other.adj);
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{DiGraph, Graph};

    fn make_path(n: usize) -> Graph {
        Graph::from_edges(n, (0..n.saturating_sub(1)).map(|i| (i, i + 1)))
    }

    #[test]
    fn test_negate_flips_every_cell() {
        let g = Graph::from_edges(3, [(0, 1)]);
        let n = g.negate();
        assert!(!n.has_edge(0, 1));
        assert!(!n.has_edge(1, 0));
        assert!(n.has_edge(0, 2));
        assert!(n.has_edge(2, 1));
        assert!(n.has_edge(1, 1), "diagonal is negated too");
        // Operand untouched
        assert!(g.has_edge(0, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_negate_keeps_symmetry() {
        let n = make_path(6).negate();
        for u in 0..6 {
            for v in 0..6 {
                assert_eq!(n.has_edge(u, v), n.has_edge(v, u));
            }
        }
    }

    #[test]
    fn test_negate_involutive() {
        let d = DiGraph::from_edges(5, [(0, 4), (4, 0), (2, 3), (3, 3)]);
        assert_eq!(d.negate().negate(), d);
    }

    #[test]
    fn test_negate_empty_graph() {
        assert_eq!(Graph::new(0).negate(), Graph::new(0));
    }

    #[test]
    fn test_intersect() {
        let a = DiGraph::from_edges(3, [(0, 1), (1, 2)]);
        let b = DiGraph::from_edges(3, [(1, 2), (2, 0)]);
        assert_eq!(a.intersect(&b), DiGraph::from_edges(3, [(1, 2)]));
        assert_eq!(a.intersect(&a), a);
    }

    #[test]
    fn test_union() {
        let a = Graph::from_edges(4, [(0, 1)]);
        let b = Graph::from_edges(4, [(2, 3)]);
        let u = a.union(&b);
        assert_eq!(u, Graph::from_edges(4, [(0, 1), (2, 3)]));
        assert_eq!(a.edge_count(), 1);
    }

    #[test]
    fn test_union_with_negation_is_complete() {
        let g = make_path(5);
        let all = g.union(&g.negate());
        for u in 0..5 {
            for v in 0..5 {
                assert!(all.has_edge(u, v));
            }
        }
    }

    #[test]
    fn test_difference() {
        let a = DiGraph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let b = DiGraph::from_edges(3, [(1, 2), (1, 0)]);
        assert_eq!(a.difference(&b), DiGraph::from_edges(3, [(0, 1), (2, 0)]));
        assert_eq!(a.difference(&a).edge_count(), 0);
    }

    #[test]
    #[should_panic(expected = "different sizes")]
    fn test_size_mismatch_panics() {
        Graph::new(3).union(&Graph::new(4));
    }
}
