use std::collections::VecDeque;

use crate::bits::BitVector;
use crate::graph::{AdjGraph, EdgeKind, NodeId};

/// BFS from `start` over out-edges, returning each node's parent on one
/// shortest path. `start` and unreachable nodes have no parent.
///
/// Neighbors are expanded in ascending index order, so among equally short
/// paths the one through the lowest-numbered discoverer wins.
fn bfs_parents<K: EdgeKind>(graph: &AdjGraph<K>, start: NodeId) -> Vec<Option<NodeId>> {
    let n = graph.node_count();
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    if !graph.has_node(start) {
        return parent;
    }

    let mut visited = BitVector::new(n);
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    visited.set(start, true);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors(current) {
            if !visited.get(next) {
                visited.set(next, true);
                parent[next] = Some(current);
                queue.push_back(next);
            }
        }
    }

    parent
}

impl<K: EdgeKind> AdjGraph<K> {
    /// Shortest-hop spanning tree of everything reachable from `source`.
    ///
    /// The result has the same node count and kind and contains exactly the
    /// BFS parent edges `parent[v] -> v`. No self-loop is added at `source`;
    /// unreachable nodes stay isolated. A `source` outside the graph yields
    /// an edgeless graph.
    pub fn shortest_path_tree(&self, source: NodeId) -> Self {
        let mut tree = Self::new(self.node_count());
        for (node, parent) in bfs_parents(self, source).into_iter().enumerate() {
            if let Some(parent) = parent {
                tree.add_edge(parent, node);
            }
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, Edge, Graph};

    fn make_chain(n: usize) -> Graph {
        Graph::from_edges(n, (0..n - 1).map(|i| (i, i + 1)))
    }

    fn make_star(leaves: usize) -> Graph {
        Graph::from_edges(leaves + 1, (1..=leaves).map(|i| (0, i)))
    }

    fn make_cycle(n: usize) -> DiGraph {
        DiGraph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    /// Hop distances from `start`, None when unreachable.
    fn distances<K: EdgeKind>(g: &AdjGraph<K>, start: NodeId) -> Vec<Option<u32>> {
        let mut dist = vec![None; g.node_count()];
        let mut queue = VecDeque::new();
        dist[start] = Some(0);
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            for v in g.neighbors(u) {
                if dist[v].is_none() {
                    dist[v] = Some(dist[u].unwrap() + 1);
                    queue.push_back(v);
                }
            }
        }
        dist
    }

    // --- BFS tree tests ---

    #[test]
    fn test_tree_chain() {
        let g = make_chain(5);
        let tree = g.shortest_path_tree(0);
        assert_eq!(tree, g);
    }

    #[test]
    fn test_tree_from_middle_of_chain() {
        let g = make_chain(5);
        let tree = g.shortest_path_tree(2);
        assert_eq!(tree.edge_count(), 4);
        assert!(tree.has_edge(2, 1));
        assert!(tree.has_edge(1, 0));
        assert!(tree.has_edge(2, 3));
        assert!(tree.has_edge(3, 4));
    }

    #[test]
    fn test_tree_star() {
        let g = make_star(10);
        assert_eq!(g.shortest_path_tree(0), g);

        // From a leaf every other leaf hangs off the hub.
        let tree = g.shortest_path_tree(3);
        assert_eq!(tree.edge_count(), 10);
        assert!(tree.has_edge(3, 0));
        assert!((1..=10).filter(|&i| i != 3).all(|i| tree.has_edge(0, i)));
    }

    #[test]
    fn test_tree_tie_broken_by_lowest_index() {
        // 0 reaches 3 through both 1 and 2; node 1 is expanded first.
        let g = Graph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]);
        let tree = g.shortest_path_tree(0);
        assert!(tree.has_edge(1, 3));
        assert!(!tree.has_edge(2, 3));
        assert_eq!(
            tree.edges().collect::<Vec<_>>(),
            vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)]
        );
    }

    #[test]
    fn test_tree_deterministic() {
        let g = Graph::from_edges(8, [(0, 5), (5, 7), (0, 2), (2, 7), (7, 1), (3, 4)]);
        assert_eq!(g.shortest_path_tree(0), g.shortest_path_tree(0));
    }

    #[test]
    fn test_tree_edges_step_one_hop_closer() {
        let g = Graph::from_edges(
            9,
            [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 5), (2, 5), (6, 7)],
        );
        let dist = distances(&g, 0);
        let tree = g.shortest_path_tree(0);

        // Every reachable non-source node has exactly one tree edge to a
        // neighbor at distance d - 1.
        for v in 1..9 {
            match dist[v] {
                Some(d) => {
                    let parents: Vec<_> = tree
                        .neighbors(v)
                        .filter(|&u| dist[u] == Some(d - 1))
                        .collect();
                    assert_eq!(parents.len(), 1, "node {} should have one parent", v);
                    assert!(g.has_edge(parents[0], v));
                }
                None => assert_eq!(tree.neighbors(v).count(), 0, "node {} is unreachable", v),
            }
        }
        assert_eq!(tree.edge_count(), 5);
    }

    #[test]
    fn test_tree_unreachable_isolated() {
        let g = Graph::from_edges(5, [(0, 1), (3, 4)]);
        let tree = g.shortest_path_tree(0);
        assert_eq!(tree.edges().collect::<Vec<_>>(), vec![Edge::new(0, 1)]);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_tree_ignores_self_loops() {
        let g = Graph::from_edges(3, [(0, 0), (0, 1), (1, 1)]);
        let tree = g.shortest_path_tree(0);
        assert!(!tree.has_edge(0, 0));
        assert!(!tree.has_edge(1, 1));
        assert!(tree.has_edge(0, 1));
    }

    #[test]
    fn test_tree_single_node() {
        let g = Graph::from_edges(1, [(0, 0)]);
        assert_eq!(g.shortest_path_tree(0), Graph::new(1));
    }

    #[test]
    fn test_tree_source_out_of_range() {
        let g = make_chain(3);
        assert_eq!(g.shortest_path_tree(7), Graph::new(3));
    }

    // --- Directed ---

    #[test]
    fn test_directed_tree_follows_out_edges() {
        let d = make_cycle(4);
        let tree = d.shortest_path_tree(1);
        assert_eq!(tree, DiGraph::from_edges(4, [(1, 2), (2, 3), (3, 0)]));
    }

    #[test]
    fn test_directed_tree_against_edge_direction() {
        // 1 -> 0, so 0 cannot reach 1.
        let d = DiGraph::from_edges(3, [(1, 0), (0, 2)]);
        let tree = d.shortest_path_tree(0);
        assert_eq!(tree.edges().collect::<Vec<_>>(), vec![Edge::new(0, 2)]);
        assert!(tree.is_directed());
    }

    #[test]
    fn test_directed_tree_rendering() {
        let d = DiGraph::from_edges(3, [(0, 2), (2, 1)]);
        assert_eq!(
            d.shortest_path_tree(0).to_string(),
            "digraph [3] {[0, 2], [2, 1]}"
        );
    }
}
