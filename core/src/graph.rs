use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::matrix::BitMatrix;

/// Dense node index in `0..node_count`.
pub type NodeId = usize;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Undirected {}
    impl Sealed for super::Directed {}
}

/// Selects edge symmetry for [`AdjGraph`]. Implemented only by
/// [`Undirected`] and [`Directed`].
pub trait EdgeKind: sealed::Sealed + Copy + Eq + Hash + Default + fmt::Debug + 'static {
    const DIRECTED: bool;
    /// Leading keyword of the textual rendering.
    const KEYWORD: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Undirected;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Directed;

impl EdgeKind for Undirected {
    const DIRECTED: bool = false;
    const KEYWORD: &'static str = "graph";
}

impl EdgeKind for Directed {
    const DIRECTED: bool = true;
    const KEYWORD: &'static str = "digraph";
}

/// An edge as listed by [`AdjGraph::edges`]. For undirected graphs
/// `source <= target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.source, self.target)
    }
}

/// Fixed-size graph over an `n × n` adjacency bit matrix.
///
/// Node count never changes in place; [`AdjGraph::grow`] returns a larger
/// copy. For [`Undirected`] every mutation writes both `(u, v)` and
/// `(v, u)`, so the matrix stays symmetric.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AdjGraph<K: EdgeKind> {
    node_count: usize,
    pub(crate) adj: BitMatrix,
    kind: PhantomData<K>,
}

/// Undirected graph.
pub type Graph = AdjGraph<Undirected>;

/// Directed graph.
pub type DiGraph = AdjGraph<Directed>;

impl<K: EdgeKind> AdjGraph<K> {
    /// Edgeless graph with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            adj: BitMatrix::square(node_count),
            kind: PhantomData,
        }
    }

    /// Build a graph and add every `(source, target)` pair.
    /// Pairs naming a node outside the graph are skipped.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut g = Self::new(node_count);
        for (source, target) in edges {
            g.add_edge(source, target);
        }
        g
    }

    pub fn is_directed(&self) -> bool {
        K::DIRECTED
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        node < self.node_count
    }

    /// False when either endpoint is outside the graph.
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.has_node(source) && self.has_node(target) && self.adj.get(source, target)
    }

    /// No-op when either endpoint is outside the graph.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        self.write_edge(source, target, true);
    }

    /// No-op when either endpoint is outside the graph.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) {
        self.write_edge(source, target, false);
    }

    fn write_edge(&mut self, source: NodeId, target: NodeId, present: bool) {
        if !self.has_node(source) || !self.has_node(target) {
            return;
        }
        self.adj.set(source, target, present);
        if !K::DIRECTED {
            self.adj.set(target, source, present);
        }
    }

    /// New graph with `extra` more nodes. Existing edges keep their indices;
    /// the new nodes are isolated.
    pub fn grow(&self, extra: usize) -> Self {
        let mut grown = Self::new(self.node_count + extra);
        self.adj.copy_into(&mut grown.adj);
        grown
    }

    /// Remove every edge, keeping the node count.
    pub fn clear_edges(&mut self) {
        self.adj.reset();
    }

    /// Clear every `(i, i)` cell.
    pub fn remove_self_loops(&mut self) {
        for i in 0..self.node_count {
            self.adj.set(i, i, false);
        }
    }

    /// Out-neighbors of `node` in ascending order; empty when `node` is
    /// outside the graph.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.has_node(node)
            .then(|| self.adj.row_ones(node))
            .into_iter()
            .flatten()
    }

    /// Edges in row-major order, each listed once.
    ///
    /// Undirected edges come from the lower triangle and are reported with
    /// the smaller endpoint first.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adj.iter_ones().filter_map(|(row, column)| {
            if K::DIRECTED {
                Some(Edge::new(row, column))
            } else if column <= row {
                Some(Edge::new(column, row))
            } else {
                None
            }
        })
    }

    pub fn edge_count(&self) -> usize {
        if K::DIRECTED {
            self.adj.count_ones()
        } else {
            self.edges().count()
        }
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.adj.memory_usage()
    }
}

impl<K: EdgeKind> Default for AdjGraph<K> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K: EdgeKind> fmt::Display for AdjGraph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {{", K::KEYWORD, self.node_count)?;
        for (i, edge) in self.edges().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{edge}")?;
        }
        f.write_str("}")
    }
}

impl<K: EdgeKind> fmt::Debug for AdjGraph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
