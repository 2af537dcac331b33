//! graphrt-core: storage and algorithms behind the graph language's
//! `graph` and `digraph` values.
//!
//! Adjacency lives in a bit-packed `n × n` matrix. [`Graph`] and [`DiGraph`]
//! share one implementation and differ only in whether edge writes are
//! mirrored. Everything here assumes validated input: out-of-range nodes
//! are absent or ignored, and storage bounds violations panic.
//!
//! No logging and no global state; the runtime crate layers error
//! reporting on top.

mod algebra;
mod bits;
mod graph;
mod matrix;
mod traversal;

pub use bits::{BitVector, IndexOutOfRange, Word, WORD_BITS};
pub use graph::{AdjGraph, DiGraph, Directed, Edge, EdgeKind, Graph, NodeId, Undirected};
pub use matrix::BitMatrix;
