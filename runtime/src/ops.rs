//! Graph entry points called by generated code.
//!
//! Each function serves both `graph` and `digraph` values. Fallible ones
//! set the register to `NoError` on entry, validate, and on failure record
//! the fault and return a harmless value (no mutation, or an empty graph of
//! the operand's kind) instead of calling into the core.

use graphrt_core::{AdjGraph, EdgeKind, NodeId};

use crate::fault::ErrorKind;
use crate::register;
use crate::util::{clamp_non_negative, node_index};

/// Edgeless graph; a negative count yields zero nodes.
pub fn new_graph<K: EdgeKind>(node_count: i32) -> AdjGraph<K> {
    AdjGraph::new(clamp_non_negative(node_count, "node_count"))
}

pub fn has_node<K: EdgeKind>(graph: &AdjGraph<K>, node: i32) -> bool {
    node_index(graph, node).is_some()
}

/// False for out-of-range endpoints; absence is not a fault.
pub fn has_edge<K: EdgeKind>(graph: &AdjGraph<K>, source: i32, target: i32) -> bool {
    match (node_index(graph, source), node_index(graph, target)) {
        (Some(s), Some(t)) => graph.has_edge(s, t),
        _ => false,
    }
}

fn endpoints<K: EdgeKind>(
    op: &'static str,
    graph: &AdjGraph<K>,
    source: i32,
    target: i32,
) -> Option<(NodeId, NodeId)> {
    match (node_index(graph, source), node_index(graph, target)) {
        (Some(s), Some(t)) => Some((s, t)),
        _ => {
            register::raise(
                op,
                ErrorKind::NodeNotInGraph,
                &format_args!(
                    "edge ({}, {}) outside graph of {} nodes",
                    source,
                    target,
                    graph.node_count()
                ),
            );
            None
        }
    }
}

/// Sets `NodeNotInGraph` and leaves the graph unchanged if either endpoint
/// is out of range.
pub fn add_edge<K: EdgeKind>(graph: &mut AdjGraph<K>, source: i32, target: i32) {
    register::begin("add_edge");
    if let Some((s, t)) = endpoints("add_edge", graph, source, target) {
        graph.add_edge(s, t);
    }
}

/// Sets `NodeNotInGraph` and leaves the graph unchanged if either endpoint
/// is out of range.
pub fn remove_edge<K: EdgeKind>(graph: &mut AdjGraph<K>, source: i32, target: i32) {
    register::begin("remove_edge");
    if let Some((s, t)) = endpoints("remove_edge", graph, source, target) {
        graph.remove_edge(s, t);
    }
}

/// New graph with `count` extra isolated nodes. Does not touch the register.
pub fn add_nodes<K: EdgeKind>(graph: &AdjGraph<K>, count: i32) -> AdjGraph<K> {
    graph.grow(clamp_non_negative(count, "count"))
}

pub fn clear_edges<K: EdgeKind>(graph: &mut AdjGraph<K>) {
    graph.clear_edges();
}

pub fn remove_loops<K: EdgeKind>(graph: &mut AdjGraph<K>) {
    graph.remove_self_loops();
}

pub fn negation<K: EdgeKind>(graph: &AdjGraph<K>) -> AdjGraph<K> {
    graph.negate()
}

/// BFS shortest-path tree from `source`. An out-of-range source sets
/// `NodeNotInGraph` and yields a zero-node graph.
pub fn shortest_path<K: EdgeKind>(graph: &AdjGraph<K>, source: i32) -> AdjGraph<K> {
    register::begin("shortest_path");
    match node_index(graph, source) {
        Some(s) => graph.shortest_path_tree(s),
        None => {
            register::raise(
                "shortest_path",
                ErrorKind::NodeNotInGraph,
                &format_args!(
                    "source {} outside graph of {} nodes",
                    source,
                    graph.node_count()
                ),
            );
            AdjGraph::new(0)
        }
    }
}

fn same_size<K: EdgeKind>(op: &'static str, a: &AdjGraph<K>, b: &AdjGraph<K>) -> bool {
    register::begin(op);
    if a.node_count() == b.node_count() {
        return true;
    }
    register::raise(
        op,
        ErrorKind::GraphSizeMismatch,
        &format_args!("{} nodes vs {} nodes", a.node_count(), b.node_count()),
    );
    false
}

/// Edges in both operands, or a zero-node graph with `GraphSizeMismatch`.
pub fn intersection<K: EdgeKind>(a: &AdjGraph<K>, b: &AdjGraph<K>) -> AdjGraph<K> {
    if same_size("intersection", a, b) {
        a.intersect(b)
    } else {
        AdjGraph::new(0)
    }
}

/// Edges in either operand, or a zero-node graph with `GraphSizeMismatch`.
pub fn union<K: EdgeKind>(a: &AdjGraph<K>, b: &AdjGraph<K>) -> AdjGraph<K> {
    if same_size("union", a, b) {
        a.union(b)
    } else {
        AdjGraph::new(0)
    }
}

/// Edges of `a` not in `b`, or a zero-node graph with `GraphSizeMismatch`.
pub fn difference<K: EdgeKind>(a: &AdjGraph<K>, b: &AdjGraph<K>) -> AdjGraph<K> {
    if same_size("difference", a, b) {
        a.difference(b)
    } else {
        AdjGraph::new(0)
    }
}

pub fn to_string<K: EdgeKind>(graph: &AdjGraph<K>) -> String {
    graph.to_string()
}
