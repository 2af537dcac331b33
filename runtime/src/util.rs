use graphrt_core::{AdjGraph, EdgeKind, NodeId};
use tracing::warn;

/// Convert a language-level node index, returning None when it falls
/// outside `[0, node_count)`.
pub fn node_index<K: EdgeKind>(graph: &AdjGraph<K>, index: i32) -> Option<NodeId> {
    usize::try_from(index)
        .ok()
        .filter(|&node| graph.has_node(node))
}

/// Convert a count or growth amount. Negative values clamp to zero with a
/// warning; these arguments have no fault code of their own.
pub fn clamp_non_negative(value: i32, param_name: &str) -> usize {
    usize::try_from(value).unwrap_or_else(|_| {
        warn!(param = param_name, value, "negative argument treated as 0");
        0
    })
}
