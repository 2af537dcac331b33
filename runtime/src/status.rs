use serde::Serialize;

use crate::fault::ErrorKind;
use crate::register;

/// Fault counts for one thread, keyed by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FaultCounts {
    pub graph_size_mismatch: u64,
    pub node_not_in_graph: u64,
    pub cast_error: u64,
    pub index_out_of_range: u64,
}

/// Snapshot of the calling thread's error register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeStatus {
    pub last_error: ErrorKind,
    pub last_error_code: u8,
    /// Fallible entry-point calls made on this thread.
    pub calls: u64,
    pub faults: FaultCounts,
}

impl RuntimeStatus {
    pub fn total_faults(&self) -> u64 {
        let f = &self.faults;
        f.graph_size_mismatch + f.node_not_in_graph + f.cast_error + f.index_out_of_range
    }

    pub fn to_json(&self) -> String {
        // Serializing plain integers and unit variants cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub fn snapshot() -> RuntimeStatus {
    register::with_state(|state| {
        let count = |kind: ErrorKind| state.faults[kind.code() as usize];
        RuntimeStatus {
            last_error: state.last,
            last_error_code: state.last.code(),
            calls: state.calls,
            faults: FaultCounts {
                graph_size_mismatch: count(ErrorKind::GraphSizeMismatch),
                node_not_in_graph: count(ErrorKind::NodeNotInGraph),
                cast_error: count(ErrorKind::CastError),
                index_out_of_range: count(ErrorKind::IndexOutOfRange),
            },
        }
    })
}

/// Zero this thread's counters and clear the register.
pub fn reset() {
    register::reset_state();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::string_to_int;
    use crate::ops;
    use graphrt_core::Graph;

    #[test]
    fn test_snapshot_counts_calls_and_faults() {
        reset();
        string_to_int("1");
        string_to_int("x");
        let mut g: Graph = ops::new_graph(2);
        ops::add_edge(&mut g, 0, 9);

        let s = snapshot();
        assert_eq!(s.calls, 3);
        assert_eq!(s.faults.cast_error, 1);
        assert_eq!(s.faults.node_not_in_graph, 1);
        assert_eq!(s.total_faults(), 2);
        assert_eq!(s.last_error, ErrorKind::NodeNotInGraph);
        assert_eq!(s.last_error_code, 2);
    }

    #[test]
    fn test_non_fallible_calls_not_counted() {
        reset();
        let g: Graph = ops::new_graph(3);
        let _ = ops::add_nodes(&g, 2);
        let _ = ops::negation(&g);
        assert_eq!(snapshot().calls, 0);
    }

    #[test]
    fn test_json() {
        reset();
        let json = snapshot().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["last_error"], "NO_ERROR");
        assert_eq!(value["calls"], 0);
        assert_eq!(value["faults"]["cast_error"], 0);
    }
}
