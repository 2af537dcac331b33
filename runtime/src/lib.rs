//! graphrt: runtime entry points for the graph language.
//!
//! Wraps graphrt-core with the calling convention generated code expects:
//! language integers in, a usable value out, and the outcome recorded in a
//! per-thread error register instead of unwinding.
//!
//! ```
//! use graphrt::{ops, register, ErrorKind};
//! use graphrt_core::Graph;
//!
//! let a: Graph = ops::new_graph(3);
//! let b: Graph = ops::new_graph(4);
//! let c = ops::intersection(&a, &b);
//! assert_eq!(register::last_error(), ErrorKind::GraphSizeMismatch);
//! assert_eq!(c.node_count(), 0);
//! ```

pub mod assertion;
pub mod convert;
mod fault;
mod logging;
pub mod ops;
pub mod register;
pub mod settings;
pub mod status;
mod util;

pub use assertion::{assert_holds, AssertionFailed};
pub use fault::{Checked, ErrorKind, RuntimeFault};
pub use logging::init_logging;
pub use settings::{Settings, SettingsError};
pub use status::RuntimeStatus;

pub use graphrt_core::{DiGraph, Graph};
