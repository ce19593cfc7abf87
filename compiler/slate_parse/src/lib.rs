//! Slate structural parser.
//!
//! Turns an indented script into a [`ControlFlowGraph`]: one
//! [`StatementNode`](slate_ir::StatementNode) per non-blank line, linked by
//! true/false successor edges. `IF`/`ELIF`/`ELSE`/`ENDIF` nesting is resolved
//! from indentation with a stack of open blocks.
//!
//! Condition text is stored verbatim on its node; the parser never
//! evaluates it. Malformed nesting is fatal: there is no partial graph.
//!
//! # Debugging
//!
//! - `RUST_LOG=slate_parse=debug` logs every node allocation and link.

mod builder;
mod error;
mod graph;

pub use builder::{build_graph, build_graph_with, GraphBuilder, ParseConfig};
pub use error::StructureError;
pub use graph::ControlFlowGraph;
