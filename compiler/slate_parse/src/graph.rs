//! The built control-flow graph.

use std::fmt;

use slate_diagnostic::Diagnostic;
use slate_ir::{NodeArena, NodeId, StatementNode};

/// Statement nodes of one script and their successor edges.
///
/// The graph owns its arena exclusively; edges are arena indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlFlowGraph {
    arena: NodeArena,
    warnings: Vec<Diagnostic>,
}

impl ControlFlowGraph {
    pub(crate) fn new(arena: NodeArena, warnings: Vec<Diagnostic>) -> Self {
        ControlFlowGraph { arena, warnings }
    }

    /// Non-fatal problems found while building, such as unclosed blocks.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// The first statement, where execution starts.
    pub fn entry(&self) -> Option<NodeId> {
        (!self.arena.is_empty()).then_some(NodeId::new(0))
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&StatementNode> {
        self.arena.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// All nodes in source order.
    #[inline]
    pub fn nodes(&self) -> &[StatementNode] {
        self.arena.nodes()
    }

    /// Iterate over `(id, node)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &StatementNode)> {
        self.arena.iter()
    }

    /// The node after `id` in source order.
    #[inline]
    pub fn successor_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.successor_of(id)
    }

    /// Borrow the underlying arena.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }
}

/// One row per node: `[index] text -> [true, false]`, `-` for unset edges.
impl fmt::Display for ControlFlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn edge(e: Option<NodeId>) -> String {
            e.map_or_else(|| "-".to_string(), |id| id.to_string())
        }
        for (id, node) in self.iter() {
            writeln!(
                f,
                "[{id}] {:<25} -> [{}, {}]",
                node.text,
                edge(node.true_edge),
                edge(node.false_edge)
            )?;
        }
        Ok(())
    }
}
