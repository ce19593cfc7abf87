//! Indentation-driven graph construction.
//!
//! Every non-blank line becomes a node, control keywords included. Lines
//! are processed in order against a stack of open control blocks:
//!
//! - `IF` opens a block.
//! - `ELIF`/`ELSE` first discards blocks indented deeper than itself, then
//!   becomes the false successor of the block on top and opens a branch.
//! - `ENDIF` pops up to and including the nearest `IF`. The `IF` falls
//!   through to the `ENDIF` if it had no other branch, and the last
//!   statement of every branch body joins at the `ENDIF`.
//! - Any other line is the true successor of the line before it.

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use slate_diagnostic::{Diagnostic, ErrorCode};
use slate_ir::{NodeArena, NodeId, StatementKind, StatementNode, DEFAULT_CAPACITY};

use crate::{ControlFlowGraph, StructureError};

/// Structural parser configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum number of statement nodes in one script.
    pub capacity: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Build the graph for `source` with the default configuration.
pub fn build_graph(source: &str) -> Result<ControlFlowGraph, StructureError> {
    build_graph_with(source, ParseConfig::default())
}

/// Build the graph for `source`.
///
/// Blank lines are skipped but still counted, so node line numbers match
/// the source. Comment lines are ordinary statements here.
#[tracing::instrument(level = "debug", skip(source))]
pub fn build_graph_with(
    source: &str,
    config: ParseConfig,
) -> Result<ControlFlowGraph, StructureError> {
    let mut builder = GraphBuilder::new(config);
    for (index, raw) in source.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        builder.push_line(index + 1, raw)?;
    }
    Ok(builder.finish())
}

/// Which keyword opened a control block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BlockKind {
    If,
    Elif,
    Else,
}

/// An open control block. Lives only while its script is being parsed.
#[derive(Clone, Debug)]
struct ControlFrame {
    kind: BlockKind,
    node: NodeId,
    indent: usize,
    /// Branch nodes (`ELIF`/`ELSE`) chained off this block's false edge.
    branches: SmallVec<[NodeId; 4]>,
}

impl ControlFrame {
    fn new(kind: BlockKind, node: NodeId, indent: usize) -> Self {
        ControlFrame {
            kind,
            node,
            indent,
            branches: SmallVec::new(),
        }
    }
}

/// Incremental graph builder, fed one raw line at a time.
pub struct GraphBuilder {
    arena: NodeArena,
    stack: Vec<ControlFrame>,
    prev: Option<NodeId>,
}

impl GraphBuilder {
    pub fn new(config: ParseConfig) -> Self {
        GraphBuilder {
            arena: NodeArena::with_capacity(config.capacity),
            stack: Vec::new(),
            prev: None,
        }
    }

    /// Add one non-blank source line and link it into the graph.
    pub fn push_line(&mut self, line: usize, raw: &str) -> Result<NodeId, StructureError> {
        let indent = raw.len() - raw.trim_start_matches(' ').len();
        let text = raw.trim();
        let kind = StatementKind::classify(text);

        let cur = self
            .arena
            .alloc(StatementNode::new(text, indent, line))
            .ok_or(StructureError::CapacityExceeded {
                capacity: self.arena.capacity(),
                line,
            })?;
        debug!(node = %cur, indent, ?kind, text, "allocated statement node");

        match kind {
            StatementKind::If => {
                self.stack.push(ControlFrame::new(BlockKind::If, cur, indent));
            }
            StatementKind::Elif => self.open_branch(BlockKind::Elif, cur, indent, line)?,
            StatementKind::Else => self.open_branch(BlockKind::Else, cur, indent, line)?,
            StatementKind::Endif => self.close_block(cur, line)?,
            StatementKind::Plain => {
                if let Some(prev) = self.prev {
                    self.set_true(prev, cur);
                }
            }
        }

        self.prev = Some(cur);
        Ok(cur)
    }

    /// Finish building. Blocks still open at the end are left unresolved
    /// and reported as one `W1001` warning per open `IF`.
    pub fn finish(self) -> ControlFlowGraph {
        let warnings: Vec<Diagnostic> = self
            .stack
            .iter()
            .filter(|frame| frame.kind == BlockKind::If)
            .filter_map(|frame| self.arena.get(frame.node))
            .map(|node| {
                Diagnostic::warning(ErrorCode::W1001)
                    .with_message(format!("`IF` on line {} is never closed", node.line))
                    .at_line(node.line)
                    .with_note("add a matching ENDIF")
            })
            .collect();
        if !warnings.is_empty() {
            warn!(open = warnings.len(), "script ended with unclosed blocks");
        }
        ControlFlowGraph::new(self.arena, warnings)
    }

    fn open_branch(
        &mut self,
        kind: BlockKind,
        cur: NodeId,
        indent: usize,
        line: usize,
    ) -> Result<(), StructureError> {
        while self.stack.last().is_some_and(|frame| frame.indent > indent) {
            if let Some(frame) = self.stack.pop() {
                trace!(node = %frame.node, "discarding deeper block");
            }
        }

        let Some(top) = self.stack.last_mut() else {
            return Err(StructureError::UnmatchedBranch {
                keyword: if kind == BlockKind::Elif { "ELIF" } else { "ELSE" },
                line,
            });
        };
        top.branches.push(cur);
        let top_node = top.node;

        self.set_false(top_node, cur);
        self.stack.push(ControlFrame::new(kind, cur, indent));
        Ok(())
    }

    fn close_block(&mut self, endif: NodeId, line: usize) -> Result<(), StructureError> {
        let mut block: SmallVec<[ControlFrame; 4]> = SmallVec::new();
        loop {
            match self.stack.pop() {
                None => return Err(StructureError::UnmatchedEndif { line }),
                Some(frame) if frame.kind == BlockKind::If => {
                    block.push(frame);
                    break;
                }
                Some(frame) => block.push(frame),
            }
        }
        block.sort_by_key(|frame| frame.node);

        for frame in &block {
            // An IF without branches, or a trailing ELIF, falls through to
            // the ENDIF when its condition fails.
            if frame.kind != BlockKind::Else && self.false_edge(frame.node).is_none() {
                self.set_false(frame.node, endif);
            }

            let last = self.last_statement(frame, endif);
            self.set_true(last, endif);
        }

        if let Some(head) = block.first() {
            debug!(
                if_node = %head.node,
                endif = %endif,
                branches = ?head.branches,
                "closed block"
            );
        }
        Ok(())
    }

    /// Last node of a branch body: the furthest node before `endif` reached
    /// while indentation stays deeper than the branch line. An empty body
    /// yields the branch node itself.
    fn last_statement(&self, frame: &ControlFrame, endif: NodeId) -> NodeId {
        let mut last = frame.node;
        let mut next = self.arena.successor_of(last);
        while let Some(id) = next.filter(|id| *id < endif) {
            match self.arena.get(id) {
                Some(node) if node.indent > frame.indent => {
                    last = id;
                    next = self.arena.successor_of(id);
                }
                _ => break,
            }
        }
        last
    }

    fn false_edge(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.false_edge)
    }

    fn set_true(&mut self, from: NodeId, to: NodeId) {
        if let Some(node) = self.arena.get_mut(from) {
            trace!(from = %from, to = %to, "true edge");
            node.true_edge = Some(to);
        }
    }

    fn set_false(&mut self, from: NodeId, to: NodeId) {
        if let Some(node) = self.arena.get_mut(from) {
            trace!(from = %from, to = %to, "false edge");
            node.false_edge = Some(to);
        }
    }
}
