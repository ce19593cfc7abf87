//! Statement nodes and the arena that owns them.

use crate::NodeId;

/// Arena capacity used when no explicit capacity is configured.
pub const DEFAULT_CAPACITY: usize = 300;

/// One source line of a script, linked to its successors.
///
/// `true_edge` is the sequential (or condition-holds) successor and
/// `false_edge` the condition-fails successor. Either may be unset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatementNode {
    /// Statement text with indentation stripped.
    pub text: String,
    /// Number of leading spaces on the source line.
    pub indent: usize,
    /// 1-based line number in the script source.
    pub line: usize,
    pub true_edge: Option<NodeId>,
    pub false_edge: Option<NodeId>,
}

impl StatementNode {
    /// Create an unlinked node.
    pub fn new(text: impl Into<String>, indent: usize, line: usize) -> Self {
        StatementNode {
            text: text.into(),
            indent,
            line,
            true_edge: None,
            false_edge: None,
        }
    }

    /// Classify this node by its leading keyword.
    #[inline]
    pub fn kind(&self) -> StatementKind {
        StatementKind::classify(&self.text)
    }
}

/// Structural role of a statement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StatementKind {
    If,
    Elif,
    Else,
    Endif,
    Plain,
}

impl StatementKind {
    /// Classify statement text by prefix.
    ///
    /// Matching is by prefix, not by whole word: `IFFY` classifies as `If`.
    pub fn classify(text: &str) -> Self {
        if text.starts_with("IF") {
            StatementKind::If
        } else if text.starts_with("ELIF") {
            StatementKind::Elif
        } else if text.starts_with("ELSE") {
            StatementKind::Else
        } else if text.starts_with("ENDIF") {
            StatementKind::Endif
        } else {
            StatementKind::Plain
        }
    }

    /// The keyword this kind is introduced by, if any.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            StatementKind::If => Some("IF"),
            StatementKind::Elif => Some("ELIF"),
            StatementKind::Else => Some("ELSE"),
            StatementKind::Endif => Some("ENDIF"),
            StatementKind::Plain => None,
        }
    }

    /// Condition text of an `IF`/`ELIF` statement.
    ///
    /// Returns `None` for every other kind.
    pub fn condition(self, text: &str) -> Option<&str> {
        match self {
            StatementKind::If | StatementKind::Elif => {
                let keyword = self.keyword()?;
                text.get(keyword.len()..).map(str::trim)
            }
            _ => None,
        }
    }
}

/// Fixed-capacity, append-only storage for statement nodes.
///
/// Node identity is the arena index; nodes are never removed or reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeArena {
    nodes: Vec<StatementNode>,
    capacity: usize,
}

impl NodeArena {
    /// Create an empty arena holding at most `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Append a node, returning its ID, or `None` if the arena is full.
    pub fn alloc(&mut self, node: StatementNode) -> Option<NodeId> {
        if self.nodes.len() >= self.capacity {
            return None;
        }
        let id = NodeId::new(u32::try_from(self.nodes.len()).ok()?);
        self.nodes.push(node);
        Some(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&StatementNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut StatementNode> {
        self.nodes.get_mut(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All nodes in allocation order.
    #[inline]
    pub fn nodes(&self) -> &[StatementNode] {
        &self.nodes
    }

    /// Iterate over `(id, node)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &StatementNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| Some((NodeId::new(u32::try_from(i).ok()?), node)))
    }

    /// ID of the node following `id` in source order, if there is one.
    pub fn successor_of(&self, id: NodeId) -> Option<NodeId> {
        let next = id.next();
        (next.index() < self.nodes.len()).then_some(next)
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(StatementKind::classify("IF EQUAL $a 1"), StatementKind::If);
        assert_eq!(StatementKind::classify("ELIF $flag"), StatementKind::Elif);
        assert_eq!(StatementKind::classify("ELSE"), StatementKind::Else);
        assert_eq!(StatementKind::classify("ENDIF"), StatementKind::Endif);
        assert_eq!(StatementKind::classify("SPEAK \"x\""), StatementKind::Plain);
        assert_eq!(StatementKind::classify("# IF comment"), StatementKind::Plain);
    }

    #[test]
    fn condition_strips_keyword() {
        let kind = StatementKind::classify("IF GREATER $x 3");
        assert_eq!(kind.condition("IF GREATER $x 3"), Some("GREATER $x 3"));
        assert_eq!(StatementKind::Else.condition("ELSE"), None);
    }

    #[test]
    fn arena_rejects_past_capacity() {
        let mut arena = NodeArena::with_capacity(2);
        assert_eq!(arena.alloc(StatementNode::new("a", 0, 1)), Some(NodeId::new(0)));
        assert_eq!(arena.alloc(StatementNode::new("b", 0, 2)), Some(NodeId::new(1)));
        assert_eq!(arena.alloc(StatementNode::new("c", 0, 3)), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn successor_stops_at_end() {
        let mut arena = NodeArena::default();
        let a = arena.alloc(StatementNode::new("a", 0, 1));
        let b = arena.alloc(StatementNode::new("b", 0, 2));
        assert_eq!(a.and_then(|a| arena.successor_of(a)), b);
        assert_eq!(b.and_then(|b| arena.successor_of(b)), None);
    }
}
