//! Control-flow graph execution.
//!
//! `IF`/`ELIF` evaluate their condition as an expression. `True` follows
//! the true edge, anything else follows the false edge; a condition that
//! fails to evaluate, or is not a boolean, is reported and counts as false.
//! `ELSE` and `ENDIF` are unconditional. An unset true edge falls through
//! to the next node in source order; an unset false edge ends the run.

use tracing::trace;

use slate_ir::{NodeId, StatementKind, StatementNode, Value, ValueType};
use slate_parse::ControlFlowGraph;

use super::{Cursor, InputRequest, Interpreter, RunOutcome, Step, Suspension};
use crate::errors::EvalError;
use crate::expr::evaluate;

impl Interpreter {
    pub(super) fn walk(&mut self, graph: &ControlFlowGraph, start: Option<NodeId>) -> RunOutcome {
        let mut current = start;
        while let Some(id) = current {
            let Some(node) = graph.node(id) else {
                break;
            };
            let fallthrough = node.true_edge.or_else(|| graph.successor_of(id));

            current = match node.kind() {
                StatementKind::If | StatementKind::Elif => {
                    if self.condition_holds(node) {
                        fallthrough
                    } else {
                        node.false_edge
                    }
                }
                StatementKind::Else | StatementKind::Endif => fallthrough,
                StatementKind::Plain => {
                    if let Step::AwaitInput(variable) = self.exec_line(node.line, &node.text) {
                        return RunOutcome::Suspended(Suspension {
                            request: InputRequest {
                                variable,
                                line: node.line,
                            },
                            cursor: fallthrough.map_or(Cursor::End, Cursor::Node),
                        });
                    }
                    fallthrough
                }
            };
            trace!(from = %id, to = ?current, "step");
        }
        RunOutcome::Completed
    }

    fn condition_holds(&mut self, node: &StatementNode) -> bool {
        let condition = node.kind().condition(&node.text).unwrap_or_default();
        match evaluate(condition, &self.namespace, &self.context) {
            Ok(Value::Boolean(holds)) => {
                trace!(line = node.line, condition, holds, "condition");
                holds
            }
            Ok(other) => {
                self.report(
                    node.line,
                    &EvalError::TypeMismatch {
                        expected: ValueType::Boolean,
                        found: other.value_type(),
                    },
                );
                false
            }
            Err(err) => {
                self.report(node.line, &err);
                false
            }
        }
    }
}
