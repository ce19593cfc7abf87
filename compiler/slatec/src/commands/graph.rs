//! The `graph` command: print the control-flow graph of a script.

use serde::Serialize;

use slate_diagnostic::emitter::DiagnosticEmitter;
use slate_ir::{NodeId, StatementNode};
use slate_parse::{build_graph_with, ParseConfig};

use super::{read_file, stderr_emitter, CommandError};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GraphFormat {
    /// One `[id] text -> [true, false]` line per node.
    #[default]
    Text,
    /// A JSON array of nodes.
    Json,
}

#[derive(Serialize)]
struct NodeRecord<'a> {
    id: NodeId,
    kind: Option<&'static str>,
    #[serde(flatten)]
    node: &'a StatementNode,
}

/// Build the graph for `source` and render it in `format`.
pub fn render_graph(
    source: &str,
    config: ParseConfig,
    format: GraphFormat,
) -> Result<String, CommandError> {
    let graph = build_graph_with(source, config)?;
    match format {
        GraphFormat::Text => Ok(graph.to_string()),
        GraphFormat::Json => {
            let records: Vec<NodeRecord<'_>> = graph
                .iter()
                .map(|(id, node)| NodeRecord {
                    id,
                    kind: node.kind().keyword(),
                    node,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&records)?)
        }
    }
}

pub fn graph_file(path: &str, config: ParseConfig, format: GraphFormat) {
    let content = read_file(path);
    match render_graph(&content, config, format) {
        Ok(rendered) => println!("{}", rendered.trim_end()),
        Err(CommandError::Structure(err)) => {
            let mut emitter = stderr_emitter(&content, path);
            emitter.emit(&err.to_diagnostic());
            emitter.flush();
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
