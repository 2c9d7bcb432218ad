use std::fmt::Write;
use std::time::Duration;

use crate::node::Node;

/// What one node's invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Response lines in the order the node returned them.
    Success(Vec<String>),
    /// Description of the transport or protocol error.
    Failure(String),
}

/// The result of issuing the command to a single node. Exactly one is
/// produced per selected node, success or failure.
#[derive(Debug, Clone)]
pub struct NodeResult {
    pub node: Node,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

/// Renders one node's result as a self-contained text block.
///
/// The trailing blank line keeps blocks apart when results from
/// concurrent nodes interleave on a shared output stream.
pub fn format_report(result: &NodeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "NODE {} ({}:{}) RESPONDED IN {:.3}s:",
        result.node.name,
        result.node.address,
        result.node.port,
        result.elapsed.as_secs_f64()
    );
    match &result.outcome {
        Outcome::Success(lines) => {
            for line in lines {
                let _ = writeln!(out, "{}", line);
            }
        }
        Outcome::Failure(message) => {
            let _ = writeln!(out, "Error running info command: {}", message);
        }
    }
    out.push('\n');
    out
}
