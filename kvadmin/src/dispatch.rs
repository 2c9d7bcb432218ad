use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::node::Node;
use crate::report::{format_report, NodeResult, Outcome};
use crate::transport::InfoTransport;

/// Failure of the dispatch machinery itself. Per-node failures never show
/// up here; they are captured in each [`NodeResult`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to write a report block: {0}")]
    Write(#[from] std::io::Error),
}

/// Issues `command` to every node concurrently and reports each result as
/// it completes.
///
/// One task per node, no concurrency cap. The join loop is the single
/// consumer of finished results: it formats each block and writes it to
/// `out` in one call, so blocks from racing nodes never interleave
/// mid-line. The returned results are in completion order, not input
/// order.
pub async fn dispatch<T, W>(
    transport: Arc<T>,
    nodes: Vec<Node>,
    command: &str,
    out: &mut W,
) -> Result<Vec<NodeResult>, DispatchError>
where
    T: InfoTransport,
    W: Write,
{
    info!(nodes = nodes.len(), command, "Broadcasting info command");
    let command: Arc<str> = Arc::from(command);

    let mut set = tokio::task::JoinSet::new();
    for node in nodes {
        let transport = transport.clone();
        let command = command.clone();
        set.spawn(async move { invoke(transport.as_ref(), node, &command).await });
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(result) => {
                out.write_all(format_report(&result).as_bytes())?;
                out.flush()?;
                results.push(result);
            }
            // A panicked invocation loses only its own report; keep
            // joining the remaining tasks.
            Err(e) => warn!(error = e.to_string(), "Failed to join an info invocation"),
        }
    }
    Ok(results)
}

/// Runs the command against one node and captures the outcome, error
/// included. Nothing is propagated to the caller; a transport failure is
/// data from here on.
async fn invoke<T>(transport: &T, node: Node, command: &str) -> NodeResult
where
    T: InfoTransport + ?Sized,
{
    let start = Instant::now();
    let outcome = match transport.request_info(&node, command).await {
        Ok(lines) => Outcome::Success(lines),
        Err(e) => Outcome::Failure(e.to_string()),
    };
    NodeResult {
        node,
        elapsed: start.elapsed(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Scripted transport keyed by node address.
    #[derive(Default)]
    struct MockTransport {
        responses: HashMap<String, Result<Vec<String>, String>>,
        delays: HashMap<String, Duration>,
    }

    impl MockTransport {
        fn respond(mut self, address: &str, lines: &[&str]) -> Self {
            self.responses.insert(
                address.to_owned(),
                Ok(lines.iter().map(|s| s.to_string()).collect()),
            );
            self
        }

        fn fail(mut self, address: &str, message: &str) -> Self {
            self.responses
                .insert(address.to_owned(), Err(message.to_owned()));
            self
        }

        fn delay(mut self, address: &str, delay: Duration) -> Self {
            self.delays.insert(address.to_owned(), delay);
            self
        }
    }

    #[async_trait::async_trait]
    impl InfoTransport for MockTransport {
        async fn request_info(
            &self,
            node: &Node,
            _command: &str,
        ) -> Result<Vec<String>, TransportError> {
            if let Some(delay) = self.delays.get(&node.address) {
                tokio::time::sleep(*delay).await;
            }
            match self.responses.get(&node.address) {
                Some(Ok(lines)) => Ok(lines.clone()),
                Some(Err(message)) => Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    message.clone(),
                ))),
                None => Err(TransportError::Protocol("no scripted response".to_owned())),
            }
        }
    }

    fn node(name: &str, address: &str) -> Node {
        Node {
            name: name.to_owned(),
            address: address.to_owned(),
            port: 3000,
        }
    }

    fn result_for<'a>(results: &'a [NodeResult], name: &str) -> &'a NodeResult {
        results
            .iter()
            .find(|r| r.node.name == name)
            .unwrap_or_else(|| panic!("no result for node {}", name))
    }

    #[tokio::test]
    async fn test_dispatch_produces_one_result_per_node() {
        let transport = MockTransport::default()
            .respond("10.0.0.1", &["ns=1"])
            .respond("10.0.0.2", &["ns=2"]);
        let nodes = vec![node("A", "10.0.0.1"), node("B", "10.0.0.2")];

        let mut out = vec![];
        let results = dispatch(Arc::new(transport), nodes, "services", &mut out)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(
            result_for(&results, "A").outcome,
            Outcome::Success(vec!["ns=1".to_owned()])
        );
        assert_eq!(
            result_for(&results, "B").outcome,
            Outcome::Success(vec!["ns=2".to_owned()])
        );
    }

    #[tokio::test]
    async fn test_dispatch_with_no_nodes() {
        let mut out = vec![];
        let results = dispatch(
            Arc::new(MockTransport::default()),
            vec![],
            "services",
            &mut out,
        )
        .await
        .unwrap();
        assert!(results.is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_own_node() {
        let transport = MockTransport::default()
            .fail("10.0.0.1", "connection reset by peer")
            .respond("10.0.0.2", &["ns=2", "objects=100"]);
        let nodes = vec![node("A", "10.0.0.1"), node("B", "10.0.0.2")];

        let mut out = vec![];
        let results = dispatch(Arc::new(transport), nodes, "services", &mut out)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        match &result_for(&results, "A").outcome {
            Outcome::Failure(message) => assert!(message.contains("connection reset"), "{}", message),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(
            result_for(&results, "B").outcome,
            Outcome::Success(vec!["ns=2".to_owned(), "objects=100".to_owned()])
        );
    }

    // Paused clock: the slow node can only finish once the runtime is
    // otherwise idle, so the completion order is deterministic.
    #[tokio::test(start_paused = true)]
    async fn test_slow_node_does_not_delay_fast_node() {
        let transport = MockTransport::default()
            .respond("10.0.0.1", &["slow"])
            .delay("10.0.0.1", Duration::from_millis(200))
            .respond("10.0.0.2", &["fast"]);
        let nodes = vec![node("A", "10.0.0.1"), node("B", "10.0.0.2")];

        let mut out = vec![];
        let results = dispatch(Arc::new(transport), nodes, "services", &mut out)
            .await
            .unwrap();

        // Completion order: the fast node reports first even though it was
        // spawned second, and the barrier still waits for both.
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].node.name, "B");
        assert_eq!(results[1].node.name, "A");
    }

    #[tokio::test]
    async fn test_elapsed_covers_the_request() {
        let transport = MockTransport::default()
            .respond("10.0.0.1", &["ok"])
            .delay("10.0.0.1", Duration::from_millis(25));
        let nodes = vec![node("A", "10.0.0.1")];

        let mut out = vec![];
        let results = dispatch(Arc::new(transport), nodes, "services", &mut out)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(
            results[0].elapsed >= Duration::from_millis(25),
            "{:?}",
            results[0].elapsed
        );
    }

    #[tokio::test]
    async fn test_each_block_is_written_whole() {
        let transport = MockTransport::default()
            .respond("10.0.0.1", &["a=1"])
            .fail("10.0.0.2", "connection reset by peer");
        let nodes = vec![node("A", "10.0.0.1"), node("B", "10.0.0.2")];

        let mut out = vec![];
        let results = dispatch(Arc::new(transport), nodes, "services", &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        let expected: String = results.iter().map(format_report).collect();
        assert_eq!(printed, expected);
        assert_eq!(printed.matches("\n\n").count(), 2);
    }
}
