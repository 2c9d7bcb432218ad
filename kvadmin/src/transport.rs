use crate::node::Node;

/// Issues one info command to one node and returns the response lines in
/// the order the node sent them.
///
/// The dispatcher depends only on this trait, so tests can substitute an
/// in-memory transport for the TCP client.
#[async_trait::async_trait]
pub trait InfoTransport: Send + Sync + 'static {
    async fn request_info(&self, node: &Node, command: &str)
        -> Result<Vec<String>, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(std::time::Duration),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("protocol error: {0}")]
    Protocol(String),
}
