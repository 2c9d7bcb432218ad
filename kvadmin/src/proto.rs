//! The administrative text protocol spoken by every cluster node.
//!
//! Requests and responses are newline-delimited: the client writes one
//! command line, the node answers with zero or more response lines
//! followed by one empty line. When the cluster requires credentials, an
//! `auth` exchange must come first on every connection.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::node::Node;
use crate::transport::TransportError;

/// Built-in command answered by every node with the current membership
/// snapshot, one `<name> <address> <port>` line per node.
pub const CLUSTER_NODES: &str = "cluster-nodes";

/// Writes one command line and reads the response lines that follow.
///
/// The response ends at the first empty line. EOF before that empty line
/// means the connection was cut mid-response, which is a protocol error.
pub async fn exchange<S>(
    stream: &mut BufReader<S>,
    command: &str,
) -> Result<Vec<String>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(command.as_bytes()).await?;
    stream.write_all(b"\n").await?;
    stream.flush().await?;

    let mut lines = vec![];
    loop {
        let mut line = String::new();
        if stream.read_line(&mut line).await? == 0 {
            return Err(TransportError::Protocol(
                "connection closed before end of response".to_owned(),
            ));
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(lines);
        }
        lines.push(line.to_owned());
    }
}

/// Performs the authentication handshake.
pub async fn authenticate<S>(
    stream: &mut BufReader<S>,
    user: &str,
    password: &str,
) -> Result<(), TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let response = exchange(stream, &format!("auth {} {}", user, password)).await?;
    match response.first().map(|line| line.as_str()) {
        Some("ok") => Ok(()),
        Some(reason) => Err(TransportError::AuthFailed(reason.to_owned())),
        None => Err(TransportError::AuthFailed("empty response".to_owned())),
    }
}

/// Parses one line of a [`CLUSTER_NODES`] response.
pub fn parse_node_line(line: &str) -> Result<Node, TransportError> {
    let mut parts = line.split_whitespace();
    let (name, address, port) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(address), Some(port), None) => (name, address, port),
        _ => {
            return Err(TransportError::Protocol(format!(
                "malformed node line: {:?}",
                line
            )))
        }
    };
    let port = port.parse::<u16>().map_err(|_| {
        TransportError::Protocol(format!("invalid port in node line: {:?}", line))
    })?;
    Ok(Node {
        name: name.to_owned(),
        address: address.to_owned(),
        port,
    })
}
