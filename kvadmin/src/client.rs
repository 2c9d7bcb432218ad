use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::info;

use crate::config::Config;
use crate::node::Node;
use crate::proto;
use crate::transport::{InfoTransport, TransportError};

/// Client for the cluster's administrative text protocol.
///
/// Connecting takes a membership snapshot through the seed node. Each
/// info call opens its own connection, so concurrent calls never share a
/// connection handle.
#[derive(Debug)]
pub struct Client {
    config: Config,
    nodes: Vec<Node>,
}

impl Client {
    /// Connects to the seed node and discovers the current cluster
    /// membership.
    pub async fn connect(config: Config) -> Result<Client, TransportError> {
        let seed = config.seed_addr();
        let lines = request(&config, &seed, proto::CLUSTER_NODES).await?;
        let nodes = lines
            .iter()
            .map(|line| proto::parse_node_line(line))
            .collect::<Result<Vec<_>, _>>()?;
        info!(seed, nodes = nodes.len(), "Discovered cluster members");
        Ok(Client { config, nodes })
    }

    /// The membership snapshot taken at connect time.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[async_trait::async_trait]
impl InfoTransport for Client {
    async fn request_info(
        &self,
        node: &Node,
        command: &str,
    ) -> Result<Vec<String>, TransportError> {
        let addr = format!("{}:{}", node.address, node.port);
        request(&self.config, &addr, command).await
    }
}

/// Opens a connection, authenticates when credentials are configured, and
/// performs one command exchange. The configured timeout bounds the whole
/// call, connect included.
async fn request(
    config: &Config,
    addr: &str,
    command: &str,
) -> Result<Vec<String>, TransportError> {
    match config.timeout {
        Some(timeout) => tokio::time::timeout(timeout, request_inner(config, addr, command))
            .await
            .map_err(|_| TransportError::Timeout(timeout))?,
        None => request_inner(config, addr, command).await,
    }
}

async fn request_inner(
    config: &Config,
    addr: &str,
    command: &str,
) -> Result<Vec<String>, TransportError> {
    let mut stream = BufReader::new(TcpStream::connect(addr).await?);
    if let (Some(user), Some(password)) = (&config.user, &config.password) {
        proto::authenticate(&mut stream, user, password).await?;
    }
    proto::exchange(&mut stream, command).await
}
