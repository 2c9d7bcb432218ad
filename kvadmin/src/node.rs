use std::collections::HashSet;

/// One member of the cluster, as reported by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub address: String,
    pub port: u16,
}

/// Restriction on which discovered nodes participate in a run.
///
/// An empty filter selects every node. A non-empty filter selects a node
/// iff its address is an exact string match for one of the entries. Ports
/// are ignored, so two nodes sharing an address on different ports both
/// match a single entry.
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    addresses: HashSet<String>,
}

impl NodeFilter {
    /// The filter that selects every discovered node.
    pub fn all() -> Self {
        NodeFilter::default()
    }

    /// Builds a filter from the raw flag values. Each value can contain a
    /// comma-separated list of addresses.
    pub fn parse_args<S, T>(addresses: &S) -> Self
    where
        S: std::convert::AsRef<[T]>,
        T: std::convert::AsRef<str>,
    {
        NodeFilter {
            addresses: addresses
                .as_ref()
                .iter()
                .flat_map(|a| a.as_ref().split(','))
                .map(|a| a.trim().to_owned())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.addresses.is_empty() || self.addresses.contains(&node.address)
    }
}

/// Returns the subset of `all` that participates in this run, preserving
/// the discovery order. An empty result is valid and yields zero
/// dispatches.
pub fn select(all: &[Node], filter: &NodeFilter) -> Vec<Node> {
    all.iter().filter(|n| filter.matches(n)).cloned().collect()
}
