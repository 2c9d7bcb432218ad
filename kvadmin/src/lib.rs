mod client;
mod config;
mod dispatch;
mod node;
mod proto;
mod report;
mod transport;

pub use client::Client;
pub use config::{Config, ConfigError, ConfigErrors};
pub use dispatch::{dispatch, DispatchError};
pub use node::{select, Node, NodeFilter};
pub use report::{format_report, NodeResult, Outcome};
pub use transport::{InfoTransport, TransportError};
