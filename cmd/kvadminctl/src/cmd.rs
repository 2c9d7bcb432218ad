#[derive(Debug, clap::Parser)]
#[command(name = "kvadminctl", about = "kv cluster administration tool")]
pub struct Args {
    #[command(flatten)]
    pub global_args: crate::args::GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Broadcast an info command to the cluster and print each node's
    /// response as it arrives.
    Info(crate::info::Args),

    /// Print the discovered cluster membership.
    Nodes(crate::nodes::Args),
}
