mod args;
mod cmd;
mod info;
mod nodes;

use clap::Parser;

pub async fn run() -> anyhow::Result<()> {
    let root = cmd::Args::try_parse()?;

    match &root.command {
        cmd::Commands::Info(args) => info::run(&root.global_args, args).await,
        cmd::Commands::Nodes(args) => nodes::run(&root.global_args, args).await,
    }
}
