#[derive(Debug, clap::Args)]
pub struct Args {}

pub async fn run(global_args: &crate::args::GlobalArgs, _args: &Args) -> anyhow::Result<()> {
    let client = kvadmin::Client::connect(global_args.config()?).await?;
    for node in client.nodes() {
        println!("{} {}:{}", node.name, node.address, node.port);
    }
    Ok(())
}
