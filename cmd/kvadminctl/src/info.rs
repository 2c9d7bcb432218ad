use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only query the nodes with these addresses (comma separated or one
    /// address per flag). Addresses are matched exactly; ports are
    /// ignored.
    #[arg(short, long)]
    node: Vec<String>,

    /// The info command to broadcast.
    command: String,
}

pub async fn run(global_args: &crate::args::GlobalArgs, args: &Args) -> anyhow::Result<()> {
    let config = global_args.config()?;

    let start = Instant::now();
    let client = kvadmin::Client::connect(config).await?;
    println!("Connected in {:.3}s\n", start.elapsed().as_secs_f64());

    let filter = kvadmin::NodeFilter::parse_args(&args.node);
    let selected = kvadmin::select(client.nodes(), &filter);

    // Per-node failures are reported inline by the dispatcher and do not
    // fail the run; only a broken dispatch itself does.
    let mut stdout = std::io::stdout();
    kvadmin::dispatch(Arc::new(client), selected, &args.command, &mut stdout).await?;
    Ok(())
}
