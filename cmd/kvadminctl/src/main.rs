#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Report blocks go to stdout; keep logs on stderr so the two streams
    // can be separated.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    kvadminctl::run().await
}
