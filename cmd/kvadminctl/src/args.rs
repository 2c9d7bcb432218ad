use std::time::Duration;

/// Common arguments of all subcommands.
#[derive(Debug, clap::Args)]
pub struct GlobalArgs {
    /// Seed node to connect to, as <host> or <host>:<port>.
    #[arg(short, long, env = "KVADMIN_SEED")]
    seed: Option<String>,

    /// User name, for clusters that require authentication.
    #[arg(short, long, env = "KVADMIN_USER")]
    user: Option<String>,

    /// Password, for clusters that require authentication.
    #[arg(short, long, env = "KVADMIN_PASSWORD")]
    password: Option<String>,

    /// Timeout applied to each call, in milliseconds.
    #[arg(short, long)]
    timeout_ms: Option<u64>,
}

impl GlobalArgs {
    pub fn config(&self) -> anyhow::Result<kvadmin::Config> {
        let mut builder = kvadmin::Config::builder();
        if let Some(seed) = &self.seed {
            builder = builder.seed(seed.clone());
        }
        if let Some(user) = &self.user {
            builder = builder.user(user.clone());
        }
        if let Some(password) = &self.password {
            builder = builder.password(password.clone());
        }
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(builder.build()?)
    }
}
