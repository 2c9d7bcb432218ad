use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Client configuration. Build it via [`Config::builder`].
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) seed_host: String,
    pub(crate) seed_port: u16,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) timeout: Option<Duration>,
}

pub struct Builder {
    seed: Option<String>,
    user: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl Config {
    pub fn builder() -> Builder {
        Builder {
            seed: None,
            user: None,
            password: None,
            timeout: None,
        }
    }

    /// The seed node address in `<host>:<port>` form.
    pub fn seed_addr(&self) -> String {
        format!("{}:{}", self.seed_host, self.seed_port)
    }
}

impl Builder {
    pub fn build(self) -> Result<Config, ConfigErrors> {
        let errors: Vec<ConfigError> = [self.validate_seed(), self.validate_credentials()]
            .into_iter()
            .filter_map(|e| e.err())
            .flatten()
            .collect();
        if !errors.is_empty() {
            return Err(ConfigErrors { errors });
        }

        // The seed has already been validated.
        let (seed_host, seed_port) = parse_seed(self.seed.as_deref()).unwrap();
        Ok(Config {
            seed_host,
            seed_port,
            user: self.user,
            password: self.password,
            timeout: self.timeout,
        })
    }

    /// Set the seed node to connect to, as `<host>` or `<host>:<port>`.
    /// Defaults to `127.0.0.1:3000`.
    pub fn seed(mut self, seed: String) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn user(mut self, user: String) -> Self {
        self.user = Some(user);
        self
    }

    pub fn password(mut self, password: String) -> Self {
        self.password = Some(password);
        self
    }

    /// Set the timeout applied to each call, connect included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn validate_seed(&self) -> Result<(), Vec<ConfigError>> {
        match parse_seed(self.seed.as_deref()) {
            Ok(_) => Ok(()),
            Err(e) => Err(vec![e]),
        }
    }

    fn validate_credentials(&self) -> Result<(), Vec<ConfigError>> {
        match (&self.user, &self.password) {
            (Some(_), None) | (None, Some(_)) => Err(vec![ConfigError::IncompleteCredentials]),
            _ => Ok(()),
        }
    }
}

fn parse_seed(seed: Option<&str>) -> Result<(String, u16), ConfigError> {
    let Some(seed) = seed else {
        return Ok((DEFAULT_HOST.to_owned(), DEFAULT_PORT));
    };

    let mut parts = seed.splitn(2, ':');
    let host = parts.next().unwrap_or_default();
    if host.is_empty() {
        return Err(ConfigError::InvalidSeed(seed.to_owned()));
    }
    let port = match parts.next() {
        Some(port) => port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidSeedPort(seed.to_owned()))?,
        None => DEFAULT_PORT,
    };
    Ok((host.to_owned(), port))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid seed address (must be <host> or <host>:<port>): {0}")]
    InvalidSeed(String),

    #[error("invalid port in seed address: {0}")]
    InvalidSeedPort(String),

    #[error("user and password must be provided together")]
    IncompleteCredentials,
}

#[derive(Debug, thiserror::Error)]
#[error("configuration errors:\n{}", errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
pub struct ConfigErrors {
    errors: Vec<ConfigError>,
}
