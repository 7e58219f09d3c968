use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `USER_CONSOLE_SERVER__PORT=8000`.
const ENV_PREFIX: &str = "USER_CONSOLE";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Users endpoint of the backend
    #[arg(long, env = "API_BASE")]
    pub api_base: Option<String>,

    /// Endpoint that reports the signed-in user
    #[arg(long, env = "AUTH_URL")]
    pub auth_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Upper bound for handling one inbound request.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Users collection: listed with GET, asked with POST unless `ask_url` is set.
    pub api_base: String,
    pub ask_url: Option<String>,
    /// Returns `{ data: user | null }` for the forwarded cookie. Without it nobody is signed in.
    pub auth_url: Option<String>,
    pub timeout_secs: u64,
    pub top_k: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
    /// Second hero line.
    pub subtitle: String,
    pub htmx_src: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        // 1. Defaults
        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("backend.api_base", "http://localhost:5000/api/users")?
            .set_default("backend.auth_url", "http://localhost:5000/api/auth/me")?
            .set_default("backend.timeout_secs", 20)?
            .set_default("backend.top_k", 5)?
            .set_default("session.cookie_name", "uc_session")?
            .set_default("session.idle_timeout_secs", 30 * 60)?
            .set_default("session.sweep_interval_secs", 60)?
            .set_default("ui.title", "Generation Thailand")?
            .set_default("ui.subtitle", "User Console")?
            .set_default("ui.htmx_src", "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js")?
            .set_default("ui.static_dir", "static")?;

        // 2. Config file: explicit path must exist, ./config.* is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Environment, e.g. USER_CONSOLE_BACKEND__API_BASE
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and their clap-level env vars) win
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(api_base) = cli.api_base {
            builder = builder.set_override("backend.api_base", api_base)?;
        }
        if let Some(auth_url) = cli.auth_url {
            builder = builder.set_override("backend.auth_url", auth_url)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Backend calls must time out before the inbound request does.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.backend.timeout_secs >= self.server.request_timeout_secs {
            return Err(config::ConfigError::Message(format!(
                "backend.timeout_secs ({}) must be less than server.request_timeout_secs ({})",
                self.backend.timeout_secs, self.server.request_timeout_secs
            )));
        }
        Ok(())
    }
}
