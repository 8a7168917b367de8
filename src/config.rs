use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

/// Default base URL for the Google Drive v3 API.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Drive folder to expose
    #[arg(long, env = "GDRIVE_FOLDER_ID")]
    pub folder_id: Option<String>,

    /// Path to the service-account JSON key file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub drive: DriveConfig,
    pub resilience: ResilienceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DriveConfig {
    /// Folder scope: only entries under this folder are ever listed.
    pub folder_id: String,
    /// Drive API base URL. Overridable for test doubles.
    pub api_base: String,
    /// OAuth2 token endpoint override. Defaults to the key file's `token_uri`.
    pub token_uri: Option<String>,
    /// Path to the service-account JSON key file.
    pub credentials_path: Option<String>,
    /// Inline service-account JSON key (takes effect when no path is set).
    pub credentials_json: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    /// Whole-request timeout applied by the HTTP layer, in seconds.
    pub request_timeout_secs: u64,
    /// Total timeout for one outbound Drive call, in seconds.
    pub backend_timeout_secs: u64,
    /// Connect timeout for outbound Drive calls, in seconds.
    pub backend_connect_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Layered load: defaults, then an optional config file, then `GDG_`
    /// environment variables, then CLI flags (and their env fallbacks,
    /// which preserve the original service's `GDRIVE_FOLDER_ID` /
    /// `GOOGLE_APPLICATION_CREDENTIALS` contract). Later layers win.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("drive.api_base", DEFAULT_API_BASE)?
            .set_default("resilience.request_timeout_secs", 60)?
            .set_default("resilience.backend_timeout_secs", 30)?
            .set_default("resilience.backend_connect_timeout_secs", 10)?;

        // Config file: explicit path is required to exist, the cwd fallback
        // (./config.{yaml,toml,json}) is not.
        builder = if let Some(path) = &cli.config {
            builder.add_source(File::with_name(path))
        } else {
            builder.add_source(File::with_name("config").required(false))
        };

        // Environment variables (prefixed with GDG_), e.g. GDG_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("GDG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Inline key material from the original service's env contract.
        if let Ok(json) = env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
            builder = builder.set_override("drive.credentials_json", json)?;
        }

        // CLI overrides (clap has already folded in PORT, GDRIVE_FOLDER_ID,
        // GOOGLE_APPLICATION_CREDENTIALS from the environment).
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(folder) = cli.folder_id {
            builder = builder.set_override("drive.folder_id", folder)?;
        }
        if let Some(path) = cli.credentials {
            builder = builder.set_override("drive.credentials_path", path)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
