use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The Zoom API key used as the issuer of every access token.
    #[arg(long, env)]
    zoom_api_key: Option<String>,

    /// The Zoom API secret used to sign access tokens.
    #[arg(long, env, hide_env_values = true)]
    zoom_api_secret: Option<String>,

    /// Override the base URL of the Zoom REST API, e.g. to point at a mock server.
    /// The public API is used when unset.
    #[arg(long, env)]
    zoom_base_url: Option<String>,

    /// Timeout in seconds for a single API request
    #[arg(long, env, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap_or(LevelFilter::Info)),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    /// Load `.env` into the process environment, then parse the command line.
    pub fn new() -> Self {
        load_dotenv();
        Config::parse()
    }

    pub fn zoom_api_key(&self) -> Option<&str> {
        self.zoom_api_key.as_deref()
    }

    pub fn zoom_api_secret(&self) -> Option<&str> {
        self.zoom_api_secret.as_deref()
    }

    /// Returns the Zoom API base URL override, if one is configured.
    pub fn zoom_base_url(&self) -> Option<&str> {
        self.zoom_base_url.as_deref()
    }

    pub fn set_zoom_base_url(mut self, zoom_base_url: String) -> Self {
        self.zoom_base_url = Some(zoom_base_url);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a `.env` file from the working directory (or a parent), if present.
/// Variables already set in the environment win.
pub fn load_dotenv() {
    dotenv().ok();
}
