//! Process configuration.
//!
//! Values come from command-line flags, falling back to environment
//! variables. A `.env` file in the working directory (or any parent) is
//! loaded into the environment before parsing, so `GOOGLE_API_KEY` can live
//! there.
//!
//! ```bash
//! GOOGLE_API_KEY=... calorie-compass --port 8080
//! CALORIE_COMPASS_MODEL=gemini-1.5-flash calorie-compass
//! ```

use anyhow::bail;
use clap::Parser;

use crate::constants::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT,
    DEFAULT_VISION_MODEL,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Google Generative AI API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Gemini model used for the analysis
    #[arg(long, env = "CALORIE_COMPASS_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub model: String,

    /// Base URL of the Gemini models API
    #[arg(long, env = "CALORIE_COMPASS_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub endpoint: String,

    /// Address to serve the page on
    #[arg(long, env = "CALORIE_COMPASS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "CALORIE_COMPASS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "CALORIE_COMPASS_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

/// Validated configuration, built once at startup and shared read-only.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load(args: Args) -> anyhow::Result<Self> {
        let api_key = args.api_key.trim().to_string();
        if api_key.is_empty() {
            bail!("GOOGLE_API_KEY is set but empty");
        }

        let model = args.model.trim().to_string();
        if model.is_empty() {
            bail!("model name must not be empty");
        }

        if args.max_upload_bytes == 0 {
            bail!("max upload size must be greater than zero");
        }

        Ok(Self {
            api_key,
            model,
            endpoint: args.endpoint.trim().trim_end_matches('/').to_string(),
            host: args.host,
            port: args.port,
            max_upload_bytes: args.max_upload_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}
