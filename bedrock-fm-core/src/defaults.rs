//! Default Configuration Values
//!
//! This module centralizes the default values used throughout bedrock-fm.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for non-streaming invocations.
    ///
    /// Large models can take well over ten seconds for long completions.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("bedrock-fm/", env!("CARGO_PKG_VERSION"));

    /// Accept header value for `invoke-with-response-stream`.
    pub const EVENT_STREAM_CONTENT_TYPE: &str = "application/vnd.amazon.eventstream";
}

/// Bedrock runtime endpoint defaults
pub mod endpoint {
    /// Region used when neither the builder nor the environment supplies one.
    pub const REGION: &str = "us-east-1";

    pub const REGION_ENV: &str = "AWS_REGION";
    pub const DEFAULT_REGION_ENV: &str = "AWS_DEFAULT_REGION";
    pub const BEARER_TOKEN_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";
    pub const ENDPOINT_URL_ENV: &str = "BEDROCK_ENDPOINT_URL";

    /// Runtime base URL for a region.
    pub fn runtime_url(region: &str) -> String {
        format!("https://bedrock-runtime.{region}.amazonaws.com")
    }
}

/// Text generation defaults applied when neither the call nor the instance sets a value.
pub mod generation {
    pub const TEMPERATURE: f64 = 0.7;
    pub const TOP_P: f64 = 1.0;
    pub const MAX_TOKEN_COUNT: u32 = 500;
}

/// Anthropic-on-Bedrock constants
pub mod anthropic {
    pub const VERSION: &str = "bedrock-2023-05-31";
    pub const HUMAN_PROMPT: &str = "\n\nHuman:";
    pub const ASSISTANT_PROMPT: &str = "\n\nAssistant:";
}

/// Image generation defaults
pub mod image {
    pub const WIDTH: u32 = 512;
    pub const HEIGHT: u32 = 512;
    pub const SEED: u64 = 0;
    pub const CFG_SCALE: f64 = 7.0;
    pub const NUMBER_OF_IMAGES: u32 = 1;
    /// Stable Diffusion diffusion steps.
    pub const STEPS: u32 = 50;
}
