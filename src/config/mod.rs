// src/config/mod.rs
// Service configuration, loaded from .env and CT_* environment variables

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

use crate::analysis::ParseMode;

/// Which inference backend serves completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// OpenAI-compatible chat completions server
    Chat,
    /// Separate inference binary, one process per prompt
    Subprocess,
    /// Generic `inputs` -> `generated_text` endpoint
    TextGeneration,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Chat => "chat",
            Backend::Subprocess => "subprocess",
            Backend::TextGeneration => "text-generation",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" | "llama-server" | "openai" => Ok(Backend::Chat),
            "subprocess" | "process" | "bitnet" => Ok(Backend::Subprocess),
            "text-generation" | "pipeline" | "tgi" => Ok(Backend::TextGeneration),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    // ── Server
    pub host: String,
    pub port: u16,

    // ── Inference
    pub backend: Backend,
    pub inference_url: String,
    pub inference_api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub inference_timeout_secs: u64,
    pub inference_command: String,
    pub inference_args: Vec<String>,

    // ── Parsing
    pub lenient_parse: bool,

    // ── Logging
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            // Drop trailing comments and whitespace before parsing
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            host: env_var_or("CT_HOST", "0.0.0.0".to_string()),
            port: env_var_or("CT_PORT", 3000),
            backend: env_var_or("CT_BACKEND", Backend::Chat),
            inference_url: env_var_or("CT_INFERENCE_URL", "http://127.0.0.1:8080".to_string()),
            inference_api_key: env_opt("CT_INFERENCE_API_KEY"),
            model: env_var_or("CT_MODEL", "gemma-3-1b-it".to_string()),
            temperature: env_var_or("CT_TEMPERATURE", 0.7),
            max_tokens: env_var_or("CT_MAX_TOKENS", 1024),
            inference_timeout_secs: env_var_or("CT_INFERENCE_TIMEOUT_SECS", 120),
            inference_command: env_var_or("CT_INFERENCE_COMMAND", "llama-cli".to_string()),
            inference_args: env_opt("CT_INFERENCE_ARGS")
                .map(|args| args.split_whitespace().map(str::to_string).collect())
                .unwrap_or_else(|| vec!["-no-cnv".to_string(), "-n".to_string(), "1024".to_string(), "-p".to_string()]),
            lenient_parse: env_var_or("CT_LENIENT_PARSE", true),
            log_level: env_var_or("CT_LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.lenient_parse {
            ParseMode::Lenient
        } else {
            ParseMode::Strict
        }
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<TrackerConfig> = Lazy::new(TrackerConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_aliases() {
        assert_eq!("chat".parse::<Backend>(), Ok(Backend::Chat));
        assert_eq!(" BitNet ".parse::<Backend>(), Ok(Backend::Subprocess));
        assert_eq!("pipeline".parse::<Backend>(), Ok(Backend::TextGeneration));
        assert!("gpu".parse::<Backend>().is_err());
    }

    #[test]
    fn test_env_var_or_falls_back_on_missing_key() {
        assert_eq!(env_var_or("CT_TEST_UNSET_KEY_FOR_DEFAULTS", 42u16), 42);
        assert_eq!(env_var_or("CT_TEST_UNSET_KEY_FOR_DEFAULTS", Backend::Subprocess), Backend::Subprocess);
    }

    #[test]
    fn test_convenience_methods() {
        let mut config = TrackerConfig::from_env();
        config.host = "127.0.0.1".to_string();
        config.port = 3100;
        assert_eq!(config.bind_address(), "127.0.0.1:3100");

        config.lenient_parse = false;
        assert_eq!(config.parse_mode(), ParseMode::Strict);
        config.lenient_parse = true;
        assert_eq!(config.parse_mode(), ParseMode::Lenient);
    }
}
