use std::time::Duration;

use anyhow::{Context, bail};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api/chat";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the relay, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub demo_mode: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            backend_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            demo_mode: false,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys take defaults;
    /// set-but-unparsable keys are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(p) => p.trim().parse::<u16>().with_context(|| format!("PORT is not a valid port: {p}"))?,
            None => defaults.port,
        };

        let backend_url = lookup("CHAT_BACKEND_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.backend_url);

        let backend_timeout = match lookup("CHAT_BACKEND_TIMEOUT_SECS") {
            Some(s) => {
                let secs: u64 = s
                    .trim()
                    .parse()
                    .with_context(|| format!("CHAT_BACKEND_TIMEOUT_SECS is not a number: {s}"))?;
                if secs == 0 {
                    bail!("CHAT_BACKEND_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => defaults.backend_timeout,
        };

        let demo_mode = match lookup("CHAT_DEMO_MODE") {
            Some(v) => parse_flag(&v).with_context(|| format!("CHAT_DEMO_MODE is not a boolean: {v}"))?,
            None => defaults.demo_mode,
        };

        Ok(Self { port, backend_url, backend_timeout, demo_mode })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised flag value '{other}'"),
    }
}
