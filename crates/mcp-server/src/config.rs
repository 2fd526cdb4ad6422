//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use travel_providers::{TravelApiConfig, WeatherConfig, DEFAULT_TRAVEL_API_URL, DEFAULT_WEATHER_API_URL};
use travel_tools::{AdapterOptions, OutputMode, Toolset, ToolsConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8086;
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Load `.env`, then let `local.env` override it. Missing files are fine.
pub fn load_env_files() {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_filename_override("local.env");
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP bind address.
    pub addr: SocketAddr,
    /// Bearer token required on `/mcp`. `None` disables auth.
    pub auth_token: Option<String>,
    /// Owner number returned by the `validate` tool.
    pub owner_number: Option<String>,
    pub toolset: Toolset,
    pub output: OutputMode,
    /// Per-invocation deadline. `None` waits indefinitely.
    pub tool_timeout: Option<Duration>,
    pub travel_api_url: String,
    pub travel_api_key: Option<String>,
    pub weather_api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MCP_HTTP_HOST` | Bind host | `0.0.0.0` |
    /// | `MCP_HTTP_PORT` / `PORT` | Bind port | `8086` |
    /// | `AUTH_TOKEN` / `MCP_BEARER_TOKEN` | Bearer token for `/mcp` | (auth off) |
    /// | `MY_NUMBER` | Owner number for `validate` | (tool off) |
    /// | `TRAVEL_TOOLSET` | `essential` or `extended` | `essential` |
    /// | `TRAVEL_OUTPUT` | `text` or `json` | `text` |
    /// | `MCP_TOOL_TIMEOUT_SECS` | Tool deadline in seconds, 0 for none | `30` |
    /// | `TRAVEL_API_URL` | Travel data backend | `http://127.0.0.1:8090` |
    /// | `TRAVEL_API_KEY` | Travel data backend key | (none) |
    /// | `WEATHER_API_URL` | wttr.in base URL | `https://wttr.in` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("MCP_HTTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("MCP_HTTP_PORT").or_else(|| get("PORT")) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };
        let addr = format!("{}:{}", host.trim(), port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(format!("{}:{}", host, port)))?;

        let toolset = match get("TRAVEL_TOOLSET") {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                var: "TRAVEL_TOOLSET",
                reason,
            })?,
            None => Toolset::default(),
        };

        let output = match get("TRAVEL_OUTPUT") {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                var: "TRAVEL_OUTPUT",
                reason,
            })?,
            None => OutputMode::default(),
        };

        let timeout_secs = match get("MCP_TOOL_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "MCP_TOOL_TIMEOUT_SECS",
                reason: format!("'{}' is not a whole number of seconds", value),
            })?,
            None => DEFAULT_TOOL_TIMEOUT_SECS,
        };
        let tool_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            addr,
            auth_token: get("AUTH_TOKEN").or_else(|| get("MCP_BEARER_TOKEN")),
            owner_number: get("MY_NUMBER"),
            toolset,
            output,
            tool_timeout,
            travel_api_url: get("TRAVEL_API_URL")
                .unwrap_or_else(|| DEFAULT_TRAVEL_API_URL.to_string()),
            travel_api_key: get("TRAVEL_API_KEY"),
            weather_api_url: get("WEATHER_API_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string()),
        })
    }

    /// Which tools to register.
    pub fn tools_config(&self) -> ToolsConfig {
        ToolsConfig {
            toolset: self.toolset,
            owner_number: self.owner_number.clone(),
        }
    }

    /// Invocation settings for the adapter.
    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            timeout: self.tool_timeout,
            output: self.output,
        }
    }

    pub fn travel_api_config(&self) -> TravelApiConfig {
        let config = TravelApiConfig::new(&self.travel_api_url);
        match &self.travel_api_key {
            Some(key) => config.with_api_key(key),
            None => config,
        }
    }

    pub fn weather_config(&self) -> WeatherConfig {
        WeatherConfig::new(&self.weather_api_url)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address: {0}")]
    InvalidAddr(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8086".parse().unwrap());
        assert_eq!(config.auth_token, None);
        assert_eq!(config.toolset, Toolset::Essential);
        assert_eq!(config.output, OutputMode::Text);
        assert_eq!(config.tool_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.travel_api_url, DEFAULT_TRAVEL_API_URL);
        assert_eq!(config.weather_api_url, DEFAULT_WEATHER_API_URL);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("MCP_HTTP_HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("MCP_BEARER_TOKEN", "secret"),
            ("MY_NUMBER", "15550001111"),
            ("TRAVEL_TOOLSET", "extended"),
            ("TRAVEL_OUTPUT", "json"),
            ("MCP_TOOL_TIMEOUT_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.toolset, Toolset::Extended);
        assert_eq!(config.output, OutputMode::Json);
        assert_eq!(config.tool_timeout, None);
        assert_eq!(
            config.tools_config().owner_number.as_deref(),
            Some("15550001111")
        );
    }

    #[test]
    fn test_port_precedence_and_token_precedence() {
        let config = config(&[
            ("MCP_HTTP_PORT", "8100"),
            ("PORT", "9000"),
            ("AUTH_TOKEN", "primary"),
            ("MCP_BEARER_TOKEN", "secondary"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8100);
        assert_eq!(config.auth_token.as_deref(), Some("primary"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = config(&[("AUTH_TOKEN", "  "), ("TRAVEL_TOOLSET", "")]).unwrap();
        assert_eq!(config.auth_token, None);
        assert_eq!(config.toolset, Toolset::Essential);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            config(&[("TRAVEL_OUTPUT", "xml")]),
            Err(ConfigError::Invalid { var: "TRAVEL_OUTPUT", .. })
        ));
        assert!(matches!(
            config(&[("MCP_TOOL_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            config(&[("MCP_HTTP_HOST", "not a host")]),
            Err(ConfigError::InvalidAddr(_))
        ));
    }
}
