use std::time::Duration;

use super::WriteError;

/// Default remote write endpoint of a locally running m3coordinator.
pub const DEFAULT_REMOTE_WRITE_URL: &str = "http://localhost:7201/api/v1/prom/remote/write";

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("promwrite/", env!("CARGO_PKG_VERSION"));

/// Configuration used to construct a [`Client`](super::Client).
///
/// Built from a default baseline with [`Config::new`], immutable once the
/// client has been constructed.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL the client writes to.
    pub write_url: String,

    /// Timeout applied to the HTTP client the constructor builds.
    pub http_timeout: Duration,

    /// If set, this client is used verbatim instead of constructing one;
    /// its own timeout and TLS settings then take precedence.
    pub http_client: Option<reqwest::Client>,

    /// Value of the `User-Agent` header on write requests.
    pub user_agent: String,

    /// Disable TLS certificate verification on the constructed client.
    pub skip_tls_verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            write_url: DEFAULT_REMOTE_WRITE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            http_client: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            skip_tls_verify: false,
        }
    }
}

/// A single configuration setting, applied in order over the defaults by
/// [`Config::new`]. Later options win on the same field.
#[derive(Clone, Debug)]
pub enum ConfigOption {
    /// Set the URL which the client uses to write to the endpoint.
    WriteUrl(String),
    /// Set the timeout of the HTTP client.
    HttpTimeout(Duration),
    /// Use a pre-built HTTP client instead of constructing one.
    HttpClient(reqwest::Client),
    /// Set the `User-Agent` header sent with every request.
    UserAgent(String),
    /// Skip TLS certificate verification.
    SkipTlsVerify,
}

impl Config {
    /// Creates a new config from the default baseline and the given options.
    pub fn new(options: impl IntoIterator<Item = ConfigOption>) -> Config {
        let mut config = Config::default();
        for option in options {
            config.apply(option);
        }
        config
    }

    fn apply(&mut self, option: ConfigOption) {
        match option {
            ConfigOption::WriteUrl(url) => self.write_url = url,
            ConfigOption::HttpTimeout(timeout) => self.http_timeout = timeout,
            ConfigOption::HttpClient(client) => self.http_client = Some(client),
            ConfigOption::UserAgent(agent) => self.user_agent = agent,
            ConfigOption::SkipTlsVerify => self.skip_tls_verify = true,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), WriteError> {
        if self.http_timeout.is_zero() {
            return Err(WriteError::Configuration(format!(
                "http client timeout should be greater than 0: {:?}",
                self.http_timeout
            )));
        }

        if self.write_url.is_empty() {
            return Err(WriteError::Configuration(
                "remote write URL should not be blank".to_string(),
            ));
        }

        if self.user_agent.is_empty() {
            return Err(WriteError::Configuration(
                "User-Agent should not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::new([]);
        assert_eq!(config.write_url, DEFAULT_REMOTE_WRITE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.http_client.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn options_apply_in_order_with_later_winning() {
        let config = Config::new([
            ConfigOption::WriteUrl("http://first/write".to_string()),
            ConfigOption::UserAgent("my-agent/1.0".to_string()),
            ConfigOption::WriteUrl("http://second/write".to_string()),
        ]);
        assert_eq!(config.write_url, "http://second/write");
        assert_eq!(config.user_agent, "my-agent/1.0");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config::new([ConfigOption::HttpTimeout(Duration::ZERO)]);
        assert!(matches!(
            config.validate(),
            Err(WriteError::Configuration(_))
        ));
    }

    #[test]
    fn blank_url_is_rejected() {
        let config = Config::new([ConfigOption::WriteUrl(String::new())]);
        assert!(matches!(
            config.validate(),
            Err(WriteError::Configuration(_))
        ));
    }

    #[test]
    fn blank_user_agent_is_rejected() {
        let config = Config::new([ConfigOption::UserAgent(String::new())]);
        assert!(matches!(
            config.validate(),
            Err(WriteError::Configuration(_))
        ));
    }
}
