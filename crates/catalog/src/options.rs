// ABOUTME: Configuration for catalog connections: ConnectionOptions and the fluent ConnectionBuilder.
// ABOUTME: Covers locale, HTTP client settings, endpoint base URLs and the exchange observer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::connection::Connection;
use crate::error::CatalogError;
use crate::observer::{ResponseObserver, StdoutObserver};

/// Storefront used when none is configured.
pub const DEFAULT_COUNTRY: &str = "us";

/// Base of the top-chart feed URLs.
pub const DEFAULT_FEED_BASE_URL: &str = "https://itunes.apple.com";

/// Base of the lookup URLs.
pub const DEFAULT_LOOKUP_BASE_URL: &str = "http://itunes.apple.com";

/// Settings a [`Connection`] is built from.
#[derive(Clone)]
pub struct ConnectionOptions {
    pub country: String,
    pub user_agent: Option<String>,
    /// Per-request timeout. None leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub http_client: Option<reqwest::blocking::Client>,
    pub feed_base_url: String,
    pub lookup_base_url: String,
    pub observer: Option<Arc<dyn ResponseObserver>>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            user_agent: None,
            timeout: None,
            http_client: None,
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
            lookup_base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            observer: Some(Arc::new(StdoutObserver)),
        }
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("country", &self.country)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("http_client", &self.http_client.is_some())
            .field("feed_base_url", &self.feed_base_url)
            .field("lookup_base_url", &self.lookup_base_url)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Builder for constructing Connection instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    opts: ConnectionOptions,
}

impl ConnectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storefront country code, e.g. `us` or `gb`.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.opts.country = country.into();
        self
    }

    /// Set the User-Agent header. Ignored when a custom client is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout. Ignored when a custom client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    pub fn feed_base_url(mut self, url: impl Into<String>) -> Self {
        self.opts.feed_base_url = url.into();
        self
    }

    pub fn lookup_base_url(mut self, url: impl Into<String>) -> Self {
        self.opts.lookup_base_url = url.into();
        self
    }

    /// Replace the default stdout echo with a custom observer.
    pub fn observer(mut self, observer: impl ResponseObserver + 'static) -> Self {
        self.opts.observer = Some(Arc::new(observer));
        self
    }

    /// Drop the exchange observer entirely.
    pub fn quiet(mut self) -> Self {
        self.opts.observer = None;
        self
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.opts
    }

    /// Build the Connection, creating its HTTP client now.
    pub fn build(self) -> Result<Connection, CatalogError> {
        Connection::new(self.opts)
    }
}
