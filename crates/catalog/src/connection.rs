// ABOUTME: Connection owns the HTTP client and storefront and runs the two catalog operations.
// ABOUTME: Each call builds its URL, performs one blocking GET, echoes the exchange and decodes the body.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};
use url::Url;

use crate::atom::decode_feed;
use crate::error::CatalogError;
use crate::lookup::decode_result_set;
use crate::models::{Feed, ResultSet};
use crate::observer::{Exchange, ResponseObserver};
use crate::options::{ConnectionBuilder, ConnectionOptions};

const OP_NEW: &str = "NewConnection";
const OP_FETCH_APP_LIST: &str = "FetchAppList";
const OP_LOOKUP: &str = "LookupItem";

/// A configured access point to the marketplace catalog.
///
/// The HTTP client is created with the connection and reused by every call.
/// `Connection` is `Send + Sync`; concurrent calls are not ordered.
#[derive(Clone)]
pub struct Connection {
    country: String,
    http_client: reqwest::blocking::Client,
    feed_base_url: String,
    lookup_base_url: String,
    observer: Option<Arc<dyn ResponseObserver>>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("country", &self.country)
            .field("feed_base_url", &self.feed_base_url)
            .field("lookup_base_url", &self.lookup_base_url)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    /// Create a Connection from explicit options.
    ///
    /// Must not be called from inside an async runtime: the blocking client
    /// owns its own runtime.
    pub fn new(opts: ConnectionOptions) -> Result<Self, CatalogError> {
        let http_client = match opts.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::blocking::Client::builder().timeout(opts.timeout);
                if let Some(ref ua) = opts.user_agent {
                    builder = builder.user_agent(ua.as_str());
                }
                builder.build().map_err(|e| {
                    CatalogError::transport(
                        "",
                        OP_NEW,
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?
            }
        };

        Ok(Self {
            country: opts.country,
            http_client,
            feed_base_url: opts.feed_base_url.trim_end_matches('/').to_string(),
            lookup_base_url: opts.lookup_base_url.trim_end_matches('/').to_string(),
            observer: opts.observer,
        })
    }

    /// Connection for a storefront with every other setting at its default.
    pub fn for_country(country: impl Into<String>) -> Result<Self, CatalogError> {
        Self::builder().country(country).build()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn http_client(&self) -> &reqwest::blocking::Client {
        &self.http_client
    }

    /// URL of a top-chart feed. Arguments are interpolated verbatim.
    pub fn app_list_url(&self, category: &str, genre: u32, limit: u32) -> String {
        format!(
            "{}/{}/rss/{}/limit={}/genre={}/xml",
            self.feed_base_url, self.country, category, limit, genre
        )
    }

    /// URL of an item lookup. The id is interpolated verbatim.
    pub fn lookup_url(&self, id: &str) -> String {
        format!("{}/lookup?id={}", self.lookup_base_url, id)
    }

    /// Perform one GET and return the full response body.
    ///
    /// The status code is not checked; whatever the server sent is handed to
    /// the observer and returned.
    pub fn perform(&self, op: &str, url: &str) -> Result<Bytes, CatalogError> {
        let parsed = Url::parse(url).map_err(|e| {
            CatalogError::invalid_request(url, op, Some(anyhow::anyhow!("invalid URL: {}", e)))
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(CatalogError::invalid_request(
                url,
                op,
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        debug!(op, url, "sending catalog request");

        let response = self.http_client.get(parsed).send().map_err(|e| {
            warn!(op, url, error = %e, "catalog request failed");
            CatalogError::transport(url, op, Some(anyhow::anyhow!("request failed: {}", e)))
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| {
            warn!(op, url, status, error = %e, "failed to read catalog response");
            CatalogError::transport(url, op, Some(anyhow::anyhow!("failed to read body: {}", e)))
        })?;

        debug!(op, url, status, bytes = body.len(), "catalog response received");

        if let Some(ref observer) = self.observer {
            observer.on_response(&Exchange {
                url,
                status,
                body: &body,
            });
        }

        Ok(body)
    }

    /// Fetch a top-chart feed.
    ///
    /// `category` is a chart key such as `topfreeapplications` (see
    /// [`CATEGORIES`](crate::CATEGORIES)), `genre` a genre id or `0` for all.
    /// Neither is checked against the tables.
    pub fn fetch_app_list(
        &self,
        category: impl AsRef<str>,
        genre: u32,
        limit: u32,
    ) -> Result<Feed, CatalogError> {
        let url = self.app_list_url(category.as_ref(), genre, limit);
        let body = self.perform(OP_FETCH_APP_LIST, &url)?;
        decode_feed(&body).map_err(|e| {
            warn!(op = OP_FETCH_APP_LIST, url = %url, error = %e, "feed did not decode");
            CatalogError::decode(&url, OP_FETCH_APP_LIST, Some(anyhow::Error::new(e)))
        })
    }

    /// Look up catalog items by store identifier.
    pub fn lookup_item_with_id(&self, id: &str) -> Result<ResultSet, CatalogError> {
        let url = self.lookup_url(id);
        let body = self.perform(OP_LOOKUP, &url)?;
        decode_result_set(&body).map_err(|e| {
            warn!(op = OP_LOOKUP, url = %url, error = %e, "lookup response did not decode");
            CatalogError::decode(&url, OP_LOOKUP, Some(anyhow::Error::new(e)))
        })
    }
}
