// ABOUTME: Client library for the marketplace top-chart feed and item lookup endpoints.
// ABOUTME: Re-exports Connection, the response models, decoders, label tables and error types.

//! appstore-catalog - typed access to the top-chart RSS feed and the lookup endpoint.
//!
//! # Example
//!
//! ```no_run
//! use appstore_catalog::{ChartCategory, Connection, CatalogError};
//!
//! fn main() -> Result<(), CatalogError> {
//!     let conn = Connection::builder().country("us").quiet().build()?;
//!     let feed = conn.fetch_app_list(ChartCategory::TopFree, 6014, 10)?;
//!     for entry in &feed.entries {
//!         println!("{} ({})", entry.name, entry.id.bundle_id);
//!     }
//!     let found = conn.lookup_item_with_id("284882215")?;
//!     println!("{} results", found.result_count);
//!     Ok(())
//! }
//! ```

pub mod atom;
pub mod connection;
pub mod error;
pub mod lookup;
pub mod models;
pub mod observer;
pub mod options;
pub mod tables;
pub mod time_parse;

pub use crate::atom::{decode_feed, STORE_NAMESPACE};
pub use crate::connection::Connection;
pub use crate::error::{CatalogError, DecodeError, ErrorCode};
pub use crate::lookup::decode_result_set;
pub use crate::models::{
    Artist, Author, Category, Content, ContentType, Entry, Feed, Image, ItemId, Link,
    LookupResult, Price, ReleaseDate, ResultSet,
};
pub use crate::observer::{Exchange, ResponseObserver, StdoutObserver};
pub use crate::options::{
    ConnectionBuilder, ConnectionOptions, DEFAULT_COUNTRY, DEFAULT_FEED_BASE_URL,
    DEFAULT_LOOKUP_BASE_URL,
};
pub use crate::tables::{
    category_label, genre_label, ChartCategory, UnknownCategory, ALL_GENRES, CATEGORIES, GENRES,
};
pub use crate::time_parse::parse_feed_time;
