// ABOUTME: Typed shapes for the two catalog responses: the Atom top-chart feed and the JSON lookup envelope.
// ABOUTME: Every field defaults to its zero value when the source payload omits it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time_parse::parse_feed_time;

// ----------------------------------------------------------------------------
// Top-chart feed (XML)
// ----------------------------------------------------------------------------

/// A `<link>` element (feed level or entry level).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub href: String,
}

/// `<im:contentType term=".." label=".."/>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub term: String,
    pub label: String,
}

/// A `<category>` tag attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Genre id from the `im:id` attribute.
    pub id: String,
    pub term: String,
    pub scheme: String,
    pub label: String,
}

/// An `<im:artist>` credit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub href: String,
}

/// `<im:price amount=".." currency="..">display</im:price>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: String,
    pub currency: String,
    /// Formatted price text, e.g. `Get` or `$0.99`.
    pub display: String,
}

/// Feed-level `<author>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub uri: String,
}

/// Entry `<id>`: the canonical item URL plus the store identifiers carried as
/// namespaced attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemId {
    /// Numeric store identifier (`im:id`).
    pub id: String,
    /// Bundle identifier (`im:bundleId`).
    pub bundle_id: String,
    pub url: String,
}

/// An `<im:image>` variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: u16,
}

/// `<im:releaseDate label="..">value</im:releaseDate>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDate {
    pub date: String,
    pub label: String,
}

impl ReleaseDate {
    /// The release date as a timestamp, if the value parses.
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        parse_feed_time(&self.date)
    }
}

/// Entry `<content type="html">`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub kind: String,
    pub body: String,
}

/// One catalog item within a [`Feed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub updated: String,
    pub id: ItemId,
    pub title: String,
    pub summary: String,
    pub name: String,
    pub links: Vec<Link>,
    pub content_type: ContentType,
    pub categories: Vec<Category>,
    pub artists: Vec<Artist>,
    pub price: Price,
    pub images: Vec<Image>,
    pub rights: String,
    pub release_date: ReleaseDate,
    pub content: Content,
}

impl Entry {
    /// First link of the entry, usually the store page.
    pub fn link(&self) -> Option<&Link> {
        self.links.first()
    }

    /// Largest image variant by pixel height.
    pub fn largest_image(&self) -> Option<&Image> {
        self.images.iter().max_by_key(|img| img.height)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_feed_time(&self.updated)
    }
}

/// A ranked top-chart document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub links: Vec<Link>,
    pub icon: String,
    pub author: Author,
    pub rights: String,
    pub entries: Vec<Entry>,
}

impl Feed {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_feed_time(&self.updated)
    }
}

// ----------------------------------------------------------------------------
// Lookup envelope (JSON)
// ----------------------------------------------------------------------------

/// Reads an explicit `null` as the field's zero value, like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Metadata for one catalog item as returned by the lookup endpoint.
///
/// Absent keys and `null` values decode to the zero value of the field type,
/// so a `0` track id or an empty name means "not provided" just as much as "zero".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookupResult {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub supported_devices: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_game_center_enabled: bool,
    #[serde(alias = "artistViewURL", deserialize_with = "null_as_default")]
    pub artist_view_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url60: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url100: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url512: String,
    #[serde(alias = "screenshotURLs", deserialize_with = "null_as_default")]
    pub screenshot_urls: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ipad_screenshot_urls: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub artist_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub artist_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub genre_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub seller_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bundle_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub track_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub track_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_genre_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_genre_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub minimum_os_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wrapper_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub track_censored_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub track_view_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content_advisory_rating: String,
    #[serde(rename = "languageCodesISO2A", deserialize_with = "null_as_default")]
    pub language_codes_iso2a: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub file_size_bytes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub seller_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub average_user_rating_for_current_version: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_rating_count_for_current_version: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub track_content_rating: String,
    #[serde(deserialize_with = "null_as_default")]
    pub average_user_rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_rating_count: i64,
}

impl LookupResult {
    /// Release date as a timestamp, if present and well-formed.
    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        parse_feed_time(&self.release_date)
    }

    /// Application size in bytes; the endpoint sends it as a decimal string.
    pub fn file_size(&self) -> Option<u64> {
        self.file_size_bytes.parse().ok()
    }
}

/// The lookup endpoint envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(deserialize_with = "null_as_default")]
    pub result_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<LookupResult>,
}
