// ABOUTME: Fixed chart-category and genre label tables for caller-side display and validation.
// ABOUTME: Lookups are built once on first use; nothing in the crate enforces them on requests.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

/// Chart categories as (feed path key, display label), in catalog order.
pub const CATEGORIES: [(&str, &str); 9] = [
    ("topfreeapplications", "Top Free Applications"),
    ("toppaidapplications", "Top Paid Applications"),
    ("topgrossingapplications", "Top Grossing Applications"),
    ("topfreeipadapplications", "Top Free iPad Applications"),
    ("toppaidipadapplications", "Top Paid iPad Applications"),
    ("topgrossingipadapplications", "Top Grossing iPad Applications"),
    ("newapplications", "New Applications"),
    ("newfreeapplications", "New Free Applications"),
    ("newpaidapplications", "New Paid Applications"),
];

/// Genre ids and display labels. `0` selects every genre.
pub const GENRES: [(u32, &str); 23] = [
    (0, "All"),
    (6000, "Business"),
    (6001, "Weather"),
    (6002, "Utilities"),
    (6003, "Travel"),
    (6004, "Sports"),
    (6005, "Social Networking"),
    (6006, "Reference"),
    (6007, "Productivity"),
    (6008, "Photo & Video"),
    (6009, "News"),
    (6010, "Navigation"),
    (6011, "Music"),
    (6012, "Lifestyle"),
    (6013, "Health & Fitness"),
    (6014, "Games"),
    (6015, "Finance"),
    (6016, "Entertainment"),
    (6017, "Education"),
    (6018, "Books"),
    (6020, "Medical"),
    (6021, "Newsstand"),
    (6022, "Catalogs"),
];

/// Genre id meaning "all genres".
pub const ALL_GENRES: u32 = 0;

static CATEGORY_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CATEGORIES.iter().copied().collect());

static GENRE_INDEX: Lazy<HashMap<u32, &'static str>> =
    Lazy::new(|| GENRES.iter().copied().collect());

/// Display label for a chart category key.
pub fn category_label(key: &str) -> Option<&'static str> {
    CATEGORY_INDEX.get(key).copied()
}

/// Display label for a genre id.
pub fn genre_label(id: u32) -> Option<&'static str> {
    GENRE_INDEX.get(&id).copied()
}

/// Typed form of the chart category keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartCategory {
    #[default]
    TopFree,
    TopPaid,
    TopGrossing,
    TopFreeIpad,
    TopPaidIpad,
    TopGrossingIpad,
    New,
    NewFree,
    NewPaid,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 9] = [
        ChartCategory::TopFree,
        ChartCategory::TopPaid,
        ChartCategory::TopGrossing,
        ChartCategory::TopFreeIpad,
        ChartCategory::TopPaidIpad,
        ChartCategory::TopGrossingIpad,
        ChartCategory::New,
        ChartCategory::NewFree,
        ChartCategory::NewPaid,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Path key used in the feed URL.
    pub fn key(self) -> &'static str {
        CATEGORIES[self.index()].0
    }

    pub fn label(self) -> &'static str {
        CATEGORIES[self.index()].1
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl AsRef<str> for ChartCategory {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

/// Error returned when a string is not one of the chart category keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chart category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ChartCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartCategory::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
