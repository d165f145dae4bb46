// ABOUTME: CLI for the appstore-catalog library.
// ABOUTME: Fetches top charts or looks up items and prints the decoded result as JSON.

use std::time::Duration;

use anyhow::Result;
use appstore_catalog::{
    Connection, ALL_GENRES, CATEGORIES, DEFAULT_COUNTRY, DEFAULT_FEED_BASE_URL,
    DEFAULT_LOOKUP_BASE_URL, GENRES,
};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// Query the marketplace top charts and item lookup endpoints.
#[derive(Parser, Debug)]
#[command(name = "appstore-cli")]
#[command(about = "Fetch top charts and look up catalog items as JSON", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Storefront country code.
    #[arg(long, global = true, default_value = DEFAULT_COUNTRY)]
    country: String,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    /// Echo the HTTP status and raw body to stdout before the JSON output.
    #[arg(long, global = true, default_value_t = false)]
    echo: bool,

    /// Request timeout in seconds (no timeout when omitted).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Base URL for top-chart feeds.
    #[arg(long, global = true, default_value = DEFAULT_FEED_BASE_URL)]
    feed_base_url: String,

    /// Base URL for item lookups.
    #[arg(long, global = true, default_value = DEFAULT_LOOKUP_BASE_URL)]
    lookup_base_url: String,

    /// Log requests to stderr (RUST_LOG overrides the level).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a top-chart feed.
    Top {
        /// Chart category key, e.g. topfreeapplications.
        #[arg(long, default_value = "topfreeapplications")]
        category: String,

        /// Genre id; 0 means all genres.
        #[arg(long, default_value_t = ALL_GENRES)]
        genre: u32,

        /// Number of entries to request.
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Look up an item by store identifier.
    Lookup {
        id: String,
    },
    /// List the known chart categories.
    Categories,
    /// List the known genres.
    Genres,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        init_logging();
    }

    let output = match args.command {
        Command::Categories => categories_json(),
        Command::Genres => genres_json(),
        Command::Top {
            ref category,
            genre,
            limit,
        } => {
            let feed = connect(&args)?.fetch_app_list(category, genre, limit)?;
            serde_json::to_value(feed)?
        }
        Command::Lookup { ref id } => {
            let results = connect(&args)?.lookup_item_with_id(id)?;
            serde_json::to_value(results)?
        }
    };

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn connect(args: &Args) -> Result<Connection> {
    let mut builder = Connection::builder()
        .country(args.country.as_str())
        .feed_base_url(args.feed_base_url.as_str())
        .lookup_base_url(args.lookup_base_url.as_str())
        .user_agent(concat!("appstore-cli/", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = args.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if !args.echo {
        builder = builder.quiet();
    }
    Ok(builder.build()?)
}

fn categories_json() -> Value {
    Value::Array(
        CATEGORIES
            .iter()
            .map(|(key, label)| json!({ "key": key, "label": label }))
            .collect(),
    )
}

fn genres_json() -> Value {
    Value::Array(
        GENRES
            .iter()
            .map(|(id, label)| json!({ "id": id, "label": label }))
            .collect(),
    )
}
