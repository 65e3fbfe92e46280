//! Convert RSS 2.0 feeds to JSON and query them with path expressions.
//!
//! ```
//! use rss2json::{feed, query};
//!
//! let xml = br#"<rss version="2.0">
//!   <channel>
//!     <title>Example</title>
//!     <item><title>First</title><link>https://example.com/1</link></item>
//!     <item><title>Second</title><link>https://example.com/2</link></item>
//!   </channel>
//! </rss>"#;
//!
//! let feed = feed::parse(xml)?;
//! let result = query::filter(&feed, &[".item[1].title"])?;
//! let json = rss2json::util::to_json_string(&result, false)?;
//! assert_eq!(json, r#"{".item[1].title":["Second"]}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod feed;
pub mod query;
pub mod util;

pub use feed::{parse, CustomAttrs, Feed, Item, ParseError};
pub use query::{filter, FilterError, FilterResult, FilterValue};
