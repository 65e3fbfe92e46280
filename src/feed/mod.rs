//! RSS 2.0 document model and parser.
//!
//! - **Model**: [`Feed`] holds channel metadata and its ordered [`Item`]s;
//!   each item carries a [`CustomAttrs`] bag for attributes on `<item>`.
//! - **Parsing**: [`parse`] turns raw XML bytes into a `Feed` using the
//!   `quick-xml` event reader.
//!
//! A `Feed` serializes with `serde` to the JSON shape emitted by the
//! `rss2json` binary: element names become keys and empty optional fields
//! are omitted.
//!
//! # Example
//!
//! ```
//! let xml = br#"<rss version="2.0"><channel><title>Example</title></channel></rss>"#;
//! let feed = rss2json::feed::parse(xml).unwrap();
//! assert_eq!(feed.version, "2.0");
//! assert_eq!(feed.title, "Example");
//! ```

mod model;
mod parser;

pub use model::{CustomAttrs, Feed, Item};
pub use parser::{parse, ParseError};
