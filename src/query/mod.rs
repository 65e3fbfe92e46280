//! Path queries over a parsed [`Feed`](crate::feed::Feed).
//!
//! A path expression selects part of a feed:
//!
//! - `.version`: the `version` attribute of `<rss>`
//! - `.channel.title`, `.channel.link`, ...: one channel field
//! - `.item[].title`: a field of every item, in document order
//! - `.item[2-4].link`, `.item[3].guid`: a field of the items in a range
//!
//! # Architecture
//!
//! - [`range`] - `N` / `N-M` range qualifiers, with permissive defaults
//! - [`path`] - tokenizes a path into a [`PathExpr`] and resolves it
//! - [`filter`](mod@filter) - evaluates a batch of paths into a [`FilterResult`]

mod filter;
mod path;
mod range;

pub use filter::{filter, FilterError, FilterResult, FilterValue};
pub use path::{ChannelField, ItemField, PathExpr};
pub use range::{parse_range, RangeExpression};
