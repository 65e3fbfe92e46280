use super::filter::FilterError;
use super::range::{parse_range, RangeExpression};
use super::FilterValue;
use crate::feed::{Feed, Item};

/// Channel-level fields addressable as `.channel.<name>`.
///
/// Only these four are queryable; the other channel elements appear in the
/// converted JSON but a `.channel` path naming them is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelField {
    Title,
    Link,
    Description,
    PubDate,
}

impl ChannelField {
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "title" => Self::Title,
            "link" => Self::Link,
            "description" => Self::Description,
            "pubDate" => Self::PubDate,
            _ => return None,
        };
        Some(field)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Link => "link",
            Self::Description => "description",
            Self::PubDate => "pubDate",
        }
    }

    fn get(self, feed: &Feed) -> &str {
        match self {
            Self::Title => &feed.title,
            Self::Link => &feed.link,
            Self::Description => &feed.description,
            Self::PubDate => &feed.pub_date,
        }
    }
}

/// Item fields addressable as `.item[<range>].<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Title,
    Link,
    Description,
    Content,
    PubDate,
    Comments,
    Guid,
}

impl ItemField {
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "title" => Self::Title,
            "link" => Self::Link,
            "description" => Self::Description,
            "content" => Self::Content,
            "pubDate" => Self::PubDate,
            "comments" => Self::Comments,
            "guid" => Self::Guid,
            _ => return None,
        };
        Some(field)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Link => "link",
            Self::Description => "description",
            Self::Content => "content",
            Self::PubDate => "pubDate",
            Self::Comments => "comments",
            Self::Guid => "guid",
        }
    }

    fn get(self, item: &Item) -> &str {
        match self {
            Self::Title => &item.title,
            Self::Link => &item.link,
            Self::Description => &item.description,
            Self::Content => &item.content,
            Self::PubDate => &item.pub_date,
            Self::Comments => &item.comments,
            Self::Guid => &item.guid,
        }
    }
}

/// A tokenized path expression.
///
/// | Path                   | Variant                            |
/// |------------------------|------------------------------------|
/// | `.version`             | `Version`                          |
/// | `.channel`             | `Channel`                          |
/// | `.channel.title`       | `ChannelField(Title)`              |
/// | `.item[2-4].link`      | `ItemField { range: Some("2-4"), field: Some(Link) }` |
/// | `.item[].guid`         | `ItemField { range: Some(""), field: Some(Guid) }`    |
///
/// Field names are taken from the last dot-delimited segment, so
/// `.channel.image.title` addresses the channel title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathExpr<'a> {
    Version,
    Channel,
    ChannelField(ChannelField),
    ItemField {
        /// Text between the first `[` and first `]`; `None` when the
        /// brackets are missing or out of order.
        range: Option<&'a str>,
        /// `None` when the last segment is not a known item field. Such a
        /// path resolves to nothing rather than failing.
        field: Option<ItemField>,
    },
}

impl<'a> PathExpr<'a> {
    /// Tokenizes `path`. Paths are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownPath`] for anything outside the grammar,
    /// including `.channel` paths whose last segment is not a channel field.
    pub fn parse(path: &'a str) -> Result<Self, FilterError> {
        let unknown = || FilterError::UnknownPath(path.to_string());

        if path == ".version" {
            return Ok(Self::Version);
        }
        if path == ".channel" {
            return Ok(Self::Channel);
        }
        if path.starts_with(".channel") {
            return last_segment(path)
                .and_then(ChannelField::from_name)
                .map(Self::ChannelField)
                .ok_or_else(unknown);
        }
        if path.starts_with(".item[") {
            let range = match (path.find('['), path.find(']')) {
                (Some(start), Some(end)) if start < end => Some(&path[start + 1..end]),
                _ => None,
            };
            let field = last_segment(path).and_then(ItemField::from_name);
            if field.is_none() {
                tracing::debug!(path, "Unrecognized item field, path will yield no values");
            }
            return Ok(Self::ItemField { range, field });
        }
        Err(unknown())
    }

    /// Resolves this expression against `feed`.
    ///
    /// Returns `(field name, value)` pairs. `Channel` yields title, link,
    /// description and (when non-empty) pubDate in that order; an item path
    /// with an unknown field yields nothing; every other form yields exactly
    /// one entry.
    pub fn resolve(&self, feed: &Feed) -> Vec<(&'static str, FilterValue)> {
        match *self {
            Self::Version => vec![("version", FilterValue::Scalar(feed.version.clone()))],
            Self::Channel => {
                let mut fields = vec![
                    ChannelField::Title,
                    ChannelField::Link,
                    ChannelField::Description,
                ];
                if !feed.pub_date.is_empty() {
                    fields.push(ChannelField::PubDate);
                }
                fields
                    .into_iter()
                    .map(|f| (f.name(), FilterValue::Scalar(f.get(feed).to_string())))
                    .collect()
            }
            Self::ChannelField(field) => {
                vec![(field.name(), FilterValue::Scalar(field.get(feed).to_string()))]
            }
            Self::ItemField { range, field } => {
                let Some(field) = field else {
                    return Vec::new();
                };
                let range = match range {
                    Some(expr) => parse_range(feed.items.len(), expr),
                    None => RangeExpression::full(feed.items.len()),
                };
                let values = feed
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| range.in_range(*i))
                    .map(|(_, item)| field.get(item).to_string())
                    .collect();
                vec![(field.name(), FilterValue::List(values))]
            }
        }
    }
}

fn last_segment(path: &str) -> Option<&str> {
    path.rsplit_once('.').map(|(_, last)| last)
}
