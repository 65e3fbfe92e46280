use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::path::PathExpr;
use crate::feed::Feed;

/// Errors that can occur while filtering a feed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The path matches none of the recognized forms.
    #[error("path {0:?} not found")]
    UnknownPath(String),

    /// No path produced a value.
    #[error("no data paths found")]
    NoResults,
}

/// Value resolved for one path: a scalar for channel-level paths, a list
/// for item paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(values) => Some(values),
        }
    }
}

/// Values keyed by the path expression exactly as the caller supplied it.
///
/// Serializes as a JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterResult(BTreeMap<String, FilterValue>);

impl FilterResult {
    pub fn get(&self, path: &str) -> Option<&FilterValue> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Evaluates each path against `feed` and collects the results.
///
/// Each path contributes at most one entry, keyed by the path string. When a
/// path resolves to several fields (only `.channel` does), they are merged
/// in resolution order and the last one wins, so `.channel` reports pubDate
/// when the feed has one and the description otherwise.
///
/// # Errors
///
/// - [`FilterError::UnknownPath`] if any path is outside the grammar; no
///   partial result is returned.
/// - [`FilterError::NoResults`] if `paths` is empty or nothing resolved.
///
/// # Examples
///
/// ```
/// let xml = br#"<rss version="2.0"><channel><item><title>A</title></item></channel></rss>"#;
/// let feed = rss2json::feed::parse(xml).unwrap();
///
/// let result = rss2json::query::filter(&feed, &[".version", ".item[].title"]).unwrap();
/// assert_eq!(result.get(".version").and_then(|v| v.as_scalar()), Some("2.0"));
/// assert_eq!(result.get(".item[].title").and_then(|v| v.as_list()).map(|l| l.len()), Some(1));
/// ```
pub fn filter<S: AsRef<str>>(feed: &Feed, paths: &[S]) -> Result<FilterResult, FilterError> {
    let mut result = BTreeMap::new();

    for path in paths {
        let path = path.as_ref();
        let expr = PathExpr::parse(path)?;
        for (field, value) in expr.resolve(feed) {
            tracing::trace!(path, field, "Merging resolved field");
            result.insert(path.to_string(), value);
        }
    }

    if result.is_empty() {
        return Err(FilterError::NoResults);
    }
    tracing::debug!(paths = paths.len(), entries = result.len(), "Filtered feed");
    Ok(FilterResult(result))
}

impl Feed {
    /// Convenience wrapper around [`filter`].
    pub fn filter<S: AsRef<str>>(&self, paths: &[S]) -> Result<FilterResult, FilterError> {
        filter(self, paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Item;
    use pretty_assertions::assert_eq;

    fn feed_with_items(n: usize) -> Feed {
        Feed {
            version: "2.0".to_string(),
            title: "Example".to_string(),
            link: "https://example.com/".to_string(),
            description: "Sample feed".to_string(),
            items: (0..n)
                .map(|i| Item {
                    title: format!("Item {}", i),
                    link: format!("https://example.com/{}", i),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_version_keyed_by_path() {
        let result = filter(&feed_with_items(1), &[".version"]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.get(".version"),
            Some(&FilterValue::Scalar("2.0".to_string()))
        );
    }

    #[test]
    fn test_item_titles_in_document_order() {
        let result = filter(&feed_with_items(3), &[".item[].title"]).unwrap();
        assert_eq!(
            result.get(".item[].title").and_then(FilterValue::as_list),
            Some(&["Item 0".to_string(), "Item 1".to_string(), "Item 2".to_string()][..])
        );
    }

    #[test]
    fn test_multiple_paths() {
        let result = filter(
            &feed_with_items(4),
            &[".channel.title", ".item[1-2].link", ".version"],
        )
        .unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(
            result.get(".channel.title").and_then(FilterValue::as_scalar),
            Some("Example")
        );
        assert_eq!(
            result.get(".item[1-2].link").and_then(FilterValue::as_list),
            Some(
                &[
                    "https://example.com/1".to_string(),
                    "https://example.com/2".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_channel_keeps_last_resolved_field() {
        let feed = feed_with_items(0);
        let result = filter(&feed, &[".channel"]).unwrap();
        assert_eq!(
            result.get(".channel").and_then(FilterValue::as_scalar),
            Some("Sample feed")
        );

        let feed = Feed {
            pub_date: "Fri, 12 Aug 2016 15:00:00 -0700".to_string(),
            ..feed
        };
        let result = filter(&feed, &[".channel"]).unwrap();
        assert_eq!(
            result.get(".channel").and_then(FilterValue::as_scalar),
            Some("Fri, 12 Aug 2016 15:00:00 -0700")
        );
    }

    #[test]
    fn test_unknown_path_aborts_whole_call() {
        let err = filter(&feed_with_items(2), &[".version", "[email protected]"]).unwrap_err();
        assert_eq!(err, FilterError::UnknownPath("[email protected]".to_string()));
        assert!(err.to_string().contains("[email protected]"));
    }

    #[test]
    fn test_empty_paths_is_no_results() {
        let paths: [&str; 0] = [];
        assert_eq!(
            filter(&feed_with_items(2), &paths).unwrap_err(),
            FilterError::NoResults
        );
    }

    #[test]
    fn test_only_unknown_item_fields_is_no_results() {
        assert_eq!(
            filter(&feed_with_items(2), &[".item[].enclosure"]).unwrap_err(),
            FilterError::NoResults
        );
    }

    #[test]
    fn test_channel_elements_outside_query_fields_are_unknown() {
        let feed = Feed {
            language: "en".to_string(),
            ..feed_with_items(1)
        };
        assert_eq!(
            filter(&feed, &[".channel.language"]).unwrap_err(),
            FilterError::UnknownPath(".channel.language".to_string())
        );
    }

    #[test]
    fn test_item_author_is_no_results() {
        let mut feed = feed_with_items(1);
        feed.items[0].author = "x@y".to_string();
        assert_eq!(
            filter(&feed, &[".item[].author"]).unwrap_err(),
            FilterError::NoResults
        );
    }

    #[test]
    fn test_unknown_item_field_is_omitted() {
        let result = filter(&feed_with_items(2), &[".item[].source", ".version"]).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.get(".item[].source").is_none());
    }

    #[test]
    fn test_empty_feed_yields_empty_list() {
        let result = filter(&feed_with_items(0), &[".item[].title"]).unwrap();
        assert_eq!(
            result.get(".item[].title"),
            Some(&FilterValue::List(Vec::new()))
        );
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let result = filter(&feed_with_items(1), &[".version", ".item[].title"]).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{".item[].title":["Item 0"],".version":"2.0"}"#);
    }

    #[test]
    fn test_feed_method_delegates() {
        let feed = feed_with_items(2);
        assert_eq!(feed.filter(&[".version"]), filter(&feed, &[".version"]));
    }
}
