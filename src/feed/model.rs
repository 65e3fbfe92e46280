use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// Feed
// ============================================================================

/// A parsed RSS 2.0 channel.
///
/// Every scalar field holds the raw character data of the matching element
/// under `<channel>`. An empty string means the element was absent (or
/// present but empty); such fields are omitted from JSON output, except for
/// `version`, `title`, `link` and `description` which are always emitted.
///
/// A `Feed` is never mutated after [`parse`](super::parse) returns, so it can
/// be shared freely across threads and queried concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    /// Value of the `version` attribute on the `<rss>` root element.
    pub version: String,

    // Required
    pub title: String,
    pub link: String,
    pub description: String,

    // Optional
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub copyright: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub managing_editor: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub web_master: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pub_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_build_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub generator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub docs: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ttl: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rating: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub skip_hours: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub skip_days: String,

    /// Items in document order.
    #[serde(rename = "item", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

impl Feed {
    /// Returns the channel field backed by the element `name`, if the
    /// model has one.
    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        let slot = match name {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "description" => &mut self.description,
            "language" => &mut self.language,
            "copyright" => &mut self.copyright,
            "managingEditor" => &mut self.managing_editor,
            "webMaster" => &mut self.web_master,
            "pubDate" => &mut self.pub_date,
            "lastBuildDate" => &mut self.last_build_date,
            "category" => &mut self.category,
            "generator" => &mut self.generator,
            "docs" => &mut self.docs,
            "cloud" => &mut self.cloud,
            "ttl" => &mut self.ttl,
            "image" => &mut self.image,
            "rating" => &mut self.rating,
            "skipHours" => &mut self.skip_hours,
            "skipDays" => &mut self.skip_days,
            _ => return None,
        };
        Some(slot)
    }
}

// ============================================================================
// Item
// ============================================================================

/// One `<item>` entry of a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    // Required
    pub link: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Body of the `content:encoded` element.
    #[serde(rename = "encoded", skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pub_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub enclosure: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,

    /// Attributes found on the `<item>` element itself.
    #[serde(rename = "other_attrs", skip_serializing_if = "CustomAttrs::is_empty")]
    pub other_attrs: CustomAttrs,
}

impl Item {
    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        let slot = match name {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "description" => &mut self.description,
            "author" => &mut self.author,
            "category" => &mut self.category,
            "encoded" => &mut self.content,
            "pubDate" => &mut self.pub_date,
            "comments" => &mut self.comments,
            "enclosure" => &mut self.enclosure,
            "guid" => &mut self.guid,
            "source" => &mut self.source,
            _ => return None,
        };
        Some(slot)
    }
}

// ============================================================================
// Custom Attributes
// ============================================================================

/// Ordered attribute bag keyed by attribute local name.
///
/// Entries keep the position of the first occurrence of a name and the value
/// of the last one. Empty names are never stored. Serializes as a JSON object
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomAttrs(Vec<(String, String)>);

impl CustomAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name = value`, replacing the value of an existing entry.
    /// Empty names are dropped.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for CustomAttrs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
