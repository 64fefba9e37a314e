use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single message header as returned by the mail provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered header list of one message.
///
/// Lookups compare names case-insensitively and the first match wins; nothing
/// assumes a name appears only once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet {
    headers: Vec<Header>,
}

impl HeaderSet {
    pub fn new(headers: Vec<Header>) -> Self {
        Self { headers }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl FromIterator<(String, String)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            headers: iter
                .into_iter()
                .map(|(name, value)| Header { name, value })
                .collect(),
        }
    }
}

/// Aggregated observations for one registrable domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    pub count: u64,
    pub sample_from: String,
    pub sample_subject: String,
    #[serde(default)]
    pub sample_list_id: String,
}

pub const SITES_COLUMNS: [&str; 5] = [
    "domain",
    "count",
    "sample_from",
    "sample_subject",
    "sample_list_id",
];

pub const SITES_REQUIRED_COLUMNS: [&str; 4] = ["domain", "count", "sample_from", "sample_subject"];

pub const CATALOG_COLUMNS: [&str; 8] = [
    "domain",
    "count",
    "sample_from",
    "sample_subject",
    "service_name",
    "category",
    "source",
    "notes",
];

/// How a catalog row got its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySource {
    Dict,
    Rule,
    Unknown,
}

impl CategorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySource::Dict => "dict",
            CategorySource::Rule => "rule",
            CategorySource::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CategorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub domain: String,
    pub count: u64,
    pub sample_from: String,
    pub sample_subject: String,
    pub service_name: String,
    pub category: String,
    pub source: CategorySource,
    pub notes: String,
}

/// User-maintained `domain -> category` lookup, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    entries: HashMap<String, String>,
}

impl CategoryMapping {
    /// Builds a mapping with trimmed, lowercased keys and trimmed values.
    /// Keys that are empty after trimming are dropped.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(domain, category)| {
                let key = domain.as_ref().trim().to_lowercase();
                if key.is_empty() {
                    return None;
                }
                Some((key, category.as_ref().trim().to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, domain: &str) -> Option<&str> {
        self.entries.get(domain).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive_first_match() {
        let headers = HeaderSet::new(vec![
            Header::new("SUBJECT", "first"),
            Header::new("subject", "second"),
            Header::new("From", "a@example.com"),
        ]);
        assert_eq!(headers.get("Subject"), Some("first"));
        assert_eq!(headers.get("from"), Some("a@example.com"));
        assert_eq!(headers.get("Reply-To"), None);
    }

    #[test]
    fn test_category_mapping_normalizes_keys() {
        let mapping = CategoryMapping::from_entries(vec![
            ("  GitHub.com ", " developer "),
            ("   ", "ignored"),
        ]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("github.com"), Some("developer"));
    }

    #[test]
    fn test_category_source_serializes_lowercase() {
        assert_eq!(CategorySource::Dict.to_string(), "dict");
        assert_eq!(
            serde_json::to_string(&CategorySource::Unknown).unwrap(),
            "\"unknown\""
        );
    }
}
