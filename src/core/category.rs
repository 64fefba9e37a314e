//! Category resolution for catalog rows.
//!
//! Precedence, first match wins:
//! 1. exact domain entry in the user mapping (`dict`)
//! 2. a non-empty `List-Id` sample (`rule`, newsletter)
//! 3. newsletter keyword in the subject (`rule`)
//! 4. transaction keyword in the subject (`rule`)
//! 5. `unknown`
//!
//! ASCII keywords match case-insensitively against the lowercased subject.
//! Non-ASCII keywords match the original subject exactly, without case folding.

use crate::domain::model::{CategoryMapping, CategorySource};

pub const NEWSLETTER_KEYWORDS: &[&str] = &["newsletter", "unsubscribe", "メルマガ", "配信停止"];
pub const TRANSACTION_KEYWORDS: &[&str] =
    &["receipt", "invoice", "領収書", "ご注文", "配送", "shipped"];

pub const NEWSLETTER: &str = "newsletter";
pub const TRANSACTION: &str = "transaction";
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub category: String,
    pub source: CategorySource,
}

impl Resolution {
    fn new(category: impl Into<String>, source: CategorySource) -> Self {
        Self {
            category: category.into(),
            source,
        }
    }
}

pub struct CategoryResolver<'a> {
    mapping: &'a CategoryMapping,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(mapping: &'a CategoryMapping) -> Self {
        Self { mapping }
    }

    pub fn resolve(&self, domain: &str, subject: &str, list_id: Option<&str>) -> Resolution {
        let domain = domain.to_lowercase();
        if !domain.is_empty() {
            if let Some(category) = self.mapping.get(&domain) {
                return Resolution::new(category, CategorySource::Dict);
            }
        }

        if list_id.is_some_and(|id| !id.trim().is_empty()) {
            return Resolution::new(NEWSLETTER, CategorySource::Rule);
        }

        if contains_keyword(subject, NEWSLETTER_KEYWORDS) {
            return Resolution::new(NEWSLETTER, CategorySource::Rule);
        }

        if contains_keyword(subject, TRANSACTION_KEYWORDS) {
            return Resolution::new(TRANSACTION, CategorySource::Rule);
        }

        Resolution::new(UNKNOWN, CategorySource::Unknown)
    }
}

pub fn contains_keyword(subject: &str, keywords: &[&str]) -> bool {
    let subject_lower = subject.to_lowercase();
    keywords.iter().any(|keyword| {
        if keyword.is_ascii() {
            subject_lower.contains(&keyword.to_ascii_lowercase())
        } else {
            subject.contains(keyword)
        }
    })
}
