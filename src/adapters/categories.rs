use crate::domain::model::CategoryMapping;
use crate::domain::ports::{CategoryStore, Storage};
use crate::utils::error::{AuditError, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Starter entries written when no category file exists yet.
pub const DEFAULT_CATEGORIES: [(&str, &str); 3] = [
    ("github.com", "developer"),
    ("amazon.co.jp", "shopping"),
    ("notion.so", "productivity"),
];

/// `domain: category` mapping kept in a YAML file.
#[derive(Debug, Clone)]
pub struct YamlCategoryStore<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> YamlCategoryStore<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    async fn ensure_exists(&self) -> Result<Vec<u8>> {
        match self.storage.read_file(&self.path).await {
            Ok(data) => Ok(data),
            Err(AuditError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "📝 {} not found, writing a starter template",
                    self.storage.location(&self.path)
                );
                let template = default_template()?;
                self.storage
                    .write_file(&self.path, template.as_bytes())
                    .await?;
                Ok(template.into_bytes())
            }
            Err(e) => Err(e),
        }
    }
}

impl<S: Storage> CategoryStore for YamlCategoryStore<S> {
    async fn load(&self) -> Result<CategoryMapping> {
        let data = self.ensure_exists().await?;
        let mapping = parse_categories(&data, &self.path)?;
        tracing::info!("📚 Loaded {} category entries", mapping.len());
        Ok(mapping)
    }
}

pub fn default_template() -> Result<String> {
    let entries: BTreeMap<&str, &str> = DEFAULT_CATEGORIES.into_iter().collect();
    Ok(serde_yaml::to_string(&entries)?)
}

/// Parses a category document.
///
/// Non-string keys or values are skipped. A document that is not a mapping,
/// or not valid YAML, is rejected.
pub fn parse_categories(data: &[u8], path: &str) -> Result<CategoryMapping> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(CategoryMapping::default());
    }

    let document: Value =
        serde_yaml::from_slice(data).map_err(|e| AuditError::InvalidCategoryStore {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    let mapping = match document {
        Value::Null => return Ok(CategoryMapping::default()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(AuditError::InvalidCategoryStore {
                path: path.to_string(),
                message: format!("expected a mapping, found {}", value_kind(&other)),
            })
        }
    };

    let entries = mapping.iter().filter_map(|(domain, category)| {
        match (domain.as_str(), category.as_str()) {
            (Some(domain), Some(category)) => Some((domain, category)),
            _ => {
                tracing::debug!("Skipping non-string category entry: {:?}", domain);
                None
            }
        }
    });
    Ok(CategoryMapping::from_entries(entries))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
