use crate::adapters::tabular::{read_sites_csv, write_csv};
use crate::config::toml_config::AuditConfig;
use crate::core::catalog::build_catalog;
use crate::core::{CatalogRow, CategoryMapping, CategoryStore, DomainRecord, Pipeline, Storage};
use crate::domain::model::{CategorySource, CATALOG_COLUMNS};
use crate::utils::error::{AuditError, Result};

/// Inputs of the catalog stage, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct CatalogInput {
    pub sites: Vec<DomainRecord>,
    pub mapping: CategoryMapping,
}

/// 第二階段：讀取 sites CSV，套用分類並輸出 catalog CSV
pub struct CatalogPipeline<S: Storage, C: CategoryStore> {
    storage: S,
    categories: C,
    config: AuditConfig,
}

impl<S: Storage, C: CategoryStore> CatalogPipeline<S, C> {
    pub fn new(storage: S, categories: C, config: AuditConfig) -> Self {
        Self {
            storage,
            categories,
            config,
        }
    }

    async fn read_sites(&self) -> Result<Vec<DomainRecord>> {
        let path = &self.config.output.sites_csv;
        match self.storage.read_file(path).await {
            Ok(data) => read_sites_csv(&data, path),
            Err(AuditError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "⚠️ Input {} does not exist, building an empty catalog",
                    self.storage.location(path)
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: CategoryStore> Pipeline for CatalogPipeline<S, C> {
    type Extracted = CatalogInput;
    type Transformed = Vec<CatalogRow>;

    async fn extract(&self) -> Result<CatalogInput> {
        let sites = self.read_sites().await?;
        tracing::info!("📥 Read {} site rows", sites.len());
        let mapping = self.categories.load().await?;
        Ok(CatalogInput { sites, mapping })
    }

    async fn transform(&self, input: CatalogInput) -> Result<Vec<CatalogRow>> {
        let rows = build_catalog(&input.sites, &input.mapping);
        tracing::debug!(
            "Categorized {} rows ({} from mapping)",
            rows.len(),
            rows.iter()
                .filter(|r| r.source == CategorySource::Dict)
                .count()
        );
        Ok(rows)
    }

    async fn load(&self, rows: Vec<CatalogRow>) -> Result<String> {
        let data = write_csv(&CATALOG_COLUMNS, &rows)?;
        self.storage
            .write_file(&self.config.output.catalog_csv, &data)
            .await?;

        let location = self.storage.location(&self.config.output.catalog_csv);
        tracing::info!("💾 Wrote {} (rows={})", location, rows.len());
        Ok(location)
    }
}
