use crate::adapters::tabular::write_csv;
use crate::config::toml_config::AuditConfig;
use crate::core::aggregator::{aggregate_domains, AggregationReport};
use crate::core::{MailSource, Pipeline, Storage};
use crate::domain::model::SITES_COLUMNS;
use crate::utils::error::Result;

/// 第一階段：從信箱彙整寄件網域並輸出 sites CSV
pub struct AggregatePipeline<M: MailSource, S: Storage> {
    source: M,
    storage: S,
    config: AuditConfig,
}

impl<M: MailSource, S: Storage> AggregatePipeline<M, S> {
    pub fn new(source: M, storage: S, config: AuditConfig) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<M: MailSource, S: Storage> Pipeline for AggregatePipeline<M, S> {
    type Extracted = Vec<String>;
    type Transformed = AggregationReport;

    async fn extract(&self) -> Result<Vec<String>> {
        let message_ids = self
            .source
            .list_message_ids(self.config.gmail.max_messages)
            .await?;

        if message_ids.is_empty() {
            tracing::info!("📭 No messages matched the search query");
        }
        Ok(message_ids)
    }

    async fn transform(&self, message_ids: Vec<String>) -> Result<AggregationReport> {
        Ok(aggregate_domains(&self.source, &message_ids).await)
    }

    async fn load(&self, report: AggregationReport) -> Result<String> {
        let records = report.into_sorted_records();
        if records.is_empty() {
            tracing::info!("📭 No domains could be extracted");
        }

        let data = write_csv(&SITES_COLUMNS, &records)?;
        self.storage
            .write_file(&self.config.output.sites_csv, &data)
            .await?;

        let location = self.storage.location(&self.config.output.sites_csv);
        tracing::info!("💾 Wrote {} (rows={})", location, records.len());
        Ok(location)
    }
}
