use crate::core::extractor::extract_domain;
use crate::domain::model::DomainRecord;
use crate::domain::ports::MailSource;
use std::collections::HashMap;

const PROGRESS_INTERVAL: usize = 50;

/// Why a message did not contribute to any domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FetchFailed { message_id: String, error: String },
    NoDomain { message_id: String },
}

impl SkipReason {
    pub fn message_id(&self) -> &str {
        match self {
            SkipReason::FetchFailed { message_id, .. } | SkipReason::NoDomain { message_id } => {
                message_id
            }
        }
    }
}

/// Per-message outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Counted { domain: String },
    Skipped(SkipReason),
}

/// Records collected in a run plus what happened to every message.
#[derive(Debug, Clone, Default)]
pub struct AggregationReport {
    pub records: Vec<DomainRecord>,
    pub processed: usize,
    pub skipped: Vec<SkipReason>,
}

impl AggregationReport {
    pub fn fetch_failures(&self) -> usize {
        self.skipped
            .iter()
            .filter(|r| matches!(r, SkipReason::FetchFailed { .. }))
            .count()
    }

    /// Records in output order: count descending, then domain ascending.
    pub fn into_sorted_records(self) -> Vec<DomainRecord> {
        let mut records = self.records;
        records.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
        records
    }
}

/// Folds extracted domains into one record per domain.
///
/// The first message seen for a domain supplies the samples; later messages
/// only bump the count.
#[derive(Debug, Default)]
pub struct DomainAggregator {
    records: HashMap<String, DomainRecord>,
    processed: usize,
    skipped: Vec<SkipReason>,
}

impl DomainAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(
        &mut self,
        domain: String,
        sample_from: &str,
        sample_subject: &str,
        sample_list_id: &str,
    ) {
        self.processed += 1;
        self.records
            .entry(domain)
            .and_modify(|record| record.count += 1)
            .or_insert_with_key(|domain| DomainRecord {
                domain: domain.clone(),
                count: 1,
                sample_from: sample_from.to_string(),
                sample_subject: sample_subject.to_string(),
                sample_list_id: sample_list_id.to_string(),
            });
    }

    pub fn skip(&mut self, reason: SkipReason) {
        self.skipped.push(reason);
    }

    pub fn finish(self) -> AggregationReport {
        AggregationReport {
            records: self.records.into_values().collect(),
            processed: self.processed,
            skipped: self.skipped,
        }
    }
}

/// Fetches headers for each message in order and aggregates by sender domain.
///
/// Fetch failures and messages without a usable domain are recorded in the
/// report and never abort the run.
pub async fn aggregate_domains<M>(source: &M, message_ids: &[String]) -> AggregationReport
where
    M: MailSource + ?Sized,
{
    let total = message_ids.len();
    let mut aggregator = DomainAggregator::new();

    for (index, message_id) in message_ids.iter().enumerate() {
        let position = index + 1;
        if position % PROGRESS_INTERVAL == 0 || position == total {
            tracing::info!("📨 Processing message {}/{}", position, total);
        }

        match process_message(source, message_id, &mut aggregator).await {
            MessageOutcome::Counted { domain } => {
                tracing::trace!("message_id={} -> {}", message_id, domain);
            }
            MessageOutcome::Skipped(reason) => aggregator.skip(reason),
        }
    }

    let report = aggregator.finish();
    tracing::info!(
        "📊 Aggregated {} domains from {} messages ({} skipped, {} fetch failures)",
        report.records.len(),
        report.processed,
        report.skipped.len(),
        report.fetch_failures()
    );
    report
}

async fn process_message<M>(
    source: &M,
    message_id: &str,
    aggregator: &mut DomainAggregator,
) -> MessageOutcome
where
    M: MailSource + ?Sized,
{
    let headers = match source.get_message_headers(message_id).await {
        Ok(headers) => headers,
        Err(e) => {
            tracing::warn!("⚠️ Failed to fetch message_id={}: {}", message_id, e);
            return MessageOutcome::Skipped(SkipReason::FetchFailed {
                message_id: message_id.to_string(),
                error: e.to_string(),
            });
        }
    };

    let extraction = extract_domain(&headers);
    let Some(domain) = extraction.domain.clone() else {
        tracing::debug!("No sender domain in message_id={}", message_id);
        return MessageOutcome::Skipped(SkipReason::NoDomain {
            message_id: message_id.to_string(),
        });
    };

    aggregator.observe(
        domain.clone(),
        extraction.sample_sender(),
        extraction.subject.as_deref().unwrap_or(""),
        headers.get("List-Id").unwrap_or(""),
    );
    MessageOutcome::Counted { domain }
}
