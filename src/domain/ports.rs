use crate::domain::model::{CategoryMapping, HeaderSet};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human readable location of `path`, used in logs and engine output.
    fn location(&self, path: &str) -> String;
}

/// Mailbox access needed by the aggregate stage.
#[async_trait]
pub trait MailSource: Send + Sync {
    /// Identifiers of matching messages, newest first, at most `max_count`.
    async fn list_message_ids(&self, max_count: usize) -> Result<Vec<String>>;
    async fn get_message_headers(&self, message_id: &str) -> Result<HeaderSet>;
}

pub trait CategoryStore: Send + Sync {
    /// Loads the mapping once for a run, creating a default store if none exists.
    fn load(&self) -> impl std::future::Future<Output = Result<CategoryMapping>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Transformed: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    async fn load(&self, result: Self::Transformed) -> Result<String>;
}
