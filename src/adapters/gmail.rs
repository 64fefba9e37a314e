use crate::config::toml_config::GmailConfig;
use crate::domain::model::{Header, HeaderSet};
use crate::domain::ports::MailSource;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Gmail caps `maxResults` for message listing at 500.
const MAX_PAGE_SIZE: usize = 500;

const METADATA_HEADERS: [&str; 5] = ["From", "Reply-To", "Subject", "Date", "List-Id"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMessagesResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessageMetadata {
    #[serde(default)]
    payload: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    #[serde(default)]
    headers: Vec<Header>,
}

/// Read-only Gmail REST client.
///
/// Expects an already-authorized OAuth access token; acquiring or refreshing
/// it is left to the caller.
pub struct GmailClient {
    client: Client,
    api_base: String,
    access_token: String,
    query: String,
}

impl GmailClient {
    pub fn new(api_base: &str, access_token: &str, query: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            query: query.to_string(),
        }
    }

    pub fn from_config(config: &GmailConfig) -> Result<Self> {
        let token = validate_required_field("gmail.access_token", &config.access_token)?;
        validate_non_empty_string("gmail.access_token", token)?;
        Ok(Self::new(&config.api_base, token, &config.query))
    }

    async fn list_page(
        &self,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<ListMessagesResponse> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("maxResults", page_size.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/users/me/messages", self.api_base))
            .bearer_auth(&self.access_token)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MailSource for GmailClient {
    async fn list_message_ids(&self, max_count: usize) -> Result<Vec<String>> {
        tracing::info!("🔍 Searching Gmail messages (max_messages={})", max_count);

        let mut collected: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        while collected.len() < max_count {
            let remaining = max_count - collected.len();
            let page = self
                .list_page(remaining.min(MAX_PAGE_SIZE), page_token.as_deref())
                .await?;

            if page.messages.is_empty() {
                break;
            }

            for message in page.messages {
                collected.push(message.id);
                if collected.len() >= max_count {
                    break;
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::info!("📬 Collected {} message ids", collected.len());
        Ok(collected)
    }

    async fn get_message_headers(&self, message_id: &str) -> Result<HeaderSet> {
        let mut params = vec![("format", "metadata")];
        params.extend(METADATA_HEADERS.iter().map(|h| ("metadataHeaders", *h)));

        let response = self
            .client
            .get(format!("{}/users/me/messages/{}", self.api_base, message_id))
            .bearer_auth(&self.access_token)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let metadata: MessageMetadata = response.json().await?;
        Ok(HeaderSet::new(
            metadata.payload.map(|p| p.headers).unwrap_or_default(),
        ))
    }
}
