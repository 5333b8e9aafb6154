use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{ProviderResult, TranslationProvider};
use crate::error::{NetworkError, ProviderError, Result};

const PROVIDER: &str = "LibreTranslate";

#[derive(Serialize, Debug)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: Option<String>,
}

#[derive(Clone)]
pub struct LibreTranslateClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("lyrics-bridge/{}", version))
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        })
    }

    fn request_body<'a>(&'a self, text: &'a str, target_lang: &'a str) -> TranslateBody<'a> {
        TranslateBody {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate(&self, text: &str, target_lang: &str) -> ProviderResult<Option<String>> {
        let url = format!("{}/translate", self.base_url);
        debug!("Translating {} chars to {} via LibreTranslate", text.chars().count(), target_lang);

        let response = self.client
            .post(&url)
            .json(&self.request_body(text, target_lang))
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::network(PROVIDER, NetworkError::RateLimit));
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::network(PROVIDER, NetworkError::Authentication));
        }
        if !status.is_success() {
            return Err(ProviderError::Status { provider: PROVIDER, status: status.as_u16() });
        }

        let reply: TranslateReply = response
            .json()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e))?;

        Ok(reply.translated_text)
    }
}
