// Azure AI Vision Image Analysis — the "read" (OCR) feature.
//
// API docs: https://learn.microsoft.com/azure/ai-services/computer-vision/how-to/call-analyze-image-40

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{base_url, ensure_success, http_client, SUBSCRIPTION_KEY_HEADER};
use crate::services::traits::OcrService;

const API_VERSION: &str = "2023-10-01";

/// OCR through Azure AI Vision.
pub struct AzureVisionOcr {
    client: Client,
    endpoint: String,
    key: String,
}

impl AzureVisionOcr {
    pub fn new(endpoint: &str, key: String) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: base_url(endpoint),
            key,
        })
    }
}

#[async_trait]
impl OcrService for AzureVisionOcr {
    async fn extract_text(&self, image_url: &str) -> Result<String> {
        let url = format!("{}/computervision/imageanalysis:analyze", self.endpoint);

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", API_VERSION), ("features", "read")])
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .json(&AnalyzeRequest { url: image_url })
            .send()
            .await
            .context("Failed to call Azure Vision")?;

        let result: AnalyzeResponse = ensure_success(response, "Azure Vision")
            .await?
            .json()
            .await
            .context("Failed to parse Azure Vision response")?;

        let text = collect_text(&result);
        debug!(
            image_url = image_url,
            chars = text.chars().count(),
            "Extracted text from image"
        );
        Ok(text)
    }
}

/// Join every recognized line (all blocks, in order) with newlines.
fn collect_text(response: &AnalyzeResponse) -> String {
    let Some(read) = &response.read_result else {
        return String::new();
    };

    let mut text = String::new();
    for block in &read.blocks {
        for line in &block.lines {
            text.push_str(&line.text);
            text.push('\n');
        }
    }
    text.trim().to_string()
}

// --- Image Analysis request/response types ---

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    read_result: Option<ReadResult>,
}

#[derive(Deserialize)]
struct ReadResult {
    #[serde(default)]
    blocks: Vec<ReadBlock>,
}

#[derive(Deserialize)]
struct ReadBlock {
    #[serde(default)]
    lines: Vec<ReadLine>,
}

#[derive(Deserialize)]
struct ReadLine {
    text: String,
}
