// Azure Translator v3 — translate with automatic source language detection.
//
// API docs: https://learn.microsoft.com/azure/ai-services/translator/reference/v3-0-translate

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{base_url, ensure_success, http_client, SUBSCRIPTION_KEY_HEADER};
use crate::services::traits::{Translation, Translator};

const API_VERSION: &str = "3.0";
const REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";
const UNKNOWN_LANGUAGE: &str = "desconocido";

/// Translation through Azure Translator.
pub struct AzureTranslator {
    client: Client,
    url: String,
    key: String,
    /// Required for regional and multi-service resources
    region: Option<String>,
}

impl AzureTranslator {
    pub fn new(endpoint: &str, key: String, region: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            url: translate_url(endpoint),
            key,
            region,
        })
    }
}

/// The global endpoint serves `/translate`; custom-domain resources nest it.
fn translate_url(endpoint: &str) -> String {
    let base = base_url(endpoint);
    if base.contains("cognitiveservices.azure.com") {
        format!("{base}/translator/text/v3.0/translate")
    } else {
        format!("{base}/translate")
    }
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate(&self, text: &str, to: &str) -> Result<Translation> {
        let mut request = self
            .client
            .post(&self.url)
            .query(&[("api-version", API_VERSION), ("to", to)])
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .json(&[TranslateRequest { text }]);
        if let Some(region) = &self.region {
            request = request.header(REGION_HEADER, region);
        }

        let response = request
            .send()
            .await
            .context("Failed to call Azure Translator")?;

        let results: Vec<TranslateResult> = ensure_success(response, "Azure Translator")
            .await?
            .json()
            .await
            .context("Failed to parse Azure Translator response")?;

        let translation = into_translation(results, to)?;
        debug!(
            detected = %translation.detected_language,
            to = %translation.target_language,
            "Translated text"
        );
        Ok(translation)
    }
}

fn into_translation(results: Vec<TranslateResult>, requested: &str) -> Result<Translation> {
    let Some(result) = results.into_iter().next() else {
        anyhow::bail!("Azure Translator returned no results");
    };
    if result.translations.is_empty() {
        anyhow::bail!("Azure Translator returned no translations");
    }

    let detected_language = result
        .detected_language
        .map(|d| d.language)
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
    let target_language = result
        .translations
        .last()
        .map(|t| t.to.clone())
        .unwrap_or_else(|| requested.to_string());
    let text = result
        .translations
        .into_iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Translation {
        detected_language,
        text,
        target_language,
    })
}

// --- Translator request/response types ---

#[derive(Serialize)]
struct TranslateRequest<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResult {
    detected_language: Option<DetectedLanguage>,
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
struct DetectedLanguage {
    language: String,
}

#[derive(Deserialize)]
struct TranslatedText {
    text: String,
    to: String,
}
