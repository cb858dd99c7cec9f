// Azure AI Language (Text Analytics v3.1) — sentiment and key phrases.
//
// Both endpoints take a batch of documents; we always send exactly one and
// surface a per-document error as a failure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{base_url, ensure_success, http_client, SUBSCRIPTION_KEY_HEADER};
use crate::services::traits::{round3, Sentiment, SentimentConfidence, TextAnalyzer};

const DOCUMENT_ID: &str = "1";

/// Sentiment and key-phrase extraction through Azure AI Language.
pub struct AzureLanguage {
    client: Client,
    endpoint: String,
    key: String,
}

impl AzureLanguage {
    pub fn new(endpoint: &str, key: String) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: base_url(endpoint),
            key,
        })
    }

    /// Send one document. The language hint matters: without it the service assumes English.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        text: &str,
        language: &str,
    ) -> Result<T> {
        let url = format!("{}/text/analytics/v3.1/{}", self.endpoint, operation);
        let request = DocumentsRequest {
            documents: vec![InputDocument {
                id: DOCUMENT_ID,
                text,
                language: Some(language).filter(|l| !l.is_empty()),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to call Azure Language {operation}"))?;

        let body: DocumentsResponse<T> = ensure_success(response, "Azure Language")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse Azure Language {operation} response"))?;

        body.into_single(operation)
    }
}

#[async_trait]
impl TextAnalyzer for AzureLanguage {
    async fn sentiment(&self, text: &str, language: &str) -> Result<Sentiment> {
        let doc: SentimentDocument = self.call("sentiment", text, language).await?;
        let sentiment = doc.into_sentiment();
        debug!(sentiment = %sentiment.label, "Analyzed sentiment");
        Ok(sentiment)
    }

    async fn key_phrases(&self, text: &str, language: &str) -> Result<Vec<String>> {
        let doc: KeyPhrasesDocument = self.call("keyPhrases", text, language).await?;
        debug!(count = doc.key_phrases.len(), "Extracted key phrases");
        Ok(doc.key_phrases)
    }
}

// --- Text Analytics request/response types ---

#[derive(Serialize)]
struct DocumentsRequest<'a> {
    documents: Vec<InputDocument<'a>>,
}

#[derive(Serialize)]
struct InputDocument<'a> {
    id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct DocumentsResponse<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

impl<T> DocumentsResponse<T> {
    fn into_single(self, operation: &str) -> Result<T> {
        if let Some(err) = self.errors.into_iter().next() {
            anyhow::bail!(
                "Azure Language {operation} rejected the document: {} ({})",
                err.error.message,
                err.error.code
            );
        }
        self.documents
            .into_iter()
            .next()
            .with_context(|| format!("Azure Language {operation} returned no documents"))
    }
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SentimentDocument {
    sentiment: String,
    confidence_scores: ConfidenceScores,
}

impl SentimentDocument {
    fn into_sentiment(self) -> Sentiment {
        Sentiment {
            label: self.sentiment,
            confidence: SentimentConfidence {
                positive: round3(self.confidence_scores.positive),
                neutral: round3(self.confidence_scores.neutral),
                negative: round3(self.confidence_scores.negative),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfidenceScores {
    positive: f64,
    neutral: f64,
    negative: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyPhrasesDocument {
    key_phrases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_document_rounds_scores() {
        let body: DocumentsResponse<SentimentDocument> = serde_json::from_str(
            r#"{"documents": [{"id": "1", "sentiment": "positive",
                "confidenceScores": {"positive": 0.98765, "neutral": 0.01, "negative": 0.00235},
                "sentences": [], "warnings": []}],
               "errors": [], "modelVersion": "2022-11-01"}"#,
        )
        .unwrap();
        let sentiment = body.into_single("sentiment").unwrap().into_sentiment();
        assert_eq!(sentiment.label, "positive");
        assert_eq!(sentiment.confidence.positive, 0.988);
        assert_eq!(sentiment.confidence.neutral, 0.01);
        assert_eq!(sentiment.confidence.negative, 0.002);
    }

    #[test]
    fn test_key_phrases_keep_service_order() {
        let body: DocumentsResponse<KeyPhrasesDocument> = serde_json::from_str(
            r#"{"documents": [{"id": "1", "keyPhrases": ["batería", "envío rápido"], "warnings": []}],
               "errors": []}"#,
        )
        .unwrap();
        let doc = body.into_single("keyPhrases").unwrap();
        assert_eq!(doc.key_phrases, vec!["batería", "envío rápido"]);
    }

    #[test]
    fn test_document_error_is_reported() {
        let body: DocumentsResponse<KeyPhrasesDocument> = serde_json::from_str(
            r#"{"documents": [],
               "errors": [{"id": "1", "error": {"code": "InvalidArgument", "message": "Document text is empty."}}]}"#,
        )
        .unwrap();
        let err = body.into_single("keyPhrases").unwrap_err();
        assert!(err.to_string().contains("Document text is empty."));
    }

    #[test]
    fn test_missing_document_is_an_error() {
        let body: DocumentsResponse<KeyPhrasesDocument> =
            serde_json::from_str(r#"{"documents": []}"#).unwrap();
        assert!(body.into_single("keyPhrases").is_err());
    }

    #[test]
    fn test_request_omits_missing_language() {
        let req = DocumentsRequest {
            documents: vec![InputDocument {
                id: "1",
                text: "hola",
                language: None,
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["documents"][0].get("language").is_none());
    }
}
