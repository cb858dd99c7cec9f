// Collaborator traits — OCR, translation and text analysis.
//
// The pipeline only talks to these traits. The Azure implementations live in
// `services::azure`; tests substitute in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of translating one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Source language reported by the service ("desconocido" when absent)
    pub detected_language: String,
    pub text: String,
    /// Language the text was actually translated into
    pub target_language: String,
}

/// Confidence triple from sentiment analysis, each rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentConfidence {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Document-level sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// "positive", "neutral", "negative" or "mixed"
    pub label: String,
    pub confidence: SentimentConfidence,
}

/// Extracts text from an image reachable at a URL.
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Returns the recognized text, or an empty string when the image has none.
    async fn extract_text(&self, image_url: &str) -> Result<String>;
}

/// Translates text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, to: &str) -> Result<Translation>;
}

/// Sentiment scoring and key-phrase extraction.
///
/// `language` is the ISO code of `text` (after translation, the target language).
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn sentiment(&self, text: &str, language: &str) -> Result<Sentiment>;

    /// Salient phrases, in the order the service ranks them.
    async fn key_phrases(&self, text: &str, language: &str) -> Result<Vec<String>>;
}

/// Round a confidence score to 3 decimals.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(0.9996), 1.0);
        assert_eq!(round3(0.0), 0.0);
    }
}
