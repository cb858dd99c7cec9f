// Image analysis pipeline: OCR → translation → sentiment + key phrases → topic.
//
// Each stage only runs when the previous one produced text. A blank image
// yields a report with just the image URL; the display layer fills in the
// "could not extract" placeholders.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::traits::{OcrService, Sentiment, TextAnalyzer, Translation, Translator};
use crate::storage::BlobStore;
use crate::topics::input::ClassificationInput;
use crate::topics::traits::TopicClassifier;

/// Everything learned about one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub image_url: String,
    /// OCR output; `None` when the image contained no text
    pub extracted_text: Option<String>,
    pub translation: Option<Translation>,
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub key_phrases: Vec<String>,
    pub topic: Option<String>,
}

impl AnalysisReport {
    fn empty(image_url: &str) -> Self {
        Self {
            image_url: image_url.to_string(),
            extracted_text: None,
            translation: None,
            sentiment: None,
            key_phrases: Vec::new(),
            topic: None,
        }
    }
}

/// Wires the collaborators and the topic classifier together.
#[derive(Clone)]
pub struct AnalysisPipeline {
    ocr: Arc<dyn OcrService>,
    translator: Arc<dyn Translator>,
    analyzer: Arc<dyn TextAnalyzer>,
    classifier: Arc<dyn TopicClassifier>,
    target_language: String,
}

impl AnalysisPipeline {
    pub fn new(
        ocr: Arc<dyn OcrService>,
        translator: Arc<dyn Translator>,
        analyzer: Arc<dyn TextAnalyzer>,
        classifier: Arc<dyn TopicClassifier>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            ocr,
            translator,
            analyzer,
            classifier,
            target_language: target_language.into(),
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Analyze an image already reachable at `image_url`, translating into the default language.
    pub async fn analyze(&self, image_url: &str) -> Result<AnalysisReport> {
        self.analyze_into(image_url, &self.target_language).await
    }

    /// Analyze an image, translating into `to`.
    pub async fn analyze_into(&self, image_url: &str, to: &str) -> Result<AnalysisReport> {
        let mut report = AnalysisReport::empty(image_url);

        let text = self
            .ocr
            .extract_text(image_url)
            .await
            .context("Text extraction failed")?;
        if text.trim().is_empty() {
            info!(image_url = image_url, "No text found in image");
            return Ok(report);
        }
        report.extracted_text = Some(text.clone());

        let translation = self
            .translator
            .translate(&text, to)
            .await
            .context("Translation failed")?;
        let translated = translation.text.clone();
        let language = translation.target_language.clone();
        report.translation = Some(translation);
        if translated.trim().is_empty() {
            info!(image_url = image_url, "Translation came back empty");
            return Ok(report);
        }

        let (sentiment, key_phrases) = futures::try_join!(
            self.analyzer.sentiment(&translated, &language),
            self.analyzer.key_phrases(&translated, &language),
        )
        .context("Text analysis failed")?;

        let topic = self
            .classifier
            .classify(&ClassificationInput::phrases(key_phrases.iter().cloned()));

        info!(
            image_url = image_url,
            sentiment = %sentiment.label,
            key_phrases = key_phrases.len(),
            topic = %topic,
            "Analyzed image"
        );

        report.sentiment = Some(sentiment);
        report.key_phrases = key_phrases;
        report.topic = Some(topic);
        Ok(report)
    }

    /// Upload an image to the blob store, then analyze it from its new URL.
    pub async fn analyze_upload(
        &self,
        store: &dyn BlobStore,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        to: &str,
    ) -> Result<AnalysisReport> {
        let url = store
            .upload(file_name, bytes, content_type)
            .await
            .context("Image upload failed")?;
        self.analyze_into(&url, to).await
    }
}
