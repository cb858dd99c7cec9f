// Composition tests — the analysis pipeline with in-memory collaborators.
//
// These tests exercise the data flow OCR -> translation -> analysis -> topic
// without any network calls: every service trait is implemented by a small
// fake that records how it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use analizador::pipeline::AnalysisPipeline;
use analizador::services::traits::{
    OcrService, Sentiment, SentimentConfidence, TextAnalyzer, Translation, Translator,
};
use analizador::storage::BlobStore;
use analizador::topics::keyword::KeywordClassifier;
use analizador::topics::taxonomy::Taxonomy;
use anyhow::Result;
use async_trait::async_trait;

// ============================================================
// Fakes
// ============================================================

struct FixedOcr(String);

#[async_trait]
impl OcrService for FixedOcr {
    async fn extract_text(&self, _image_url: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct FailingOcr;

#[async_trait]
impl OcrService for FailingOcr {
    async fn extract_text(&self, _image_url: &str) -> Result<String> {
        anyhow::bail!("Azure Vision authentication failed (401 Unauthorized)")
    }
}

/// Returns a fixed translation and records the requested target language.
#[derive(Default)]
struct FixedTranslator {
    text: String,
    calls: AtomicUsize,
    last_target: Mutex<Option<String>>,
}

impl FixedTranslator {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Translator for FixedTranslator {
    async fn translate(&self, _text: &str, to: &str) -> Result<Translation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_target.lock().unwrap() = Some(to.to_string());
        Ok(Translation {
            detected_language: "en".to_string(),
            text: self.text.clone(),
            target_language: to.to_string(),
        })
    }
}

#[derive(Default)]
struct FakeAnalyzer {
    phrases: Vec<String>,
    calls: AtomicUsize,
    last_language: Mutex<Option<String>>,
}

impl FakeAnalyzer {
    fn new(phrases: &[&str]) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TextAnalyzer for FakeAnalyzer {
    async fn sentiment(&self, _text: &str, language: &str) -> Result<Sentiment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_language.lock().unwrap() = Some(language.to_string());
        Ok(Sentiment {
            label: "positive".to_string(),
            confidence: SentimentConfidence {
                positive: 0.9,
                neutral: 0.08,
                negative: 0.02,
            },
        })
    }

    async fn key_phrases(&self, _text: &str, _language: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.phrases.clone())
    }
}

#[derive(Default)]
struct MemoryStore {
    uploads: Mutex<Vec<(String, usize, String)>>,
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.len(), content_type.to_string()));
        Ok(format!("https://blob.test/imagenes-ocr/{file_name}"))
    }
}

fn classifier() -> Arc<KeywordClassifier> {
    Arc::new(KeywordClassifier::new(Arc::new(Taxonomy::builtin().unwrap())))
}

fn pipeline(
    ocr: Arc<dyn OcrService>,
    translator: Arc<FixedTranslator>,
    analyzer: Arc<FakeAnalyzer>,
) -> AnalysisPipeline {
    AnalysisPipeline::new(ocr, translator, analyzer, classifier(), "es")
}

// ============================================================
// Full flow
// ============================================================

#[tokio::test]
async fn image_text_flows_through_to_topic() {
    let translator = Arc::new(FixedTranslator::new("Batería excelente, pantalla con brillo"));
    let analyzer = Arc::new(FakeAnalyzer::new(&["pantalla", "brillo", "batería"]));
    let p = pipeline(
        Arc::new(FixedOcr("Great battery, bright screen".to_string())),
        translator.clone(),
        analyzer.clone(),
    );

    let report = p.analyze("https://blob.test/imagenes-ocr/a.png").await.unwrap();

    assert_eq!(report.image_url, "https://blob.test/imagenes-ocr/a.png");
    assert_eq!(
        report.extracted_text.as_deref(),
        Some("Great battery, bright screen")
    );
    let translation = report.translation.as_ref().unwrap();
    assert_eq!(translation.detected_language, "en");
    assert_eq!(translation.target_language, "es");
    assert_eq!(report.sentiment.as_ref().unwrap().label, "positive");
    assert_eq!(report.key_phrases, vec!["pantalla", "brillo", "batería"]);
    assert_eq!(report.topic.as_deref(), Some("pantalla_y_visualizacion"));
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 2);
    assert_eq!(analyzer.last_language.lock().unwrap().as_deref(), Some("es"));
}

#[tokio::test]
async fn topic_comes_from_key_phrases_with_taxonomy_tie_break() {
    let p = pipeline(
        Arc::new(FixedOcr("text".to_string())),
        Arc::new(FixedTranslator::new("texto")),
        Arc::new(FakeAnalyzer::new(&["batería", "excelente"])),
    );
    let report = p.analyze("https://x").await.unwrap();
    assert_eq!(report.topic.as_deref(), Some("bateria_y_energia"));
}

#[tokio::test]
async fn no_key_phrases_yields_fallback_topic() {
    let p = pipeline(
        Arc::new(FixedOcr("text".to_string())),
        Arc::new(FixedTranslator::new("texto")),
        Arc::new(FakeAnalyzer::new(&[])),
    );
    let report = p.analyze("https://x").await.unwrap();
    assert_eq!(report.topic.as_deref(), Some("otro"));
}

#[tokio::test]
async fn explicit_target_language_reaches_translator() {
    let translator = Arc::new(FixedTranslator::new("excellent"));
    let p = pipeline(
        Arc::new(FixedOcr("excelente".to_string())),
        translator.clone(),
        Arc::new(FakeAnalyzer::new(&["excellent"])),
    );
    let report = p.analyze_into("https://x", "en").await.unwrap();
    assert_eq!(translator.last_target.lock().unwrap().as_deref(), Some("en"));
    assert_eq!(report.translation.unwrap().target_language, "en");
}

// ============================================================
// Short-circuits
// ============================================================

#[tokio::test]
async fn blank_image_skips_translation_and_analysis() {
    let translator = Arc::new(FixedTranslator::new("unused"));
    let analyzer = Arc::new(FakeAnalyzer::new(&["batería"]));
    let p = pipeline(
        Arc::new(FixedOcr("  \n ".to_string())),
        translator.clone(),
        analyzer.clone(),
    );

    let report = p.analyze("https://x").await.unwrap();

    assert!(report.extracted_text.is_none());
    assert!(report.translation.is_none());
    assert!(report.sentiment.is_none());
    assert!(report.topic.is_none());
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_translation_skips_analysis() {
    let analyzer = Arc::new(FakeAnalyzer::new(&["batería"]));
    let p = pipeline(
        Arc::new(FixedOcr("something".to_string())),
        Arc::new(FixedTranslator::new(" ")),
        analyzer.clone(),
    );

    let report = p.analyze("https://x").await.unwrap();

    assert!(report.translation.is_some());
    assert!(report.sentiment.is_none());
    assert!(report.topic.is_none());
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ocr_failure_is_reported_with_stage() {
    let p = pipeline(
        Arc::new(FailingOcr),
        Arc::new(FixedTranslator::new("unused")),
        Arc::new(FakeAnalyzer::new(&[])),
    );
    let err = p.analyze("https://x").await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Text extraction failed"), "{message}");
    assert!(message.contains("authentication failed"), "{message}");
}

// ============================================================
// Upload
// ============================================================

#[tokio::test]
async fn upload_then_analyze_uses_blob_url() {
    let store = MemoryStore::default();
    let p = pipeline(
        Arc::new(FixedOcr("Fast delivery".to_string())),
        Arc::new(FixedTranslator::new("Entrega rápida")),
        Arc::new(FakeAnalyzer::new(&["entrega rápida"])),
    );

    let report = p
        .analyze_upload(&store, "ticket.png", vec![1, 2, 3], "image/png", "es")
        .await
        .unwrap();

    assert_eq!(report.image_url, "https://blob.test/imagenes-ocr/ticket.png");
    assert_eq!(report.topic.as_deref(), Some("atencion_al_cliente_y_envio"));
    let uploads = store.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0], ("ticket.png".to_string(), 3, "image/png".to_string()));
}

#[tokio::test]
async fn report_serializes_with_all_stages() {
    let p = pipeline(
        Arc::new(FixedOcr("text".to_string())),
        Arc::new(FixedTranslator::new("texto")),
        Arc::new(FakeAnalyzer::new(&["precio"])),
    );
    let report = p.analyze("https://x").await.unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["topic"], "precio_y_valor");
    assert_eq!(json["sentiment"]["confidence"]["positive"], 0.9);
    assert_eq!(json["translation"]["detected_language"], "en");
}
