use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default blob container for uploaded images.
pub const DEFAULT_CONTAINER: &str = "imagenes-ocr";
/// Default translation target.
pub const DEFAULT_TARGET_LANGUAGE: &str = "es";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub storage_account: String,
    /// Base64 account key from the Azure portal
    pub storage_key: String,
    pub storage_container: String,
    /// Overrides the `https://<account>.blob.core.windows.net` endpoint (e.g. a local emulator)
    pub storage_endpoint: Option<String>,
    pub vision_endpoint: String,
    pub vision_key: String,
    pub translator_endpoint: String,
    pub translator_key: String,
    /// Only needed for regional Translator resources
    pub translator_region: Option<String>,
    pub language_endpoint: String,
    pub language_key: String,
    /// Language every extracted text is translated into (default "es")
    pub target_language: String,
    /// Optional JSON taxonomy replacing the built-in topic table
    pub taxonomy_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required at load time — each command checks for the
    /// settings it actually uses via the `require_*` methods.
    pub fn load() -> Result<Self> {
        Ok(Self {
            storage_account: env::var("AZURE_STORAGE_ACCOUNT").unwrap_or_default(),
            storage_key: env::var("AZURE_STORAGE_KEY").unwrap_or_default(),
            storage_container: env::var("AZURE_STORAGE_CONTAINER")
                .unwrap_or_else(|_| DEFAULT_CONTAINER.to_string()),
            storage_endpoint: non_empty("AZURE_STORAGE_ENDPOINT"),
            vision_endpoint: env::var("AZURE_VISION_ENDPOINT").unwrap_or_default(),
            vision_key: env::var("AZURE_VISION_KEY").unwrap_or_default(),
            translator_endpoint: env::var("AZURE_TRANSLATOR_ENDPOINT")
                .unwrap_or_else(|_| "https://api.cognitive.microsofttranslator.com".to_string()),
            translator_key: env::var("AZURE_TRANSLATOR_KEY").unwrap_or_default(),
            translator_region: non_empty("AZURE_TRANSLATOR_REGION"),
            language_endpoint: env::var("AZURE_LANGUAGE_ENDPOINT").unwrap_or_default(),
            language_key: env::var("AZURE_LANGUAGE_KEY").unwrap_or_default(),
            target_language: non_empty("ANALIZADOR_TARGET_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
            taxonomy_path: non_empty("ANALIZADOR_TAXONOMY_PATH").map(PathBuf::from),
        })
    }

    /// Check the blob storage settings. Needed to analyze a local file.
    pub fn require_storage(&self) -> Result<()> {
        require(&[
            ("AZURE_STORAGE_ACCOUNT", &self.storage_account),
            ("AZURE_STORAGE_KEY", &self.storage_key),
        ])
    }

    /// Check the OCR, translation and language settings used by every analysis.
    pub fn require_services(&self) -> Result<()> {
        require(&[
            ("AZURE_VISION_ENDPOINT", &self.vision_endpoint),
            ("AZURE_VISION_KEY", &self.vision_key),
            ("AZURE_TRANSLATOR_ENDPOINT", &self.translator_endpoint),
            ("AZURE_TRANSLATOR_KEY", &self.translator_key),
            ("AZURE_LANGUAGE_ENDPOINT", &self.language_endpoint),
            ("AZURE_LANGUAGE_KEY", &self.language_key),
        ])
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn require(vars: &[(&str, &String)]) -> Result<()> {
    let missing: Vec<&str> = vars
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "{} not set. Add them to your .env file.\n\
             See .env.example for the required variables.",
            missing.join(", ")
        );
    }
    Ok(())
}
