use std::path::PathBuf;
use std::sync::Arc;

use analizador::config::Config;
use analizador::output::terminal;
use analizador::pipeline::AnalysisPipeline;
use analizador::services::azure::{AzureLanguage, AzureTranslator, AzureVisionOcr};
use analizador::storage::{image_content_type, AzureBlobStore};
use analizador::topics::input::ClassificationInput;
use analizador::topics::keyword::KeywordClassifier;
use analizador::topics::taxonomy::Taxonomy;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Analizador: extract, translate and classify the text in an image.
///
/// Images are read with Azure AI Vision, translated with Azure Translator,
/// scored for sentiment with Azure AI Language, and assigned a topic by a
/// local keyword classifier.
#[derive(Parser)]
#[command(name = "analizador", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify text into a topic (offline, no credentials needed)
    Classify {
        /// Text fragments; several arguments are treated as a list of key phrases
        #[arg(required = true)]
        text: Vec<String>,

        /// Show the per-topic keyword matches
        #[arg(long)]
        explain: bool,

        /// Print JSON instead of terminal output
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },

    /// List the topics and keywords of the active taxonomy
    Taxonomy {
        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },

    /// Run the full pipeline on an image (OCR, translation, sentiment, topic)
    Analyze {
        /// Public URL of an image already in storage
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        url: Option<String>,

        /// Local image to upload to blob storage first
        #[arg(long)]
        file: Option<PathBuf>,

        /// Target language (default: ANALIZADOR_TARGET_LANGUAGE or "es")
        #[arg(long)]
        to: Option<String>,

        /// Print JSON instead of terminal output
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },

    /// Start the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind to (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },
}

#[derive(Args)]
struct TaxonomyArgs {
    /// JSON taxonomy file (default: ANALIZADOR_TAXONOMY_PATH or the built-in table)
    #[arg(long = "taxonomy")]
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("analizador=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Classify {
            text,
            explain,
            json,
            taxonomy,
        } => {
            let classifier = load_classifier(&config, &taxonomy)?;
            let input = ClassificationInput::phrases(text);
            let tally = classifier.tally(&input);

            if json {
                let value = if explain {
                    serde_json::json!({ "topic": tally.label(), "tally": tally })
                } else {
                    serde_json::json!({ "topic": tally.label() })
                };
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if explain {
                terminal::display_tally(&tally);
            } else {
                println!("{}", tally.label());
            }
        }

        Commands::Taxonomy { taxonomy } => {
            let classifier = load_classifier(&config, &taxonomy)?;
            terminal::display_taxonomy(classifier.taxonomy());
        }

        Commands::Analyze {
            url,
            file,
            to,
            json,
            taxonomy,
        } => {
            config.require_services()?;
            let classifier = Arc::new(load_classifier(&config, &taxonomy)?);
            let pipeline = build_pipeline(&config, classifier)?;
            let to = to.unwrap_or_else(|| config.target_language.clone());

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} {msg}")
                    .context("Invalid progress template")?,
            );
            spinner.enable_steady_tick(std::time::Duration::from_millis(120));

            let report = match (url, file) {
                (Some(url), _) => {
                    spinner.set_message("Analyzing image...");
                    pipeline.analyze_into(&url, &to).await
                }
                (None, Some(path)) => {
                    config.require_storage()?;
                    let store = build_store(&config)?;
                    let bytes = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "upload".to_string());
                    spinner.set_message("Uploading and analyzing image...");
                    pipeline
                        .analyze_upload(
                            &store,
                            &file_name,
                            bytes,
                            image_content_type(&file_name),
                            &to,
                        )
                        .await
                }
                (None, None) => anyhow::bail!("Pass either --url or --file"),
            };
            spinner.finish_and_clear();
            let report = report?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve {
            port,
            bind,
            taxonomy,
        } => {
            config.require_services()?;
            config.require_storage()?;
            let classifier = Arc::new(load_classifier(&config, &taxonomy)?);
            let pipeline = build_pipeline(&config, classifier.clone())?;
            let state = analizador::web::AppState {
                classifier,
                pipeline: Arc::new(pipeline),
                store: Arc::new(build_store(&config)?),
            };
            analizador::web::run_server(state, port, &bind).await?;
        }
    }

    Ok(())
}

/// Build the classifier from `--taxonomy`, then ANALIZADOR_TAXONOMY_PATH, then the built-in table.
fn load_classifier(config: &Config, args: &TaxonomyArgs) -> Result<KeywordClassifier> {
    let path = args.path.as_deref().or(config.taxonomy_path.as_deref());
    let taxonomy = Taxonomy::load(path).context("Failed to load taxonomy")?;
    info!(topics = taxonomy.len(), "Taxonomy ready");
    Ok(KeywordClassifier::new(Arc::new(taxonomy)))
}

/// Wire the Azure service clients into an analysis pipeline.
fn build_pipeline(config: &Config, classifier: Arc<KeywordClassifier>) -> Result<AnalysisPipeline> {
    let ocr = AzureVisionOcr::new(&config.vision_endpoint, config.vision_key.clone())?;
    let translator = AzureTranslator::new(
        &config.translator_endpoint,
        config.translator_key.clone(),
        config.translator_region.clone(),
    )?;
    let language = AzureLanguage::new(&config.language_endpoint, config.language_key.clone())?;

    Ok(AnalysisPipeline::new(
        Arc::new(ocr),
        Arc::new(translator),
        Arc::new(language),
        classifier,
        config.target_language.clone(),
    ))
}

fn build_store(config: &Config) -> Result<AzureBlobStore> {
    AzureBlobStore::new(
        &config.storage_account,
        &config.storage_key,
        &config.storage_container,
        config.storage_endpoint.as_deref(),
    )
}
