// Colored terminal output for analysis reports, classification tallies and
// the taxonomy listing. The main.rs commands delegate here.

use colored::Colorize;

use super::truncate_chars;
use crate::pipeline::AnalysisReport;
use crate::topics::keyword::MatchTally;
use crate::topics::taxonomy::Taxonomy;

pub const NO_TEXT: &str = "Sin texto que extraer";
pub const NO_LANGUAGE: &str = "No se pudo detectar el idioma";
pub const NO_TRANSLATION: &str = "No se pudo realizar la traducción";
pub const NO_SENTIMENT: &str = "No se pudo detectar el sentimiento";
pub const NO_TOPIC: &str = "No se pudo extraer el tema";

/// Longer texts are cut in the terminal view; `--json` keeps them whole.
const MAX_TEXT_CHARS: usize = 400;

/// Display a full image analysis report.
pub fn display_report(report: &AnalysisReport) {
    println!("\n{}", "=== Image Analysis ===".bold());
    println!();
    println!("  {:<18} {}", "Image:".dimmed(), report.image_url);

    let extracted = report.extracted_text.as_deref().unwrap_or(NO_TEXT);
    println!(
        "  {:<18} {}",
        "Extracted text:".dimmed(),
        truncate_chars(extracted, MAX_TEXT_CHARS)
    );

    let (detected, target, translated) = match &report.translation {
        Some(t) => (
            t.detected_language.as_str(),
            t.target_language.as_str(),
            t.text.as_str(),
        ),
        None => (NO_LANGUAGE, NO_LANGUAGE, NO_TRANSLATION),
    };
    println!("  {:<18} {}", "Language:".dimmed(), detected);
    println!("  {:<18} {}", "Translated to:".dimmed(), target);
    println!(
        "  {:<18} {}",
        "Translation:".dimmed(),
        truncate_chars(translated, MAX_TEXT_CHARS)
    );

    match &report.sentiment {
        Some(s) => {
            println!(
                "  {:<18} {} (+{:.3} / ={:.3} / -{:.3})",
                "Sentiment:".dimmed(),
                colorize_sentiment(&s.label),
                s.confidence.positive,
                s.confidence.neutral,
                s.confidence.negative,
            );
        }
        None => println!("  {:<18} {}", "Sentiment:".dimmed(), NO_SENTIMENT),
    }

    if !report.key_phrases.is_empty() {
        println!(
            "  {:<18} {}",
            "Key phrases:".dimmed(),
            report.key_phrases.join(", ")
        );
    }

    let topic = report.topic.as_deref().unwrap_or(NO_TOPIC);
    println!("  {:<18} {}", "Topic:".dimmed(), topic.bold());
    println!();
}

/// Display the per-topic match counts behind a classification.
pub fn display_tally(tally: &MatchTally) {
    println!("\n{} {}", "Topic:".dimmed(), tally.label().bold());

    if tally.is_empty() {
        println!("  {}", "No keyword matched.".dimmed());
        return;
    }

    let winner = tally.winner();
    for entry in tally.iter() {
        let marker = if Some(entry.topic.as_str()) == winner {
            "*".bright_green()
        } else {
            " ".normal()
        };
        println!(
            "  {} {:<32} {:>2}  {}",
            marker,
            entry.topic,
            entry.count,
            entry.keywords.join(", ").dimmed()
        );
    }
    println!();
}

/// List every topic with its keywords, in tie-break order.
pub fn display_taxonomy(taxonomy: &Taxonomy) {
    println!(
        "\n{}",
        format!("=== Taxonomy ({} topics) ===", taxonomy.len()).bold()
    );
    println!();
    for (i, topic) in taxonomy.topics().iter().enumerate() {
        let keywords: Vec<&str> = topic.keywords().iter().map(|k| k.text()).collect();
        println!("  {:>2}. {}", i + 1, topic.label().bold());
        println!("      {}", keywords.join(", ").dimmed());
    }
    println!();
}

fn colorize_sentiment(label: &str) -> colored::ColoredString {
    match label {
        "positive" => label.bright_green(),
        "negative" => label.red(),
        "mixed" => label.yellow(),
        _ => label.normal(),
    }
}
