// Taxonomy — the ordered topic → keyword table the classifier matches against.
//
// Built once (from the built-in table or a JSON file) and never mutated.
// Every keyword is compiled into a literal whole-word pattern at build time,
// so classification itself never touches the regex compiler.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::builtin::BUILTIN_TOPICS;
use super::error::TaxonomyError;
use super::FALLBACK_TOPIC;

/// One entry as written in a taxonomy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEntry {
    pub topic: String,
    pub keywords: Vec<String>,
}

/// A keyword together with its compiled whole-word pattern.
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    pattern: Regex,
}

impl Keyword {
    fn compile(topic: &str, raw: &str) -> Result<Self, TaxonomyError> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Err(TaxonomyError::BlankKeyword {
                topic: topic.to_string(),
            });
        }

        // \b is Unicode-aware in `regex`, so "batería" and "envío" get real boundaries.
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&text))).map_err(|source| {
            TaxonomyError::Pattern {
                topic: topic.to_string(),
                keyword: text.clone(),
                source,
            }
        })?;

        Ok(Self { text, pattern })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whole-word test against an already lower-cased corpus.
    pub fn is_match(&self, corpus: &str) -> bool {
        self.pattern.is_match(corpus)
    }
}

/// A labelled topic and its de-duplicated keyword list.
#[derive(Debug, Clone)]
pub struct Topic {
    label: String,
    keywords: Vec<Keyword>,
}

impl Topic {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }
}

/// Ordered, immutable topic table.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    topics: Vec<Topic>,
}

impl Taxonomy {
    /// Build a taxonomy from ordered (label, keywords) entries.
    ///
    /// Keywords are trimmed, lower-cased and de-duplicated per topic (first
    /// occurrence wins). The same keyword may still appear under several topics.
    pub fn new<L, K, I>(entries: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = (L, Vec<K>)>,
        L: Into<String>,
        K: AsRef<str>,
    {
        let mut seen_labels = HashSet::new();
        let mut topics = Vec::new();

        for (label, raw_keywords) in entries {
            let label: String = label.into();
            let label = label.trim().to_string();
            if label.is_empty() {
                return Err(TaxonomyError::EmptyLabel);
            }
            if label == FALLBACK_TOPIC {
                return Err(TaxonomyError::ReservedLabel(label));
            }
            if !seen_labels.insert(label.clone()) {
                return Err(TaxonomyError::DuplicateLabel(label));
            }

            let mut seen_keywords = HashSet::new();
            let mut keywords = Vec::with_capacity(raw_keywords.len());
            for raw in &raw_keywords {
                let keyword = Keyword::compile(&label, raw.as_ref())?;
                if seen_keywords.insert(keyword.text.clone()) {
                    keywords.push(keyword);
                }
            }

            topics.push(Topic { label, keywords });
        }

        Ok(Self { topics })
    }

    /// The built-in Spanish product-review taxonomy.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::new(
            BUILTIN_TOPICS
                .iter()
                .map(|(label, keywords)| (*label, keywords.to_vec())),
        )
    }

    /// Load a taxonomy from a JSON file: an array of `{"topic", "keywords"}` objects.
    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<TopicEntry> =
            serde_json::from_str(&raw).map_err(|source| TaxonomyError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let taxonomy = Self::new(entries.into_iter().map(|e| (e.topic, e.keywords)))?;
        info!(
            path = %path.display(),
            topics = taxonomy.len(),
            "Loaded taxonomy from file"
        );
        Ok(taxonomy)
    }

    /// Load from `path` when given, otherwise fall back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, TaxonomyError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Export back to the file representation (normalized keywords).
    pub fn entries(&self) -> Vec<TopicEntry> {
        self.topics
            .iter()
            .map(|t| TopicEntry {
                topic: t.label.clone(),
                keywords: t.keywords.iter().map(|k| k.text.clone()).collect(),
            })
            .collect()
    }
}
