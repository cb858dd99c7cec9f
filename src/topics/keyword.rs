// Keyword topic classifier.
//
// Each keyword that occurs at least once (as a whole word or phrase) adds one
// point to its topic. The topic with the most points wins; on a tie the topic
// listed first in the taxonomy wins. Nothing matched means "otro".

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::input::ClassificationInput;
use super::taxonomy::Taxonomy;
use super::traits::TopicClassifier;
use super::FALLBACK_TOPIC;

/// Matches for one topic within a single classification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicMatches {
    pub topic: String,
    pub count: u32,
    /// Matched keywords, in taxonomy list order
    pub keywords: Vec<String>,
}

/// Per-call tally: only topics with at least one match, in taxonomy order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchTally {
    entries: Vec<TopicMatches>,
}

impl MatchTally {
    fn record(&mut self, topic: &str, keyword: &str) {
        match self.entries.iter_mut().find(|e| e.topic == topic) {
            Some(entry) => {
                entry.count += 1;
                entry.keywords.push(keyword.to_string());
            }
            None => self.entries.push(TopicMatches {
                topic: topic.to_string(),
                count: 1,
                keywords: vec![keyword.to_string()],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Count for a topic; zero when it has no entry.
    pub fn count(&self, topic: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.topic == topic)
            .map_or(0, |e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicMatches> {
        self.entries.iter()
    }

    /// Highest count, first-seen on ties. `None` when nothing matched.
    pub fn winner(&self) -> Option<&str> {
        let mut best: Option<&TopicMatches> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best.map(|e| e.topic.as_str())
    }

    /// The winning label, or the fallback when the tally is empty.
    pub fn label(&self) -> &str {
        self.winner().unwrap_or(FALLBACK_TOPIC)
    }
}

/// Deterministic keyword classifier over a shared, immutable taxonomy.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    taxonomy: Arc<Taxonomy>,
}

impl KeywordClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Count distinct matching keywords per topic.
    pub fn tally(&self, input: &ClassificationInput) -> MatchTally {
        let corpus = input.corpus();
        let mut tally = MatchTally::default();
        if corpus.is_empty() {
            return tally;
        }

        for topic in self.taxonomy.topics() {
            for keyword in topic.keywords() {
                if keyword.is_match(&corpus) {
                    tally.record(topic.label(), keyword.text());
                }
            }
        }
        tally
    }
}

impl TopicClassifier for KeywordClassifier {
    fn classify(&self, input: &ClassificationInput) -> String {
        let tally = self.tally(input);
        let label = tally.label().to_string();
        debug!(
            topic = %label,
            matched_topics = tally.len(),
            fragments = input.fragments().len(),
            "Classified text"
        );
        label
    }
}
