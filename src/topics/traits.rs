// Topic classifier trait.
//
// The pipeline and the web layer only see this trait, so a different
// classification approach (or a fixed stub in tests) can be plugged in
// without touching them. The default implementation is keyword matching.

use super::input::ClassificationInput;

/// Maps a block of text (or a list of key phrases) to exactly one topic label.
pub trait TopicClassifier: Send + Sync {
    /// Classify the input. Never fails: unmatched input yields the fallback label.
    fn classify(&self, input: &ClassificationInput) -> String;
}
