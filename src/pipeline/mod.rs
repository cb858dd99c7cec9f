// Pipelines that chain the collaborators with the topic classifier.

pub mod analysis;

pub use analysis::{AnalysisPipeline, AnalysisReport};
