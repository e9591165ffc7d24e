pub mod analyzer;
pub mod interpreter;
pub mod reporter;
pub mod scorer;
pub mod transcript;

pub use analyzer::SentimentAnalyzerService;
pub use reporter::ReportService;
pub use scorer::{LexiconScorer, ScoredSentence, ScoredText, SentenceScorer};
pub use transcript::TranscriptService;
