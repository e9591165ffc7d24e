use std::sync::Arc;

use crate::errors::Result;
use crate::models::{AnalysisResult, SentenceSentiment, SentimentCategory};
use crate::services::scorer::{ScoredSentence, SentenceScorer};

#[derive(Clone)]
pub struct SentimentAnalyzerService {
    scorer: Arc<dyn SentenceScorer>,
}

impl SentimentAnalyzerService {
    pub fn new(scorer: Arc<dyn SentenceScorer>) -> Self {
        SentimentAnalyzerService { scorer }
    }

    /// Полный анализ текста. Возвращает None для пустого или состоящего из
    /// пробелов текста: это нормальный исход "нечего анализировать", а не
    /// ошибка. Ошибки самого оценщика пробрасываются без изменений.
    pub fn aggregate(&self, text: &str) -> Result<Option<AnalysisResult>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let mut scored = self.scorer.score_text(text)?;

        // Текст без единого предложения (например, транскрипт без знаков
        // конца предложения) анализируется как одно предложение целиком
        if scored.sentences.is_empty() {
            scored.sentences.push(ScoredSentence {
                text: text.trim().to_string(),
                polarity: scored.polarity,
                subjectivity: scored.subjectivity,
            });
        }

        let mut positive_count = 0usize;
        let mut negative_count = 0usize;
        let mut neutral_count = 0usize;

        let sentence_details: Vec<SentenceSentiment> = scored
            .sentences
            .into_iter()
            .map(|s| {
                match SentimentCategory::classify(s.polarity) {
                    SentimentCategory::Positive => positive_count += 1,
                    SentimentCategory::Negative => negative_count += 1,
                    SentimentCategory::Neutral => neutral_count += 1,
                }
                SentenceSentiment {
                    text: s.text,
                    polarity: s.polarity,
                    subjectivity: s.subjectivity,
                }
            })
            .collect();

        let total_sentences = sentence_details.len();

        let (average_polarity, average_subjectivity) = if sentence_details.is_empty() {
            (0.0, 0.0)
        } else {
            let sum_p: f64 = sentence_details.iter().map(|s| s.polarity).sum();
            let sum_s: f64 = sentence_details.iter().map(|s| s.subjectivity).sum();
            (
                sum_p / total_sentences as f64,
                sum_s / total_sentences as f64,
            )
        };

        tracing::debug!(
            "Проанализировано {} предложений: {} позитивных, {} негативных, {} нейтральных",
            total_sentences,
            positive_count,
            negative_count,
            neutral_count
        );

        Ok(Some(AnalysisResult {
            overall_polarity: scored.polarity,
            overall_subjectivity: scored.subjectivity,
            total_sentences,
            positive_count,
            negative_count,
            neutral_count,
            average_polarity,
            average_subjectivity,
            sentence_details,
        }))
    }
}
