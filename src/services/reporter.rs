use chrono::Utc;

use crate::models::{
    AnalysisReport, AnalysisResult, ChartRefs, SentenceExcerpt, SentenceSentiment,
    SentimentSummary,
};
use crate::services::interpreter::interpret;

pub const DEFAULT_EXCERPT_LIMIT: usize = 200;

/// Сборка итогового отчета: проценты, округление, словесные интерпретации,
/// самые позитивное и негативное предложения
#[derive(Clone)]
pub struct ReportService {
    excerpt_limit: usize,
}

impl ReportService {
    pub fn new(excerpt_limit: usize) -> Self {
        ReportService { excerpt_limit }
    }

    pub fn assemble(
        &self,
        result: &AnalysisResult,
        video_id: &str,
        video_url: &str,
        transcript_length: usize,
        charts: ChartRefs,
    ) -> AnalysisReport {
        let (polarity_desc, subjectivity_desc) =
            interpret(result.overall_polarity, result.overall_subjectivity);

        let summary = SentimentSummary {
            overall_sentiment: polarity_desc.to_string(),
            polarity_score: round3(result.overall_polarity),
            subjectivity: subjectivity_desc.to_string(),
            subjectivity_score: round3(result.overall_subjectivity),
            total_sentences: result.total_sentences,
            positive_sentences: result.positive_count,
            negative_sentences: result.negative_count,
            neutral_sentences: result.neutral_count,
            positive_percentage: percentage(result.positive_count, result.total_sentences),
            negative_percentage: percentage(result.negative_count, result.total_sentences),
            neutral_percentage: percentage(result.neutral_count, result.total_sentences),
            average_polarity: round3(result.average_polarity),
            average_subjectivity: round3(result.average_subjectivity),
            most_positive: self.most_positive(&result.sentence_details),
            most_negative: self.most_negative(&result.sentence_details),
        };

        AnalysisReport {
            video_id: video_id.to_string(),
            video_url: video_url.to_string(),
            transcript_length,
            analysis: summary,
            charts,
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    // При равных оценках выбирается первое по порядку предложение
    fn most_positive(&self, sentences: &[SentenceSentiment]) -> Option<SentenceExcerpt> {
        let mut best: Option<&SentenceSentiment> = None;
        for s in sentences {
            if best.map_or(true, |b| s.polarity > b.polarity) {
                best = Some(s);
            }
        }
        best.map(|s| self.excerpt(s))
    }

    fn most_negative(&self, sentences: &[SentenceSentiment]) -> Option<SentenceExcerpt> {
        let mut worst: Option<&SentenceSentiment> = None;
        for s in sentences {
            if worst.map_or(true, |w| s.polarity < w.polarity) {
                worst = Some(s);
            }
        }
        worst.map(|s| self.excerpt(s))
    }

    fn excerpt(&self, sentence: &SentenceSentiment) -> SentenceExcerpt {
        SentenceExcerpt {
            score: round3(sentence.polarity),
            text: truncate_excerpt(&sentence.text, self.excerpt_limit),
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        ReportService::new(DEFAULT_EXCERPT_LIMIT)
    }
}

/// Обрезает текст до limit символов, добавляя многоточие только когда
/// обрезка действительно произошла
pub fn truncate_excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(limit).collect();
        truncated.push_str("...");
        truncated
    }
}

// Округление только для отображения, в агрегаты не возвращается
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(count as f64 / total as f64 * 100.0)
    }
}
