use serde::{Deserialize, Serialize};

/// Одно проанализированное предложение транскрипта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub text: String,
    pub polarity: f64,      // -1.0 .. 1.0
    pub subjectivity: f64,  // 0.0 .. 1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    /// Классификация полярности по фиксированным порогам.
    /// Граничные значения 0.1 и -0.1 относятся к Neutral.
    pub fn classify(polarity: f64) -> Self {
        if polarity > 0.1 {
            SentimentCategory::Positive
        } else if polarity < -0.1 {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }
}

/// Полный результат анализа одного транскрипта
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub overall_polarity: f64,
    pub overall_subjectivity: f64,
    pub total_sentences: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
    pub sentence_details: Vec<SentenceSentiment>,
}

/// Выдержка из предложения с экстремальной полярностью
#[derive(Debug, Clone, Serialize)]
pub struct SentenceExcerpt {
    pub score: f64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SentimentSummary {
    pub overall_sentiment: String,
    pub polarity_score: f64,
    pub subjectivity: String,
    pub subjectivity_score: f64,
    pub total_sentences: usize,
    pub positive_sentences: usize,
    pub negative_sentences: usize,
    pub neutral_sentences: usize,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_positive: Option<SentenceExcerpt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_negative: Option<SentenceExcerpt>,
}

/// Ссылки на сгенерированные графики. При ошибке рендеринга
/// отчет все равно отдается, а ошибка попадает в поле error.
#[derive(Debug, Default, Serialize)]
pub struct ChartRefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Итоговый отчет, отдаваемый наружу (CLI или HTTP JSON)
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub video_id: String,
    pub video_url: String,
    pub transcript_length: usize,
    pub analysis: SentimentSummary,
    pub charts: ChartRefs,
    pub timestamp: String,
}
