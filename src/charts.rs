use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use crate::errors::{Result, SentimentError};
use crate::models::{AnalysisResult, SentimentCategory};

pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

// Фиксированные цвета категорий, чтобы графики разных запросов
// были визуально сопоставимы
const POSITIVE_COLOR: &str = "#28a745";
const NEGATIVE_COLOR: &str = "#dc3545";
const NEUTRAL_COLOR: &str = "#6c757d";

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub label: String,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TracePoint {
    pub sentence_index: usize,
    pub polarity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub subjectivity: f64,
    pub polarity: f64,
    pub color: String,
}

/// Четыре серии данных для рендерера: распределение категорий, полярность по
/// ходу текста, гистограмма полярности и пары субъективность/полярность
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub category_counts: Vec<CategorySlice>,
    pub polarity_trace: Vec<TracePoint>,
    pub polarity_histogram: Vec<HistogramBin>,
    pub subjectivity_polarity: Vec<ScatterPoint>,
}

fn category_color(polarity: f64) -> &'static str {
    match SentimentCategory::classify(polarity) {
        SentimentCategory::Positive => POSITIVE_COLOR,
        SentimentCategory::Negative => NEGATIVE_COLOR,
        SentimentCategory::Neutral => NEUTRAL_COLOR,
    }
}

/// Строит серии графиков из результата анализа. Порядок предложений
/// сохраняется, границы гистограммы не зависят от разброса данных.
pub fn build_chart_data(result: &AnalysisResult, bins: usize) -> ChartData {
    let category_counts = vec![
        CategorySlice {
            label: "Positive".to_string(),
            count: result.positive_count,
            color: POSITIVE_COLOR.to_string(),
        },
        CategorySlice {
            label: "Negative".to_string(),
            count: result.negative_count,
            color: NEGATIVE_COLOR.to_string(),
        },
        CategorySlice {
            label: "Neutral".to_string(),
            count: result.neutral_count,
            color: NEUTRAL_COLOR.to_string(),
        },
    ];

    let polarity_trace = result
        .sentence_details
        .iter()
        .enumerate()
        .map(|(i, s)| TracePoint {
            sentence_index: i,
            polarity: s.polarity,
        })
        .collect();

    // Гистограмма всегда покрывает фиксированный диапазон [-1, 1]
    let bins = bins.max(2);
    let width = 2.0 / bins as f64;
    let mut counts = vec![0usize; bins];
    for s in &result.sentence_details {
        let mut index = ((s.polarity + 1.0) / width).floor() as isize;
        if index < 0 {
            index = 0;
        }
        if index as usize >= bins {
            index = bins as isize - 1;
        }
        counts[index as usize] += 1;
    }
    let polarity_histogram = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: -1.0 + i as f64 * width,
            end: -1.0 + (i + 1) as f64 * width,
            count,
        })
        .collect();

    let subjectivity_polarity = result
        .sentence_details
        .iter()
        .map(|s| ScatterPoint {
            subjectivity: s.subjectivity,
            polarity: s.polarity,
            color: category_color(s.polarity).to_string(),
        })
        .collect();

    ChartData {
        category_counts,
        polarity_trace,
        polarity_histogram,
        subjectivity_polarity,
    }
}

/// Ссылка на сгенерированный артефакт графиков
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub url: String,
    pub path: PathBuf,
}

/// Внешний рендерер графиков. Необязательный участник: при его отсутствии
/// или сбое отчет с числовыми результатами все равно формируется.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, data: &ChartData, video_id: &str) -> Result<ChartArtifact>;
}

/// Рендерер, сохраняющий серии графиков как JSON-артефакт в каталоге
/// статики. Отрисовка в пиксели остается на стороне потребителя.
#[derive(Clone)]
pub struct JsonChartRenderer {
    output_dir: PathBuf,
}

impl JsonChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        JsonChartRenderer {
            output_dir: output_dir.into(),
        }
    }
}

impl ChartRenderer for JsonChartRenderer {
    fn render(&self, data: &ChartData, video_id: &str) -> Result<ChartArtifact> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| SentimentError::RenderFailure(e.to_string()))?;

        let filename = format!(
            "sentiment_analysis_{}_{}.json",
            video_id,
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.output_dir.join(&filename);

        let body = serde_json::to_string_pretty(data)
            .map_err(|e| SentimentError::RenderFailure(e.to_string()))?;
        fs::write(&path, body).map_err(|e| SentimentError::RenderFailure(e.to_string()))?;

        tracing::debug!("Графики сохранены в {}", path.display());

        Ok(ChartArtifact {
            url: format!("/static/{}", filename),
            path,
        })
    }
}
