use std::sync::Arc;

pub mod charts;
pub mod config;
pub mod errors;
pub mod models;
pub mod routers;
pub mod services;

pub use charts::{build_chart_data, ChartData, ChartRenderer, JsonChartRenderer};
pub use config::{load_config, AppConfig};
pub use errors::{Result, SentimentError};
pub use models::{
    AnalysisReport, AnalysisResult, ChartRefs, SentenceExcerpt, SentenceSentiment,
    SentimentCategory, SentimentSummary,
};
pub use services::{
    LexiconScorer, ReportService, ScoredSentence, ScoredText, SentenceScorer,
    SentimentAnalyzerService, TranscriptService,
};

#[derive(Clone)]
pub struct AppState {
    pub transcript: TranscriptService,
    pub analyzer: SentimentAnalyzerService,
    pub reporter: ReportService,
    pub renderer: Option<Arc<dyn ChartRenderer>>,
    pub histogram_bins: usize,
    pub charts_dir: String,
}

/// Полный конвейер анализа одной ссылки: субтитры, агрегация, графики,
/// отчет. None означает пустой транскрипт, анализировать нечего.
pub async fn analyze_url(state: &AppState, url: &str) -> Result<Option<AnalysisReport>> {
    let video_id = TranscriptService::resolve_video_id(url)?;
    let transcript = state.transcript.fetch_transcript(&video_id).await?;

    let result = match state.analyzer.aggregate(&transcript)? {
        Some(result) => result,
        None => return Ok(None),
    };

    let chart_refs = render_charts(state, &result, &video_id);

    Ok(Some(state.reporter.assemble(
        &result,
        &video_id,
        url,
        transcript.chars().count(),
        chart_refs,
    )))
}

/// Сбой рендеринга не прерывает анализ: числовой отчет отдается в любом
/// случае, ошибка попадает в поле charts.error
pub fn render_charts(state: &AppState, result: &AnalysisResult, video_id: &str) -> ChartRefs {
    let renderer = match &state.renderer {
        Some(renderer) => renderer,
        None => return ChartRefs::default(),
    };

    let data = charts::build_chart_data(result, state.histogram_bins);
    match renderer.render(&data, video_id) {
        Ok(artifact) => ChartRefs {
            combined: Some(artifact.url),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Ошибка построения графиков: {}", e);
            ChartRefs {
                combined: None,
                error: Some(e.to_string()),
            }
        }
    }
}
