use std::sync::Arc;

use yt_sentiment_analyzer::charts::{
    build_chart_data, ChartArtifact, ChartData, ChartRenderer, JsonChartRenderer,
};
use yt_sentiment_analyzer::services::interpreter::{interpret, interpret_polarity};
use yt_sentiment_analyzer::services::reporter::truncate_excerpt;
use yt_sentiment_analyzer::*;

// Детерминированная заглушка оценщика с заранее заданными оценками
struct StubScorer {
    overall: (f64, f64),
    sentences: Vec<(&'static str, f64, f64)>,
}

impl SentenceScorer for StubScorer {
    fn score_text(&self, _text: &str) -> Result<ScoredText> {
        Ok(ScoredText {
            polarity: self.overall.0,
            subjectivity: self.overall.1,
            sentences: self
                .sentences
                .iter()
                .map(|(text, p, s)| ScoredSentence {
                    text: text.to_string(),
                    polarity: *p,
                    subjectivity: *s,
                })
                .collect(),
        })
    }
}

fn analyzer_with(sentences: Vec<(&'static str, f64, f64)>) -> SentimentAnalyzerService {
    SentimentAnalyzerService::new(Arc::new(StubScorer {
        overall: (0.25, 0.5),
        sentences,
    }))
}

// Рендерер, падающий на каждом вызове
struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _data: &ChartData, _video_id: &str) -> Result<ChartArtifact> {
        Err(SentimentError::RenderFailure("диск недоступен".to_string()))
    }
}

fn test_state(charts_dir: &str, renderer: Option<Arc<dyn ChartRenderer>>) -> AppState {
    let config = AppConfig {
        transcript_api_url: "https://video.google.com/timedtext".to_string(),
        caption_language: "en".to_string(),
        charts_dir: charts_dir.to_string(),
        histogram_bins: None,
        excerpt_limit: None,
        server_port: None,
    };

    AppState {
        transcript: TranscriptService::new(config).unwrap(),
        analyzer: analyzer_with(vec![
            ("Great video.", 0.8, 0.9),
            ("Terrible ending.", -0.6, 0.7),
        ]),
        reporter: ReportService::default(),
        renderer,
        histogram_bins: 30,
        charts_dir: charts_dir.to_string(),
    }
}

#[test]
fn test_classify_thresholds() {
    // Граничные значения 0.1 и -0.1 относятся к Neutral
    assert_eq!(SentimentCategory::classify(0.5), SentimentCategory::Positive);
    assert_eq!(SentimentCategory::classify(0.11), SentimentCategory::Positive);
    assert_eq!(SentimentCategory::classify(0.1), SentimentCategory::Neutral);
    assert_eq!(SentimentCategory::classify(0.0), SentimentCategory::Neutral);
    assert_eq!(SentimentCategory::classify(-0.1), SentimentCategory::Neutral);
    assert_eq!(SentimentCategory::classify(-0.11), SentimentCategory::Negative);
    assert_eq!(SentimentCategory::classify(-0.9), SentimentCategory::Negative);

    // Пороги действуют и за пределами [-1, 1]
    assert_eq!(SentimentCategory::classify(3.0), SentimentCategory::Positive);
    assert_eq!(SentimentCategory::classify(-3.0), SentimentCategory::Negative);
}

#[test]
fn test_aggregate_counts_invariant() {
    let analyzer = analyzer_with(vec![
        ("Great video.", 0.8, 0.9),
        ("Just facts.", 0.0, 0.1),
        ("Awful part.", -0.6, 0.7),
        ("Okay I guess.", 0.1, 0.4),
    ]);

    let result = analyzer.aggregate("some text").unwrap().unwrap();

    assert_eq!(result.total_sentences, 4);
    assert_eq!(result.sentence_details.len(), 4);
    assert_eq!(
        result.positive_count + result.negative_count + result.neutral_count,
        result.total_sentences
    );
    assert_eq!(result.positive_count, 1);
    assert_eq!(result.negative_count, 1);
    assert_eq!(result.neutral_count, 2);
}

#[test]
fn test_aggregate_average_polarity() {
    let analyzer = analyzer_with(vec![
        ("a.", 0.2, 0.5),
        ("b.", -0.4, 0.5),
        ("c.", 0.0, 0.5),
    ]);

    let result = analyzer.aggregate("some text").unwrap().unwrap();
    assert!((result.average_polarity - (-0.0667)).abs() < 0.001);
    assert!((result.average_subjectivity - 0.5).abs() < 1e-9);

    // Общая оценка берется из оценщика, а не из среднего по предложениям
    assert!((result.overall_polarity - 0.25).abs() < 1e-9);
}

#[test]
fn test_aggregate_empty_input() {
    let analyzer = analyzer_with(vec![("a.", 0.2, 0.5)]);

    // Пустой и пробельный текст дают явный сигнал "нечего анализировать"
    assert!(analyzer.aggregate("").unwrap().is_none());
    assert!(analyzer.aggregate("   \n\t ").unwrap().is_none());
}

#[test]
fn test_aggregate_zero_sentence_fallback() {
    // Оценщик не нашел ни одного предложения: весь текст считается одним
    let analyzer = analyzer_with(vec![]);

    let result = analyzer.aggregate("  plain text without punctuation  ").unwrap().unwrap();
    assert_eq!(result.total_sentences, 1);
    assert_eq!(result.sentence_details[0].text, "plain text without punctuation");
    assert!((result.sentence_details[0].polarity - 0.25).abs() < 1e-9);
}

#[test]
fn test_interpret_labels() {
    assert_eq!(
        interpret(0.6, 0.8),
        ("Very Positive", "Very Subjective (Opinion-based)")
    );
    assert_eq!(interpret(0.0, 0.2), ("Neutral", "Objective (Fact-based)"));

    // Границы: ровно -0.5 это Very Negative, ровно 0.3 это Objective
    assert_eq!(
        interpret(-0.5, 0.3),
        ("Very Negative", "Objective (Fact-based)")
    );

    assert_eq!(interpret_polarity(0.5), "Positive");
    assert_eq!(interpret_polarity(0.1), "Neutral");
    assert_eq!(interpret_polarity(-0.1), "Negative");
    assert_eq!(interpret_polarity(-0.49), "Negative");
}

#[test]
fn test_truncate_excerpt() {
    let long = "x".repeat(250);
    let truncated = truncate_excerpt(&long, 200);
    assert_eq!(truncated.chars().count(), 203);
    assert!(truncated.ends_with("..."));

    let short = "y".repeat(150);
    assert_eq!(truncate_excerpt(&short, 200), short);

    // Ровно 200 символов не обрезаются и не получают многоточие
    let exact = "z".repeat(200);
    assert_eq!(truncate_excerpt(&exact, 200), exact);
}

#[test]
fn test_report_percentages_and_rounding() {
    let analyzer = analyzer_with(vec![
        ("Great.", 0.8, 0.9),
        ("Bad.", -0.6, 0.7),
        ("Meh.", 0.0, 0.1),
    ]);
    let result = analyzer.aggregate("text").unwrap().unwrap();

    let reporter = ReportService::default();
    let report = reporter.assemble(&result, "abc123", "https://youtu.be/abc123", 42, ChartRefs::default());

    let a = &report.analysis;
    assert!((a.positive_percentage - 33.3).abs() < 1e-9);
    assert!((a.negative_percentage - 33.3).abs() < 1e-9);
    assert!((a.neutral_percentage - 33.3).abs() < 1e-9);
    assert_eq!(a.total_sentences, 3);
    assert_eq!(report.video_id, "abc123");
    assert_eq!(report.transcript_length, 42);
}

#[test]
fn test_report_extremal_tie_break() {
    // При равных оценках выбирается первое по порядку предложение
    let analyzer = analyzer_with(vec![
        ("first positive.", 0.3, 0.5),
        ("second positive.", 0.3, 0.5),
        ("slightly negative.", -0.1, 0.5),
    ]);
    let result = analyzer.aggregate("text").unwrap().unwrap();

    let reporter = ReportService::default();
    let report = reporter.assemble(&result, "id", "url", 10, ChartRefs::default());

    let most_positive = report.analysis.most_positive.unwrap();
    assert_eq!(most_positive.text, "first positive.");
    let most_negative = report.analysis.most_negative.unwrap();
    assert_eq!(most_negative.text, "slightly negative.");
}

#[test]
fn test_report_deterministic() {
    let analyzer = analyzer_with(vec![
        ("a.", 0.123456, 0.654321),
        ("b.", -0.333333, 0.2),
    ]);
    let reporter = ReportService::default();

    let r1 = analyzer.aggregate("text").unwrap().unwrap();
    let r2 = analyzer.aggregate("text").unwrap().unwrap();
    let report1 = reporter.assemble(&r1, "id", "url", 5, ChartRefs::default());
    let report2 = reporter.assemble(&r2, "id", "url", 5, ChartRefs::default());

    // Повторный прогон на том же входе дает идентичные числовые поля
    assert_eq!(
        serde_json::to_value(&report1.analysis).unwrap(),
        serde_json::to_value(&report2.analysis).unwrap()
    );
}

#[test]
fn test_chart_data_series() {
    let analyzer = analyzer_with(vec![
        ("Great.", 0.8, 0.9),
        ("Bad.", -0.6, 0.7),
        ("Meh.", 0.0, 0.1),
    ]);
    let result = analyzer.aggregate("text").unwrap().unwrap();

    let data = build_chart_data(&result, 30);

    assert_eq!(data.category_counts.len(), 3);
    assert_eq!(data.category_counts[0].label, "Positive");
    assert_eq!(data.category_counts[0].count, 1);

    // Порядок предложений сохраняется без сортировки
    assert_eq!(data.polarity_trace.len(), 3);
    assert_eq!(data.polarity_trace[0].sentence_index, 0);
    assert!((data.polarity_trace[1].polarity - (-0.6)).abs() < 1e-9);
    assert!((data.subjectivity_polarity[2].subjectivity - 0.1).abs() < 1e-9);

    // Гистограмма покрывает фиксированный диапазон [-1, 1] независимо от данных
    assert_eq!(data.polarity_histogram.len(), 30);
    assert!((data.polarity_histogram[0].start - (-1.0)).abs() < 1e-9);
    assert!((data.polarity_histogram[29].end - 1.0).abs() < 1e-9);
    let total: usize = data.polarity_histogram.iter().map(|b| b.count).sum();
    assert_eq!(total, 3);
}

#[test]
fn test_json_chart_renderer() {
    let analyzer = analyzer_with(vec![("Great.", 0.8, 0.9)]);
    let result = analyzer.aggregate("text").unwrap().unwrap();
    let data = build_chart_data(&result, 20);

    let dir = std::env::temp_dir().join("yt_sentiment_analyzer_test_charts");
    let renderer = JsonChartRenderer::new(&dir);

    let artifact = renderer.render(&data, "vid42").unwrap();
    assert!(artifact.url.starts_with("/static/sentiment_analysis_vid42_"));
    assert!(artifact.path.exists());

    std::fs::remove_file(&artifact.path).unwrap();
}

#[test]
fn test_render_failure_still_yields_report() {
    // Сбой рендеринга не прерывает анализ: отчет с числами отдается,
    // ошибка попадает в charts.error
    let state = test_state("charts", Some(Arc::new(FailingRenderer)));
    let result = state.analyzer.aggregate("text").unwrap().unwrap();

    let refs = render_charts(&state, &result, "vid1");
    assert!(refs.combined.is_none());
    assert!(refs.error.is_some());

    let report = state.reporter.assemble(&result, "vid1", "url", 10, refs);
    assert_eq!(report.analysis.total_sentences, 2);
    assert_eq!(report.analysis.positive_sentences, 1);
    assert_eq!(report.analysis.negative_sentences, 1);
    assert!(report.charts.combined.is_none());
    assert!(report.charts.error.is_some());
}

#[tokio::test]
async fn test_static_route_serves_chart_artifacts() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use yt_sentiment_analyzer::routers::create_routes;

    let dir = std::env::temp_dir().join("yt_sentiment_analyzer_test_static");
    let renderer = JsonChartRenderer::new(&dir);

    let state = test_state(dir.to_str().unwrap(), Some(Arc::new(renderer.clone())));
    let result = state.analyzer.aggregate("text").unwrap().unwrap();
    let data = build_chart_data(&result, 30);
    let artifact = renderer.render(&data, "vid7").unwrap();

    // Ссылка из отчета должна разрешаться сервером
    let app = create_routes(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri(artifact.url.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    std::fs::remove_file(&artifact.path).unwrap();
}

#[test]
fn test_resolve_video_id() {
    assert_eq!(
        TranscriptService::resolve_video_id("https://www.youtube.com/watch?v=pidnIHdA1Y8").unwrap(),
        "pidnIHdA1Y8"
    );
    assert_eq!(
        TranscriptService::resolve_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
        "dQw4w9WgXcQ"
    );
    // Голый идентификатор пропускается как есть
    assert_eq!(
        TranscriptService::resolve_video_id("pidnIHdA1Y8").unwrap(),
        "pidnIHdA1Y8"
    );
    assert!(TranscriptService::resolve_video_id("https://example.com/video").is_err());
}

#[test]
fn test_lexicon_scorer() {
    let scorer = LexiconScorer::new();

    let scored = scorer
        .score_text("I love this video, it is amazing! The ending was terrible.")
        .unwrap();

    assert_eq!(scored.sentences.len(), 2);
    assert!(scored.sentences[0].polarity > 0.1);
    assert!(scored.sentences[1].polarity < -0.1);
    assert!(scored.polarity >= -1.0 && scored.polarity <= 1.0);
    assert!(scored.subjectivity >= 0.0 && scored.subjectivity <= 1.0);

    // Отрицание переворачивает знак слова
    let negated = scorer.score_text("This is not good.").unwrap();
    assert!(negated.sentences[0].polarity < 0.0);

    // Текст без знаков конца предложения дает одно предложение
    let plain = scorer.score_text("just some plain words").unwrap();
    assert_eq!(plain.sentences.len(), 1);
}
