use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yt_sentiment_analyzer::routers::create_routes;
use yt_sentiment_analyzer::{
    analyze_url, load_config, AnalysisReport, AppState, ChartRenderer, JsonChartRenderer,
    LexiconScorer, ReportService, SentimentAnalyzerService, TranscriptService,
};
use yt_sentiment_analyzer::{charts, services::reporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Настройка структурированного логирования
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yt_sentiment_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true))
        .init();

    let config = load_config()?;

    // Рендерер необязателен: без каталога графиков отчет просто идет без них
    let renderer: Option<Arc<dyn ChartRenderer>> = if config.charts_dir.is_empty() {
        None
    } else {
        Some(Arc::new(JsonChartRenderer::new(config.charts_dir.clone())))
    };

    let state = AppState {
        transcript: TranscriptService::new(config.clone())?,
        analyzer: SentimentAnalyzerService::new(Arc::new(LexiconScorer::new())),
        reporter: ReportService::new(
            config.excerpt_limit.unwrap_or(reporter::DEFAULT_EXCERPT_LIMIT),
        ),
        renderer,
        histogram_bins: config.histogram_bins.unwrap_or(charts::DEFAULT_HISTOGRAM_BINS),
        charts_dir: config.charts_dir.clone(),
    };

    // Одноразовый запуск из командной строки: ссылка аргументом
    if let Some(url) = std::env::args().nth(1) {
        return run_cli(&state, &url).await;
    }

    let port = config.server_port.unwrap_or(3000);
    let app = create_routes(state);
    println!("Сервер запущен на http://localhost:{}", port);
    axum::Server::bind(&format!("0.0.0.0:{}", port).parse()?)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

async fn run_cli(state: &AppState, url: &str) -> anyhow::Result<()> {
    println!("Loading transcript for: {}", url);

    match analyze_url(state, url).await? {
        Some(report) => print_report(&report),
        None => println!("Transcript is empty. Nothing to analyze."),
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let a = &report.analysis;

    println!();
    println!("{}", "=".repeat(60));
    println!("SENTIMENT ANALYSIS RESULTS");
    println!("{}", "=".repeat(60));
    println!("Overall Sentiment: {}", a.overall_sentiment);
    println!("Polarity Score: {:.3} (-1 to 1)", a.polarity_score);
    println!("Subjectivity: {}", a.subjectivity);
    println!("Subjectivity Score: {:.3} (0 to 1)", a.subjectivity_score);
    println!();
    println!("Total Sentences Analyzed: {}", a.total_sentences);
    println!(
        "Positive Sentences: {} ({:.1}%)",
        a.positive_sentences, a.positive_percentage
    );
    println!(
        "Negative Sentences: {} ({:.1}%)",
        a.negative_sentences, a.negative_percentage
    );
    println!(
        "Neutral Sentences: {} ({:.1}%)",
        a.neutral_sentences, a.neutral_percentage
    );
    println!();
    println!("Average Polarity: {:.3}", a.average_polarity);
    println!("Average Subjectivity: {:.3}", a.average_subjectivity);

    if let Some(most_positive) = &a.most_positive {
        println!();
        println!("{}", "-".repeat(40));
        println!("MOST POSITIVE SENTENCE:");
        println!("Score: {:.3}", most_positive.score);
        println!("Text: {}", most_positive.text);
    }

    if let Some(most_negative) = &a.most_negative {
        println!();
        println!("{}", "-".repeat(40));
        println!("MOST NEGATIVE SENTENCE:");
        println!("Score: {:.3}", most_negative.score);
        println!("Text: {}", most_negative.text);
    }

    match (&report.charts.combined, &report.charts.error) {
        (Some(url), _) => println!("\nCharts saved to {}", url),
        (None, Some(e)) => println!("\nError creating charts: {}", e),
        (None, None) => println!("\nVisualization skipped (renderer not available)."),
    }
}
