use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::{analyze_url, AppState, SentimentError};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub charts_enabled: bool,
    pub available_endpoints: Vec<String>,
}

// Основной обработчик анализа транскрипта
pub async fn transcript_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Value>, StatusCode> {
    run_analysis(&state, &req.url).await
}

async fn run_analysis(state: &AppState, url: &str) -> Result<Json<Value>, StatusCode> {
    // Валидация входных данных
    let url = url.trim();
    if url.is_empty() {
        tracing::warn!("Пустая ссылка в запросе анализа");
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!("Начинаем анализ транскрипта: {}", url);

    match analyze_url(state, url).await {
        Ok(Some(report)) => {
            tracing::info!("Анализ успешно завершен для видео {}", report.video_id);
            Ok(Json(serde_json::to_value(report).unwrap()))
        }
        Ok(None) => {
            tracing::info!("Транскрипт пуст, анализировать нечего");
            Ok(Json(json!({
                "status": "empty",
                "message": "Транскрипт пуст, анализировать нечего",
            })))
        }
        Err(SentimentError::InvalidVideoUrl(url)) => {
            tracing::warn!("Некорректная ссылка на видео: {}", url);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e @ SentimentError::TranscriptUnavailable(_)) => {
            tracing::warn!("Субтитры недоступны: {}", e);
            Ok(Json(json!({
                "status": "error",
                "message": format!("{}", e),
                "error_type": "transcript_unavailable"
            })))
        }
        Err(e @ SentimentError::ScoringFailure(_)) => {
            tracing::error!("Ошибка оценки тональности: {}", e);
            Ok(Json(json!({
                "status": "error",
                "message": format!("{}", e),
                "error_type": "scoring_error"
            })))
        }
        Err(e) => {
            tracing::error!("Ошибка анализа: {}", e);
            Ok(Json(json!({
                "status": "error",
                "message": format!("{}", e),
                "error_type": "analysis_error"
            })))
        }
    }
}

// Проверка здоровья сервиса
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "YouTube Transcript Sentiment Analyzer API is running".to_string(),
        version: "1.0.0".to_string(),
    })
}

// Получение статуса сервиса
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
        charts_enabled: state.renderer.is_some(),
        available_endpoints: vec![
            "/".to_string(),
            "/status".to_string(),
            "/analyze".to_string(),
            "/api/analyze".to_string(),
        ],
    })
}

#[derive(Deserialize)]
pub struct AnalyzeParams {
    pub url: String,
}

// Простой анализ через GET с параметром url
pub async fn simple_analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Value>, StatusCode> {
    run_analysis(&state, &params.url).await
}

// Создание маршрутов
pub fn create_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(health_check))
        .route("/status", get(get_status))
        .route("/api/analyze", post(transcript_analysis))
        .route("/analyze", get(simple_analysis));

    // Отдаем сохраненные артефакты графиков по ссылкам из отчета
    if !state.charts_dir.is_empty() {
        router = router.nest_service("/static", ServeDir::new(&state.charts_dir));
    }

    router.layer(cors).with_state(state)
}
