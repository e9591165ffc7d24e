use std::time::Duration;

use regex::Regex;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::{Result, SentimentError};

/// Загрузка субтитров видео. Один модуль на оба входа (CLI и HTTP),
/// чтобы разбор ссылок не дублировался.
#[derive(Clone)]
pub struct TranscriptService {
    client: Client,
    config: AppConfig,
}

impl TranscriptService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(TranscriptService { client, config })
    }

    /// Извлекает идентификатор видео из ссылки YouTube. Строку без ссылки,
    /// похожую на голый идентификатор, пропускает как есть.
    pub fn resolve_video_id(url_or_id: &str) -> Result<String> {
        let url_re = Regex::new(r"(?:v=|youtu\.be/)([\w-]+)")?;
        if let Some(caps) = url_re.captures(url_or_id) {
            return Ok(caps[1].to_string());
        }

        let id_re = Regex::new(r"^[\w-]{6,}$")?;
        if id_re.is_match(url_or_id) {
            return Ok(url_or_id.to_string());
        }

        Err(SentimentError::InvalidVideoUrl(url_or_id.to_string()))
    }

    /// Загружает субтитры и возвращает их одним текстом,
    /// склеенным через одиночные пробелы
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<String> {
        let url = format!(
            "{}?v={}&lang={}&fmt=json3",
            self.config.transcript_api_url,
            urlencoding::encode(video_id),
            urlencoding::encode(&self.config.caption_language),
        );

        tracing::info!("Загружаем субтитры для видео {}", video_id);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SentimentError::TranscriptUnavailable(format!(
                "API субтитров вернул статус {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(SentimentError::TranscriptUnavailable(
                "пустой ответ, у видео нет субтитров на запрошенном языке".to_string(),
            ));
        }

        let json: Value = serde_json::from_str(&body)?;
        let captions = Self::extract_captions(&json);

        if captions.is_empty() {
            return Err(SentimentError::TranscriptUnavailable(
                "в ответе нет текстовых сегментов".to_string(),
            ));
        }

        tracing::info!("Получено {} строк субтитров", captions.len());
        Ok(captions.join(" "))
    }

    // Формат timedtext json3: events[].segs[].utf8
    fn extract_captions(json: &Value) -> Vec<String> {
        let mut captions = Vec::new();

        if let Some(events) = json["events"].as_array() {
            for event in events {
                if let Some(segs) = event["segs"].as_array() {
                    let caption = segs
                        .iter()
                        .filter_map(|seg| seg["utf8"].as_str())
                        .collect::<Vec<&str>>()
                        .join("");
                    let caption = caption.replace('\n', " ");
                    let caption = caption.trim();
                    if !caption.is_empty() {
                        captions.push(caption.to_string());
                    }
                }
            }
        }

        captions
    }
}
