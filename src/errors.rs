// errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Ошибка HTTP запроса: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Ошибка парсинга JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Ошибка конфигурации: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Ошибка regex: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Субтитры недоступны: {0}")]
    TranscriptUnavailable(String),

    #[error("Некорректная ссылка на видео: {0}")]
    InvalidVideoUrl(String),

    #[error("Ошибка оценки тональности: {0}")]
    ScoringFailure(String),

    #[error("Ошибка построения графиков: {0}")]
    RenderFailure(String),
}

// Определяем псевдоним Result с фиксированным типом ошибки
pub type Result<T> = std::result::Result<T, SentimentError>;
