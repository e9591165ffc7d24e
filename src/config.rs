use anyhow::Result;
use config::Config;

#[derive(Clone, serde::Deserialize)]
pub struct AppConfig {
    pub transcript_api_url: String,
    pub caption_language: String,
    pub charts_dir: String,
    pub histogram_bins: Option<usize>,
    pub excerpt_limit: Option<usize>,
    pub server_port: Option<u16>,
}

impl AppConfig {
    /// Валидация конфигурации
    pub fn validate(&self) -> Result<()> {
        if self.transcript_api_url.is_empty() {
            return Err(anyhow::anyhow!("transcript_api_url cannot be empty"));
        }

        if self.caption_language.is_empty() {
            return Err(anyhow::anyhow!("caption_language cannot be empty"));
        }

        if let Some(bins) = self.histogram_bins {
            if bins < 2 || bins > 200 {
                return Err(anyhow::anyhow!("histogram_bins must be between 2 and 200"));
            }
        }

        if let Some(limit) = self.excerpt_limit {
            if limit == 0 || limit > 2000 {
                return Err(anyhow::anyhow!("excerpt_limit must be between 1 and 2000"));
            }
        }

        Ok(())
    }
}

pub fn load_config() -> Result<AppConfig> {
    // Загружаем .env файл
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .set_default("transcript_api_url", "https://video.google.com/timedtext")?
        .set_default("caption_language", "en")?
        .set_default("charts_dir", "static")?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("YT_ANALYZER"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    config.validate()?;

    Ok(config)
}
