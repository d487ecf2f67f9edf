use crate::i18n::LanguageRegistry;
use crate::theme::validate_hex_color;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Languages
    pub languages: String,
    pub default_language: String,

    // Routing
    pub admin_url: String,
    pub reserved_paths: Vec<String>,

    // Theme
    pub theme_color: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let theme_color =
            std::env::var("AMS_THEME_COLOR").unwrap_or_else(|_| "#1d3557".to_string());
        validate_hex_color(&theme_color).context("AMS_THEME_COLOR is invalid")?;

        Ok(Self {
            // Languages - "code:Name" pairs, comma separated
            languages: std::env::var("AMS_LANGUAGES")
                .unwrap_or_else(|_| "en:English,mi:Te Reo Māori".to_string()),
            default_language: std::env::var("AMS_DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),

            // Routing
            admin_url: std::env::var("AMS_ADMIN_URL").unwrap_or_else(|_| "admin/".to_string()),
            reserved_paths: std::env::var("AMS_RESERVED_PATHS")
                .unwrap_or_else(|_| "billing,cms,cms-documents,forum".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            theme_color,

            // Server
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .with_context(|| format!("PORT is not a valid port number: {}", port))?,
                Err(_) => 8080,
            },
        })
    }

    /// Build the language registry described by this configuration.
    pub fn language_registry(&self) -> Result<LanguageRegistry> {
        LanguageRegistry::parse(&self.languages, &self.default_language)
            .context("Invalid AMS_LANGUAGES / AMS_DEFAULT_LANGUAGE")
    }
}
