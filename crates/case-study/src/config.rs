use std::path::PathBuf;

use case_common::genai::{GenaiClientConfig, DEFAULT_MAX_ERROR_BODY_BYTES};

use crate::error::AppError;

const DEFAULT_CATEGORY: &str = "articles";

/// Application configuration loaded explicitly from environment variables.
///
/// Credentials (store URL, API key) must be supplied; nothing secret has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379").
    pub redis_url: String,
    /// Generative Language API settings, including the API key.
    pub genai: GenaiClientConfig,
    /// Categories offered for search. Never empty; the first is the default.
    pub categories: Vec<String>,
    /// JSON file of articles loaded into the default category at startup.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `REDIS_URL`: document store connection string
    /// - `GEMINI_API_KEY`: key for the summarization service
    ///
    /// Optional:
    /// - `GEMINI_BASE_URL`, `GEMINI_MODEL`, `GEMINI_MAX_ERROR_BODY_BYTES`
    /// - `CASE_STUDY_CATEGORIES`: comma-separated list (default "articles")
    /// - `CASE_STUDY_SEED_PATH`: seed file for the default category
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable is required")))
        };

        let redis_url = required("REDIS_URL")?;
        let api_key = required("GEMINI_API_KEY")?;

        let mut genai = GenaiClientConfig::new(api_key);
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            genai = genai.with_base_url(&base_url);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            genai = genai.with_model(model.trim());
        }
        genai.max_error_body_bytes = lookup("GEMINI_MAX_ERROR_BODY_BYTES")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_ERROR_BODY_BYTES);

        let categories = parse_categories(lookup("CASE_STUDY_CATEGORIES").as_deref());
        let seed_path = lookup("CASE_STUDY_SEED_PATH").map(PathBuf::from);

        Ok(Self {
            redis_url,
            genai,
            categories,
            seed_path,
        })
    }

    pub fn default_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or(DEFAULT_CATEGORY)
    }
}

fn parse_categories(raw: Option<&str>) -> Vec<String> {
    let categories: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if categories.is_empty() {
        vec![DEFAULT_CATEGORY.to_string()]
    } else {
        categories
    }
}
