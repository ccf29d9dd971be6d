/// MCP server for the regional-language case-study dashboard.
///
/// Each tool is one user action against a single session:
/// - `list_options`: languages and categories on offer
/// - `set_language`: choose the summary language
/// - `search_case_studies`: search a category by title
/// - `select_case_study`: pick an article from the last results
/// - `generate_summary`: summarize the selected article
/// - `get_session`: current state of the session
/// - `store_case_studies`: add articles to a category
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;
use tracing::warn;

use case_common::mcp_api::{
    LanguageResponse, OptionsResponse, SearchCaseStudiesParams, SearchCaseStudiesResponse,
    SelectCaseStudyParams, SelectionResponse, SessionResponse, SetLanguageParams,
    StoreCaseStudiesParams, StoreCaseStudiesResponse, SummaryResponse,
};

use crate::error::AppError;
use crate::ingest;
use crate::model::{Article, Language};
use crate::session::SessionController;
use crate::store::ArticleStore;

#[derive(Clone)]
pub struct CaseStudyServer {
    /// One session per process; the lock serializes user actions.
    session: Arc<Mutex<SessionController>>,
    store: Arc<dyn ArticleStore>,
    categories: Arc<Vec<String>>,
    tool_router: ToolRouter<CaseStudyServer>,
}

impl CaseStudyServer {
    pub fn new(
        session: SessionController,
        store: Arc<dyn ArticleStore>,
        categories: Vec<String>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            store,
            categories: Arc::new(categories),
            tool_router: Self::tool_router(),
        }
    }

    fn resolve_category(&self, requested: Option<&str>) -> Result<String, AppError> {
        let requested = requested.map(str::trim).filter(|c| !c.is_empty());
        match requested {
            None => self
                .categories
                .first()
                .cloned()
                .ok_or_else(|| AppError::Config("no categories configured".to_string())),
            Some(c) if self.categories.iter().any(|known| known == c) => Ok(c.to_string()),
            Some(c) => Err(AppError::UnknownCategory(format!(
                "{c} (available: {})",
                self.categories.join(", ")
            ))),
        }
    }
}

#[tool_router]
impl CaseStudyServer {
    #[tool(description = "List the summary languages and case-study categories on offer, plus the currently selected language.")]
    async fn list_options(&self) -> Result<Json<OptionsResponse>, String> {
        let session = self.session.lock().await;
        Ok(Json(OptionsResponse {
            languages: Language::SELECTABLE.iter().map(|l| l.to_string()).collect(),
            categories: self.categories.to_vec(),
            selected_language: session.language().to_string(),
        }))
    }

    #[tool(description = "Choose the language for the next generated summary (English, Russian, Hindi, French, Japanese).")]
    async fn set_language(
        &self,
        Parameters(params): Parameters<SetLanguageParams>,
    ) -> Result<Json<LanguageResponse>, String> {
        let language: Language = params.language.parse::<Language>().map_err(|e| e.to_string())?;
        let mut session = self.session.lock().await;
        session.set_language(language);
        Ok(Json(LanguageResponse {
            selected_language: language.to_string(),
        }))
    }

    #[tool(description = "Search a case-study category by title (case-insensitive substring; empty query lists all). Resets any selection and summary.")]
    async fn search_case_studies(
        &self,
        Parameters(params): Parameters<SearchCaseStudiesParams>,
    ) -> Result<Json<SearchCaseStudiesResponse>, String> {
        let category = self
            .resolve_category(params.category.as_deref())
            .map_err(|e| e.to_string())?;
        let query = params.query.unwrap_or_default();

        let mut session = self.session.lock().await;
        let outcome = session
            .search(&category, &query)
            .await
            .map_err(|e| format!("search failed: {e}"))?;
        if let Some(message) = outcome.message() {
            warn!(category = %category, query = %query, notice = message, "empty search outcome");
        }

        Ok(Json(SearchCaseStudiesResponse {
            status: outcome.status().to_string(),
            category,
            total: outcome.total(),
            titles: session.results().iter().map(|a| a.title.clone()).collect(),
            message: outcome.message().map(str::to_string),
        }))
    }

    #[tool(description = "Select a case study by its exact title from the last search results. Clears any previous summary.")]
    async fn select_case_study(
        &self,
        Parameters(params): Parameters<SelectCaseStudyParams>,
    ) -> Result<Json<SelectionResponse>, String> {
        let mut session = self.session.lock().await;
        let selection = session
            .select(&params.title)
            .map_err(|e| format!("selection failed: {e}"))?;
        let article = Article::new(selection.title.clone(), selection.text.clone());
        Ok(Json(SelectionResponse {
            character_count: article.character_count(),
            approx_word_count: article.approx_word_count(),
            title: article.title,
            text: article.text,
        }))
    }

    #[tool(description = "Generate a summary of the selected case study in the chosen language (at most 500 words, technical terms and statistics preserved).")]
    async fn generate_summary(&self) -> Result<Json<SummaryResponse>, String> {
        let mut session = self.session.lock().await;
        let summary = session
            .generate_summary()
            .await
            .map_err(|e| format!("summarization failed: {e}"))?;
        Ok(Json(SummaryResponse {
            language: summary.language.to_string(),
            summary: summary.text.clone(),
            word_count: summary.word_count,
        }))
    }

    #[tool(description = "Show the current session: phase, language, search results, selected article and summary.")]
    async fn get_session(&self) -> Result<Json<SessionResponse>, String> {
        let session = self.session.lock().await;
        Ok(Json(SessionResponse {
            phase: session.phase().as_str().to_string(),
            selected_language: session.language().to_string(),
            results: session.results().iter().map(|a| a.title.clone()).collect(),
            chosen_title: session.selection().map(|s| s.title.clone()),
            chosen_text: session.selection().map(|s| s.text.clone()),
            summary: session.summary().map(|s| s.text.clone()),
            summary_word_count: session.summary().map(|s| s.word_count),
        }))
    }

    #[tool(description = "Add articles to a category. Articles whose title already exists in the category are skipped.")]
    async fn store_case_studies(
        &self,
        Parameters(params): Parameters<StoreCaseStudiesParams>,
    ) -> Result<Json<StoreCaseStudiesResponse>, String> {
        let category = params.category.trim().to_string();
        if category.is_empty() {
            return Err("category must not be empty".to_string());
        }
        if params.articles.is_empty() {
            return Err("articles must not be empty".to_string());
        }
        let articles: Vec<Article> = params
            .articles
            .into_iter()
            .map(|a| Article::new(a.title.trim(), a.text))
            .collect();

        let report = ingest::ingest(self.store.as_ref(), &category, articles)
            .await
            .map_err(|e| format!("store failed: {e}"))?;
        Ok(Json(StoreCaseStudiesResponse {
            category,
            stored: report.stored,
            skipped: report.skipped,
        }))
    }
}

#[tool_handler]
impl ServerHandler for CaseStudyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "case-study".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Regional Language Case Study".to_string()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Regional-language case-study dashboard. Call search_case_studies to find articles, \
select_case_study with an exact title from the results, optionally set_language, then \
generate_summary. A new search resets the selection and summary; a new selection resets the \
summary. get_session shows the current state."
                    .to_string(),
            ),
        }
    }
}
