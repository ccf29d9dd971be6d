/// Session controller for the search → select → summarize pipeline.
///
/// Holds one user's state and enforces the lifecycle ordering: a new search
/// clears the selection and summary, a new selection clears the summary. Every
/// failure leaves the state as it was before the action, except a failed
/// summary which also drops back to `Selected`.
use std::sync::Arc;

use tracing::{info, warn};

use case_common::error::CommonError;

use crate::model::{Article, Language};
use crate::search::{filter, SearchOutcome};
use crate::store::ArticleStore;
use crate::summarize::{SummarizeError, Summarizer, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searched,
    Selected,
    Summarizing,
    Summarized,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Searched => "searched",
            Phase::Selected => "selected",
            Phase::Summarizing => "summarizing",
            Phase::Summarized => "summarized",
        }
    }
}

/// The chosen article. Title and text are always set together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub title: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("document store error: {0}")]
    Store(String),

    #[error("no search has been run yet")]
    NoSearch,

    #[error("case study not found in the last search results: {0}")]
    UnknownTitle(String),

    #[error("no case study selected")]
    NoSelection,

    #[error("empty response from summarization service")]
    EmptyResponse,

    #[error("summarization failed: {0}")]
    Summarization(String),
}

impl From<CommonError> for SessionError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Connection(message) => SessionError::Connection(message),
            other => SessionError::Store(other.to_string()),
        }
    }
}

impl From<SummarizeError> for SessionError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::EmptyResponse => SessionError::EmptyResponse,
            SummarizeError::Service(e) => SessionError::Summarization(e.to_string()),
        }
    }
}

pub struct SessionController {
    store: Arc<dyn ArticleStore>,
    summarizer: Summarizer,
    language: Language,
    phase: Phase,
    /// `None` until the first successful search.
    results: Option<Vec<Article>>,
    selection: Option<Selection>,
    summary: Option<Summary>,
}

impl SessionController {
    pub fn new(store: Arc<dyn ArticleStore>, summarizer: Summarizer) -> Self {
        Self {
            store,
            summarizer,
            language: Language::default(),
            phase: Phase::Idle,
            results: None,
            selection: None,
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn results(&self) -> &[Article] {
        self.results.as_deref().unwrap_or(&[])
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Language used by the next `generate_summary`. Does not touch the
    /// current selection or summary.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Fetch `category`, filter by `query` and make the matches the current
    /// result set. An empty outcome still counts as a completed search.
    pub async fn search(&mut self, category: &str, query: &str) -> Result<SearchOutcome, SessionError> {
        let articles = self
            .store
            .fetch(category)
            .await
            .inspect_err(|e| warn!(error = %e, category, "search aborted"))?;

        let matches = filter(&articles, query);
        let outcome = SearchOutcome::classify(articles.len(), matches.len());

        self.selection = None;
        self.summary = None;
        self.results = Some(matches);
        self.phase = Phase::Searched;

        info!(
            category,
            query,
            status = outcome.status(),
            total = outcome.total(),
            matches = outcome.matches(),
            "search complete"
        );
        Ok(outcome)
    }

    /// Select the article whose title exactly matches `title` in the last
    /// result set. Clears any previous summary.
    pub fn select(&mut self, title: &str) -> Result<&Selection, SessionError> {
        let results = self.results.as_ref().ok_or(SessionError::NoSearch)?;
        let article = results
            .iter()
            .find(|a| a.title == title)
            .ok_or_else(|| SessionError::UnknownTitle(title.to_string()))?;

        let selection = Selection {
            title: article.title.clone(),
            text: article.text.clone(),
        };
        self.summary = None;
        self.phase = Phase::Selected;
        info!(title, "case study selected");
        Ok(self.selection.insert(selection))
    }

    /// Summarize the selected article in the current language, replacing any
    /// previous summary.
    pub async fn generate_summary(&mut self) -> Result<&Summary, SessionError> {
        let text = self
            .selection
            .as_ref()
            .map(|s| s.text.clone())
            .ok_or(SessionError::NoSelection)?;

        self.summary = None;
        self.phase = Phase::Summarizing;

        match self.summarizer.summarize(&text, self.language).await {
            Ok(summary) => {
                self.phase = Phase::Summarized;
                Ok(self.summary.insert(summary))
            }
            Err(e) => {
                self.phase = Phase::Selected;
                Err(e.into())
            }
        }
    }
}
