use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetLanguageParams {
    /// Target language for summaries, e.g. "English", "French", "Japanese".
    pub language: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCaseStudiesParams {
    /// Category to search (default: the first configured category, usually "articles").
    pub category: Option<String>,
    /// Case-insensitive substring matched against article titles. Empty returns everything.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectCaseStudyParams {
    /// Exact title of an article from the last search result.
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticlePayload {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StoreCaseStudiesParams {
    /// Category to append to. Spaces are stored as underscores.
    pub category: String,
    /// Articles to insert. Repeated calls insert duplicates.
    pub articles: Vec<ArticlePayload>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct OptionsResponse {
    pub languages: Vec<String>,
    pub categories: Vec<String>,
    pub selected_language: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct LanguageResponse {
    pub selected_language: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SearchCaseStudiesResponse {
    /// One of "found", "empty_category", "no_matches".
    pub status: String,
    pub category: String,
    /// Number of articles in the category before filtering.
    pub total: usize,
    /// Matching titles, in store order.
    pub titles: Vec<String>,
    /// User-facing notice for empty outcomes.
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SelectionResponse {
    pub title: String,
    pub text: String,
    pub character_count: usize,
    pub approx_word_count: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SummaryResponse {
    pub language: String,
    pub summary: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SessionResponse {
    /// One of "idle", "searched", "selected", "summarizing", "summarized".
    pub phase: String,
    pub selected_language: String,
    pub results: Vec<String>,
    pub chosen_title: Option<String>,
    pub chosen_text: Option<String>,
    pub summary: Option<String>,
    pub summary_word_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StoreCaseStudiesResponse {
    pub category: String,
    pub stored: usize,
    /// Articles dropped for a blank or already-present title.
    pub skipped: usize,
}
