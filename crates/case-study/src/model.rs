use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single case-study article.
///
/// Field names on the wire follow the ingestion format (`article_title`,
/// `article_text`) so records written by other tools read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Non-empty, unique within a category.
    #[serde(rename = "article_title")]
    pub title: String,
    #[serde(rename = "article_text")]
    pub text: String,
}

impl Article {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn approx_word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Collection identifier for a category: spaces become underscores.
pub fn collection_name(category: &str) -> String {
    category.replace(' ', "_")
}

/// Target language for a generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Russian,
    Hindi,
    French,
    Japanese,
    Chinese,
}

impl Language {
    /// Languages offered to the user, in display order.
    pub const SELECTABLE: [Language; 5] = [
        Language::English,
        Language::Russian,
        Language::Hindi,
        Language::French,
        Language::Japanese,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Russian",
            Language::Hindi => "Hindi",
            Language::French => "French",
            Language::Japanese => "Japanese",
            Language::Chinese => "Chinese",
        }
    }

    /// Languages written without spaces between words; their word count is a
    /// character count.
    pub fn counts_characters(self) -> bool {
        matches!(self, Language::Japanese | Language::Chinese)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [
            Language::English,
            Language::Russian,
            Language::Hindi,
            Language::French,
            Language::Japanese,
            Language::Chinese,
        ]
        .into_iter()
        .find(|l| l.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| AppError::UnknownLanguage(wanted.to_string()))
    }
}
