/// Summarization client.
///
/// Builds the fixed summary prompt, forwards it to a text generator and applies
/// the per-language word-count policy to the reply.
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use case_common::error::CommonError;
use case_common::genai::GenaiClient;

use crate::model::Language;

/// Upper bound on summary length requested from the model.
pub const MAX_SUMMARY_WORDS: usize = 500;

/// Anything that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CommonError>;
}

#[async_trait]
impl TextGenerator for GenaiClient {
    async fn generate(&self, prompt: &str) -> Result<String, CommonError> {
        Ok(self.generate_text(prompt).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("empty response from summarization service")]
    EmptyResponse,

    #[error(transparent)]
    Service(#[from] CommonError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub word_count: usize,
    pub language: Language,
}

#[derive(Clone)]
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Summarize `text` in `language`. A single call; failures are returned as-is.
    pub async fn summarize(&self, text: &str, language: Language) -> Result<Summary, SummarizeError> {
        let prompt = build_prompt(text, language);
        let reply = self
            .generator
            .generate(&prompt)
            .await
            .inspect_err(|e| warn!(error = %e, %language, "summary generation failed"))?;

        let summary = reply.trim();
        if summary.is_empty() {
            warn!(%language, "summarization service returned an empty response");
            return Err(SummarizeError::EmptyResponse);
        }

        let word_count = count_words(summary, language);
        info!(%language, word_count, "summary generated");
        Ok(Summary {
            text: summary.to_string(),
            word_count,
            language,
        })
    }
}

/// The summary instruction. Its four constraints (target language, technical
/// terms kept, numbers kept, length cap) are what the model is held to.
pub fn build_prompt(text: &str, language: Language) -> String {
    format!(
        "Create a comprehensive summary in {language} with these requirements:\n    \
         - Maintain original technical terms\n    \
         - Preserve key numbers and statistics\n    \
         - Use clear paragraph structure\n    \
         - Maximum {MAX_SUMMARY_WORDS} words\n    \
         Text: {text}"
    )
}

/// Word count under the language policy: characters for scripts written without
/// spaces, whitespace-separated tokens otherwise.
pub fn count_words(text: &str, language: Language) -> usize {
    if language.counts_characters() {
        text.chars().count()
    } else {
        text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct ScriptedGenerator {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, CommonError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct DownGenerator;

    #[async_trait]
    impl TextGenerator for DownGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, CommonError> {
            Err(CommonError::Connection("connection refused".to_string()))
        }
    }

    #[test]
    fn prompt_carries_all_constraints() {
        let prompt = build_prompt("Rainwater harvesting cut usage by 40%.", Language::Hindi);
        assert_eq!(
            prompt,
            "Create a comprehensive summary in Hindi with these requirements:\n    \
             - Maintain original technical terms\n    \
             - Preserve key numbers and statistics\n    \
             - Use clear paragraph structure\n    \
             - Maximum 500 words\n    \
             Text: Rainwater harvesting cut usage by 40%."
        );
    }

    #[test]
    fn word_count_policy() {
        assert_eq!(count_words("one two\nthree\tfour", Language::English), 4);
        assert_eq!(count_words("un deux trois", Language::French), 3);
        assert_eq!(count_words("水の保全", Language::Japanese), 4);
        assert_eq!(count_words("节约 用水", Language::Chinese), 5);
        assert_eq!(count_words("", Language::Russian), 0);
    }

    #[tokio::test]
    async fn japanese_counts_characters_of_returned_text() {
        let generator = ScriptedGenerator::new("  干ばつ地域の節水技術。  \n");
        let summary = Summarizer::new(generator.clone())
            .summarize("source", Language::Japanese)
            .await
            .unwrap();
        assert_eq!(summary.text, "干ばつ地域の節水技術。");
        assert_eq!(summary.word_count, summary.text.chars().count());
        assert_eq!(summary.language, Language::Japanese);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("summary in Japanese"));
        assert!(prompts[0].ends_with("Text: source"));
    }

    #[tokio::test]
    async fn english_counts_whitespace_tokens() {
        let summary = Summarizer::new(ScriptedGenerator::new("Drip irrigation saved 30% water.\n\nFarmers adopted it."))
            .summarize("source", Language::English)
            .await
            .unwrap();
        assert_eq!(summary.word_count, 8);
        assert_eq!(summary.word_count, summary.text.split_whitespace().count());
    }

    #[tokio::test]
    async fn blank_reply_is_an_empty_response() {
        for reply in ["", "   \n\t"] {
            let err = Summarizer::new(ScriptedGenerator::new(reply))
                .summarize("source", Language::French)
                .await
                .unwrap_err();
            assert!(matches!(err, SummarizeError::EmptyResponse), "{reply:?}");
        }
    }

    #[tokio::test]
    async fn service_failure_is_passed_through() {
        let err = Summarizer::new(Arc::new(DownGenerator))
            .summarize("source", Language::English)
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::Service(CommonError::Connection(_))));
    }
}
