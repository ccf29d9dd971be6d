/// Loading articles into a category.
///
/// The store appends blindly, so deduplication happens here: incoming articles
/// with an empty title, a title repeated within the batch, or a title already
/// present in the category are skipped.
use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::AppError;
use crate::model::Article;
use crate::store::ArticleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub stored: usize,
    pub skipped: usize,
}

/// Read a JSON array of articles (`article_title` / `article_text`).
pub fn load_seed_file(path: &Path) -> Result<Vec<Article>, AppError> {
    let seed_error = |message: String| AppError::Seed {
        path: path.display().to_string(),
        message,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| seed_error(e.to_string()))
}

/// Keep only articles whose titles are non-empty and not already in `existing`.
/// Titles within `incoming` are deduplicated too, first occurrence wins.
pub fn new_articles(existing: &[Article], incoming: Vec<Article>) -> Vec<Article> {
    let mut seen: HashSet<String> = existing.iter().map(|a| a.title.clone()).collect();
    incoming
        .into_iter()
        .filter(|a| {
            if a.title.trim().is_empty() {
                warn!("skipping article with empty title");
                return false;
            }
            seen.insert(a.title.clone())
        })
        .collect()
}

/// Append the articles of `incoming` that are new to `category`.
pub async fn ingest(
    store: &dyn ArticleStore,
    category: &str,
    incoming: Vec<Article>,
) -> Result<IngestReport, AppError> {
    let offered = incoming.len();
    let existing = store.fetch(category).await?;
    let fresh = new_articles(&existing, incoming);
    let stored = store.store(&fresh, category).await?;
    let report = IngestReport {
        stored,
        skipped: offered - fresh.len(),
    };
    info!(category, stored = report.stored, skipped = report.skipped, "ingest complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use case_common::error::CommonError;

    use super::*;

    #[derive(Default)]
    struct AppendOnlyStore {
        records: Mutex<Vec<(String, Article)>>,
    }

    #[async_trait]
    impl ArticleStore for AppendOnlyStore {
        async fn fetch(&self, category: &str) -> Result<Vec<Article>, CommonError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|(c, _)| c == category)
                .map(|(_, a)| a.clone())
                .collect())
        }

        async fn store(&self, articles: &[Article], category: &str) -> Result<usize, CommonError> {
            let mut records = self.records.lock().unwrap();
            records.extend(articles.iter().map(|a| (category.to_string(), a.clone())));
            Ok(articles.len())
        }
    }

    #[test]
    fn new_articles_drops_known_blank_and_repeated_titles() {
        let existing = vec![Article::new("A", "old")];
        let incoming = vec![
            Article::new("A", "dup of stored"),
            Article::new("B", "fresh"),
            Article::new("  ", "blank"),
            Article::new("B", "dup in batch"),
            Article::new("C", "fresh too"),
        ];
        assert_eq!(
            new_articles(&existing, incoming),
            vec![Article::new("B", "fresh"), Article::new("C", "fresh too")]
        );
    }

    #[tokio::test]
    async fn ingest_twice_does_not_duplicate() {
        let store = AppendOnlyStore::default();
        let batch = vec![Article::new("A", "a"), Article::new("B", "b")];

        let first = ingest(&store, "articles", batch.clone()).await.unwrap();
        assert_eq!(first, IngestReport { stored: 2, skipped: 0 });

        let second = ingest(&store, "articles", batch).await.unwrap();
        assert_eq!(second, IngestReport { stored: 0, skipped: 2 });
        assert_eq!(store.fetch("articles").await.unwrap().len(), 2);
        assert!(store.fetch("other").await.unwrap().is_empty());
    }

    #[test]
    fn bundled_seed_file_has_five_articles() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/articles.json");
        let articles = load_seed_file(&path).unwrap();
        assert_eq!(articles.len(), 5);
        assert_eq!(new_articles(&[], articles.clone()).len(), 5);
        let water: Vec<_> = crate::search::filter(&articles, "water");
        assert_eq!(water.len(), 1);
        assert_eq!(
            water[0].title,
            "Water Conservation Techniques in Drought-Prone Areas"
        );
    }

    #[test]
    fn malformed_seed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"not\": \"an array\"}").unwrap();
        let err = load_seed_file(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Seed { .. }), "got {err:?}");
    }

    #[test]
    fn missing_seed_file_is_reported() {
        let err = load_seed_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
