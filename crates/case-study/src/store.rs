/// Document store adapter for case-study articles.
///
/// Each category maps to one Redis list (`case_study:v1:collection:{name}`) holding
/// JSON-encoded articles. Reads are always a fresh round trip; nothing is cached
/// locally. Writes append, so storing the same batch twice duplicates it.
use async_trait::async_trait;
use tracing::{info, warn};

use case_common::error::CommonError;
use case_common::redis::RedisStore;

use crate::model::{collection_name, Article};

const KEY_PREFIX: &str = "case_study:v1:collection:";

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles in `category`, in insertion order. An unknown or empty
    /// category yields an empty vector.
    async fn fetch(&self, category: &str) -> Result<Vec<Article>, CommonError>;

    /// Append `articles` to `category`. Returns how many were written.
    async fn store(&self, articles: &[Article], category: &str) -> Result<usize, CommonError>;
}

pub struct RedisArticleStore {
    redis: RedisStore,
}

impl RedisArticleStore {
    pub fn new(redis: RedisStore) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl ArticleStore for RedisArticleStore {
    async fn fetch(&self, category: &str) -> Result<Vec<Article>, CommonError> {
        let key = collection_key(category);
        let raw = self.redis.list_all(&key).await?;
        let articles = decode_articles(&key, raw);
        info!(category, count = articles.len(), "fetched case studies");
        Ok(articles)
    }

    async fn store(&self, articles: &[Article], category: &str) -> Result<usize, CommonError> {
        let key = collection_key(category);
        let encoded = articles
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        self.redis.append_all(&key, encoded).await?;
        info!(category, count = articles.len(), "stored case studies");
        Ok(articles.len())
    }
}

fn collection_key(category: &str) -> String {
    format!("{KEY_PREFIX}{}", collection_name(category))
}

/// Decode stored records, skipping any that are not valid articles.
fn decode_articles(key: &str, raw: Vec<String>) -> Vec<Article> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, json)| {
            serde_json::from_str::<Article>(&json)
                .inspect_err(|e| warn!(error = %e, key, index, "skipping undecodable record"))
                .ok()
        })
        .collect()
}
