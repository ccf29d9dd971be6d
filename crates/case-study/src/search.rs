/// Title search over a category's articles.
///
/// Matching is a case-insensitive substring test on the title. No ranking:
/// results keep the order the store returned them in.
use crate::model::Article;

/// Filter `articles` by `query`.
///
/// The query is trimmed and lowercased first; an empty query returns the input
/// unchanged.
pub fn filter(articles: &[Article], query: &str) -> Vec<Article> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|a| a.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Result of a search that reached the store.
///
/// Empty outcomes are not failures; they carry why nothing came back so the
/// caller can show the right notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { total: usize, matches: usize },
    Empty(EmptyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The category holds no articles at all.
    EmptyCategory,
    /// The category has articles but none matched the query.
    NoMatches { total: usize },
}

impl SearchOutcome {
    pub fn classify(total: usize, matches: usize) -> Self {
        match (total, matches) {
            (0, _) => SearchOutcome::Empty(EmptyReason::EmptyCategory),
            (total, 0) => SearchOutcome::Empty(EmptyReason::NoMatches { total }),
            (total, matches) => SearchOutcome::Found { total, matches },
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            SearchOutcome::Found { .. } => "found",
            SearchOutcome::Empty(EmptyReason::EmptyCategory) => "empty_category",
            SearchOutcome::Empty(EmptyReason::NoMatches { .. }) => "no_matches",
        }
    }

    pub fn total(&self) -> usize {
        match *self {
            SearchOutcome::Found { total, .. } => total,
            SearchOutcome::Empty(EmptyReason::NoMatches { total }) => total,
            SearchOutcome::Empty(EmptyReason::EmptyCategory) => 0,
        }
    }

    pub fn matches(&self) -> usize {
        match *self {
            SearchOutcome::Found { matches, .. } => matches,
            SearchOutcome::Empty(_) => 0,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchOutcome::Found { .. } => None,
            SearchOutcome::Empty(EmptyReason::EmptyCategory) => Some("No case studies found"),
            SearchOutcome::Empty(EmptyReason::NoMatches { .. }) => {
                Some("No matching case studies found")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Article> {
        vec![
            Article::new("Water Conservation Techniques in Drought-Prone Areas", "a"),
            Article::new("Solar Microgrids for Rural Electrification", "b"),
            Article::new("Urban WATERfront Regeneration", "c"),
            Article::new("Community Health Worker Programs", "d"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let articles = catalog();
        assert_eq!(filter(&articles, ""), articles);
        assert_eq!(filter(&articles, "   "), articles);
    }

    #[test]
    fn match_is_case_insensitive_and_stable() {
        let titles: Vec<String> = filter(&catalog(), "  Water ")
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Water Conservation Techniques in Drought-Prone Areas",
                "Urban WATERfront Regeneration",
            ]
        );
    }

    #[test]
    fn every_result_contains_the_query() {
        let articles = catalog();
        for query in ["a", "RURAL", "prog", "tion", "zzz"] {
            let needle = query.trim().to_lowercase();
            let results = filter(&articles, query);
            assert!(results.len() <= articles.len());
            for a in &results {
                assert!(a.title.to_lowercase().contains(&needle), "{query}: {}", a.title);
                assert!(articles.contains(a));
            }
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(filter(&[], "water").is_empty());
        assert!(filter(&[], "").is_empty());
    }

    #[test]
    fn classify_distinguishes_empty_category_from_no_matches() {
        assert_eq!(
            SearchOutcome::classify(0, 0),
            SearchOutcome::Empty(EmptyReason::EmptyCategory)
        );
        assert_eq!(
            SearchOutcome::classify(5, 0),
            SearchOutcome::Empty(EmptyReason::NoMatches { total: 5 })
        );
        assert_eq!(
            SearchOutcome::classify(5, 1),
            SearchOutcome::Found { total: 5, matches: 1 }
        );
        assert_eq!(SearchOutcome::classify(0, 0).status(), "empty_category");
        assert_eq!(SearchOutcome::classify(5, 0).status(), "no_matches");
        assert_eq!(SearchOutcome::classify(5, 0).total(), 5);
        assert_eq!(SearchOutcome::classify(5, 2).matches(), 2);
        assert!(SearchOutcome::classify(5, 2).message().is_none());
    }
}
