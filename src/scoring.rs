use serde::Deserialize;

/// How a keyword has to appear in a text to count as a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Case-insensitive substring anywhere in the text, so "sql" matches "nosql".
    #[default]
    Substring,
    /// Case-insensitive match whose neighbours are not alphanumeric.
    WordBoundary,
}

/// Counts how many keywords occur in a text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    strategy: MatchStrategy,
}

impl Scorer {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Number of keywords found in `text`. Each keyword counts at most once,
    /// however often it occurs; blank keywords never match.
    pub fn score<I, K>(&self, text: &str, keywords: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let text = text.to_lowercase();
        keywords
            .into_iter()
            .filter(|keyword| {
                let keyword = keyword.as_ref().to_lowercase();
                !keyword.is_empty() && self.matches(&text, &keyword)
            })
            .count()
    }

    fn matches(&self, text: &str, keyword: &str) -> bool {
        match self.strategy {
            MatchStrategy::Substring => text.contains(keyword),
            MatchStrategy::WordBoundary => text.match_indices(keyword).any(|(start, found)| {
                let before = text[..start].chars().next_back();
                let after = text[start + found.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
            }),
        }
    }
}

/// Case-insensitive substring score of `text` against `keywords`.
pub fn score<I, K>(text: &str, keywords: I) -> usize
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    Scorer::default().score(text, keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_KEYWORDS: [&str; 0] = [];

    #[test]
    fn empty_keywords_score_zero() {
        assert_eq!(score("Python and SQL", NO_KEYWORDS), 0);
        assert_eq!(score("", NO_KEYWORDS), 0);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score("", ["python", "sql"]), 0);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(score("Python", ["python"]), 1);
        assert_eq!(score("python", ["PYTHON"]), 1);
    }

    #[test]
    fn each_keyword_counts_once() {
        assert_eq!(score("sql sql sql", ["sql"]), 1);
        assert_eq!(score("Pandas and BeautifulSoup", ["pandas", "beautifulsoup", "django"]), 2);
    }

    #[test]
    fn substring_matches_inside_words() {
        assert_eq!(score("nosqlite", ["sql"]), 1);
    }

    #[test]
    fn blank_keyword_never_matches() {
        assert_eq!(score("anything", [""]), 0);
        assert_eq!(score("", [""]), 0);
    }

    #[test]
    fn word_boundary_skips_embedded_matches() {
        let scorer = Scorer::new(MatchStrategy::WordBoundary);
        assert_eq!(scorer.score("nosqlite", ["sql"]), 0);
        assert_eq!(scorer.score("nosqlite and SQL", ["sql"]), 1);
        assert_eq!(scorer.score("SQL (PostgreSQL)", ["sql"]), 1);
        assert_eq!(scorer.score("power bi, excel", ["power bi", "excel"]), 2);
    }

    #[test]
    fn strategy_from_config_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: MatchStrategy,
        }
        let parsed: Wrapper = toml::from_str("strategy = \"word-boundary\"").unwrap();
        assert_eq!(parsed.strategy, MatchStrategy::WordBoundary);
    }
}
