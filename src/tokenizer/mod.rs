//! Query-time text analysis.
//!
//! The compiler needs the same analyzer as index time, minus synonym
//! expansion — an index-time analyzer may add synonym terms, which would
//! corrupt phrase positions at query time. The [`AnalyzerRegistry`] keeps an
//! index-time and a query-time variant per language; compilation always
//! resolves the query variant.
//!
//! Tokens carry a position increment instead of an absolute position:
//! stopword removal leaves gaps in the position sequence, and the leaf
//! compiler reassembles absolute positions from the increments.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use rust_stemmers::Algorithm;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::Result;

/// A token produced by query-time analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryToken {
    /// The text content of the token
    pub text: String,
    /// Positions skipped since the previous token, plus one. Normally 1;
    /// larger when the analyzer removed tokens in between.
    pub position_increment: u32,
}

impl QueryToken {
    pub fn new(text: impl Into<String>, position_increment: u32) -> Self {
        Self {
            text: text.into(),
            position_increment,
        }
    }
}

/// Trait for query-time analyzers.
///
/// Analysis may fail (e.g. an external analyzer backend faults); that
/// failure is fatal for the compilation using it.
pub trait QueryAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Vec<QueryToken>>;
}

/// Trim, lowercase, and strip diacritics.
///
/// NFD decomposition followed by dropping combining marks, so "Café" and
/// "cafe" analyze identically.
pub fn normalize_query_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Languages the standard analyzer chain supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    Dutch,
    #[default]
    English,
    French,
    German,
}

impl Language {
    fn to_algorithm(self) -> Algorithm {
        match self {
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
        }
    }

    fn to_stop_words_language(self) -> LANGUAGE {
        match self {
            Language::Dutch => LANGUAGE::Dutch,
            Language::English => LANGUAGE::English,
            Language::French => LANGUAGE::French,
            Language::German => LANGUAGE::German,
        }
    }
}

/// Parse a language string into a Language enum
///
/// Supports common language codes and names; unknown input is `None` so a
/// caller cannot register a mislabeled chain by accident.
pub fn parse_language(s: &str) -> Option<Language> {
    match s.to_lowercase().as_str() {
        "nl" | "dutch" => Some(Language::Dutch),
        "en" | "english" => Some(Language::English),
        "fr" | "french" => Some(Language::French),
        "de" | "german" => Some(Language::German),
        _ => None,
    }
}

/// Strip non-alphanumeric characters.
///
/// Input text is already lowercased by [`normalize_query_text`], so only the
/// character filter remains here.
fn clean_word(word: &str) -> String {
    word.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Standard query-time analyzer: whitespace split, alphanumeric cleanup,
/// stopword removal, Snowball stemming.
///
/// Stopwords are checked before stemming and removing one widens the next
/// token's position increment, so the positions recorded at index time stay
/// reachable for phrase matching. Punctuation-only words never occupied a
/// position and are skipped without a gap.
#[derive(Debug, Clone)]
pub struct StandardQueryAnalyzer {
    language: Language,
    stop_words: HashSet<String>,
}

impl StandardQueryAnalyzer {
    pub fn new(language: Language) -> Self {
        let stop_words: HashSet<String> = stop_words::get(language.to_stop_words_language())
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            language,
            stop_words,
        }
    }

    pub fn english() -> Self {
        Self::new(Language::English)
    }
}

impl QueryAnalyzer for StandardQueryAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<QueryToken>> {
        let stemmer = rust_stemmers::Stemmer::create(self.language.to_algorithm());
        let mut tokens = Vec::new();
        let mut increment = 1u32;
        for word in text.split_whitespace() {
            let cleaned = clean_word(word);
            if cleaned.is_empty() {
                continue;
            }
            if self.stop_words.contains(&cleaned) {
                increment += 1;
                continue;
            }
            let stemmed = stemmer.stem(&cleaned).into_owned();
            tokens.push(QueryToken::new(stemmed, increment));
            increment = 1;
        }
        Ok(tokens)
    }
}

struct LanguageAnalyzers {
    index: Arc<dyn QueryAnalyzer>,
    query: Arc<dyn QueryAnalyzer>,
}

/// Registry of per-language analyzers.
///
/// Each language id maps to an index-time and a query-time analyzer. The
/// defaults register the standard chain for both variants of "nl", "en",
/// "fr", and "de"; a caller whose index-time analyzer expands synonyms
/// registers the pair explicitly, keeping the expansion out of the query
/// variant.
#[derive(Clone)]
pub struct AnalyzerRegistry {
    languages: Arc<RwLock<FxHashMap<String, LanguageAnalyzers>>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        let registry = Self {
            languages: Arc::new(RwLock::new(FxHashMap::default())),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&self) {
        for (id, language) in [
            ("nl", Language::Dutch),
            ("en", Language::English),
            ("fr", Language::French),
            ("de", Language::German),
        ] {
            self.register_standard(id, language);
        }
    }

    /// Register the standard chain for both variants of a language id.
    pub fn register_standard(&self, language_id: &str, language: Language) {
        let analyzer: Arc<dyn QueryAnalyzer> = Arc::new(StandardQueryAnalyzer::new(language));
        self.register(language_id, analyzer.clone(), analyzer);
    }

    /// Register an index-time / query-time analyzer pair for a language id.
    pub fn register(
        &self,
        language_id: &str,
        index: Arc<dyn QueryAnalyzer>,
        query: Arc<dyn QueryAnalyzer>,
    ) {
        let mut languages = self.languages.write();
        languages.insert(language_id.to_string(), LanguageAnalyzers { index, query });
    }

    /// Query-time (no synonym expansion) analyzer for a language id.
    pub fn query_analyzer(&self, language_id: &str) -> Option<Arc<dyn QueryAnalyzer>> {
        let languages = self.languages.read();
        languages.get(language_id).map(|l| l.query.clone())
    }

    /// Index-time analyzer for a language id.
    pub fn index_analyzer(&self, language_id: &str) -> Option<Arc<dyn QueryAnalyzer>> {
        let languages = self.languages.read();
        languages.get(language_id).map(|l| l.index.clone())
    }

    pub fn contains(&self, language_id: &str) -> bool {
        let languages = self.languages.read();
        languages.contains_key(language_id)
    }

    pub fn names(&self) -> Vec<String> {
        let languages = self.languages.read();
        languages.keys().cloned().collect()
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_query_text("  Hello World  "), "hello world");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize_query_text("Café Liégeois"), "cafe liegeois");
        assert_eq!(normalize_query_text("Ingénieur Réseaux"), "ingenieur reseaux");
    }

    #[test]
    fn test_standard_analyzer_stems() {
        let analyzer = StandardQueryAnalyzer::english();
        let tokens = analyzer.analyze("running dogs").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "run");
        assert_eq!(tokens[0].position_increment, 1);
        assert_eq!(tokens[1].text, "dog");
        assert_eq!(tokens[1].position_increment, 1);
    }

    #[test]
    fn test_stopword_removal_widens_increment() {
        let analyzer = StandardQueryAnalyzer::english();
        let tokens = analyzer.analyze("java and kotlin").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "java");
        assert_eq!(tokens[0].position_increment, 1);
        assert_eq!(tokens[1].text, "kotlin");
        assert_eq!(tokens[1].position_increment, 2);
    }

    #[test]
    fn test_punctuation_only_words_leave_no_gap() {
        let analyzer = StandardQueryAnalyzer::english();
        let tokens = analyzer.analyze("java - kotlin").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].position_increment, 1);
    }

    #[test]
    fn test_empty_text() {
        let analyzer = StandardQueryAnalyzer::english();
        assert!(analyzer.analyze("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("en"), Some(Language::English));
        assert_eq!(parse_language("English"), Some(Language::English));
        assert_eq!(parse_language("fr"), Some(Language::French));
        assert_eq!(parse_language("nl"), Some(Language::Dutch));
        assert_eq!(parse_language("unknown"), None);
    }

    #[test]
    fn test_registry_defaults() {
        let registry = AnalyzerRegistry::new();
        assert!(registry.contains("en"));
        assert!(registry.contains("fr"));
        assert!(registry.contains("nl"));
        assert!(registry.query_analyzer("en").is_some());
        assert!(registry.index_analyzer("en").is_some());
        assert!(registry.query_analyzer("xx").is_none());
    }

    #[test]
    fn test_registry_custom_pair() {
        let registry = AnalyzerRegistry::new();
        registry.register(
            "en-custom",
            Arc::new(StandardQueryAnalyzer::english()),
            Arc::new(StandardQueryAnalyzer::english()),
        );
        assert!(registry.contains("en-custom"));
        let analyzer = registry.query_analyzer("en-custom").unwrap();
        let tokens = analyzer.analyze("developers").unwrap();
        assert_eq!(tokens[0].text, "develop");
    }
}
