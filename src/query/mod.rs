//! Index query primitives produced by compilation.
//!
//! These are the executable building blocks the surrounding search service
//! hands to its index engine: term, phrase, range, match-all, match-none,
//! and boolean combinations. Every query carries a relevance boost that
//! compilation overwrites with the field's configured weight.

mod boolean;
mod phrase;
mod range;
mod term;

pub use boolean::*;
pub use phrase::*;
pub use range::*;
pub use term::*;

/// How a clause affects whether a boolean group matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// Clause must match (REQUIRED).
    Must,
    /// Clause may match (ANY).
    Should,
    /// Clause must not match (EXCLUDED).
    MustNot,
}

/// Match-everything query. Used as the catch-all sentinel for OPTIONAL and
/// NOT groups; its default boost of 1.0 is what the NOT sentinel relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchAllQuery {
    pub boost: f32,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self { boost: 1.0 }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchAllQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "*:*")
    }
}

/// Match-nothing query. Stands in for suppressed leaves in text-only
/// compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchNoneQuery {
    pub boost: f32,
}

impl MatchNoneQuery {
    pub fn new() -> Self {
        Self { boost: 1.0 }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl Default for MatchNoneQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchNoneQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<none>")
    }
}

/// Any compiled index query.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexQuery {
    Term(TermQuery),
    Phrase(PhraseQuery),
    Range(RangeQuery),
    MatchAll(MatchAllQuery),
    MatchNone(MatchNoneQuery),
    Boolean(Box<BooleanQuery>),
}

impl IndexQuery {
    pub fn boost(&self) -> f32 {
        match self {
            IndexQuery::Term(q) => q.boost,
            IndexQuery::Phrase(q) => q.boost,
            IndexQuery::Range(q) => q.boost,
            IndexQuery::MatchAll(q) => q.boost,
            IndexQuery::MatchNone(q) => q.boost,
            IndexQuery::Boolean(q) => q.boost,
        }
    }

    pub fn set_boost(&mut self, boost: f32) {
        match self {
            IndexQuery::Term(q) => q.boost = boost,
            IndexQuery::Phrase(q) => q.boost = boost,
            IndexQuery::Range(q) => q.boost = boost,
            IndexQuery::MatchAll(q) => q.boost = boost,
            IndexQuery::MatchNone(q) => q.boost = boost,
            IndexQuery::Boolean(q) => q.boost = boost,
        }
    }
}

impl std::fmt::Display for IndexQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexQuery::Term(q) => q.fmt(f),
            IndexQuery::Phrase(q) => q.fmt(f),
            IndexQuery::Range(q) => q.fmt(f),
            IndexQuery::MatchAll(q) => q.fmt(f),
            IndexQuery::MatchNone(q) => q.fmt(f),
            IndexQuery::Boolean(q) => q.fmt(f),
        }
    }
}
