//! Sibyl - compiles user-facing boolean search queries for a full-text index
//!
//! A search request arrives as a tree of AND/OR/OPTIONAL/NOT aggregators
//! over EQUALS/BETWEEN/CONTAINS leaves. This library provides:
//! - A builder-validated AST arena with parent back-references
//! - Recursive compilation into an executable boolean query, with catch-all
//!   sentinels keeping OPTIONAL and NOT groups matchable
//! - A text-only compilation mode that suppresses non-text criteria
//! - Per-field-category boost accounting for downstream score normalization
//! - Query-time analyzers (stemming, stopword gaps, diacritic folding) kept
//!   per language in a registry
//!
//! The index engine itself — storage, scoring, execution — is the caller's;
//! sibyl only produces the query tree it will run.

pub mod compile;
pub mod dsl;
pub mod error;
pub mod query;
pub mod tokenizer;

// Re-exports from compile
pub use compile::{BoostAccumulator, CompileParams, CompiledQuery, QueryCompiler};

// Re-exports from dsl
pub use dsl::{
    Aggregator, ComparisonOp, FieldCategory, FieldSpec, LeafNode, NodeId, NodeKind, Operand,
    QueryTree, QueryTreeBuilder,
};

// Re-exports from query
pub use query::{
    BooleanClause, BooleanQuery, IndexQuery, MatchAllQuery, MatchNoneQuery, Occur, PhraseQuery,
    PositionedTerm, RangeBound, RangeQuery, TermQuery,
};

// Re-exports from tokenizer
pub use tokenizer::{
    AnalyzerRegistry, Language, QueryAnalyzer, QueryToken, StandardQueryAnalyzer, normalize_query_text,
    parse_language,
};

pub use error::{Error, Result};
