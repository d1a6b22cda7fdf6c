//! Compilation of a [`QueryTree`] into an executable boolean index query.
//!
//! The walker descends the AST depth-first. Aggregator policy decides the
//! occurrence kind of each group's clauses and whether the group needs a
//! catch-all sentinel:
//!
//! - AND: children attach as MUST.
//! - OR: children attach as SHOULD.
//! - OPTIONAL: a zero-boost match-all SHOULD sentinel first, then children
//!   as SHOULD — the group can match even when no optional clause does.
//! - NOT: a default-boost match-all SHOULD sentinel first, then children as
//!   MUST_NOT. A group of only excluded clauses matches nothing; the
//!   sentinel turns "only exclusions" into "everything except the
//!   exclusions", at the cost of a full scan for that clause.
//!
//! A bare leaf at the root attaches as a single MUST clause. NOT at the
//! root gets no special case: it compiles exactly like a nested NOT.
//!
//! Two modes share the walk: full compilation, and a text-only variant that
//! collapses every non-TEXT leaf into a match-nothing placeholder so the
//! caller can compose a text-relevance-only sub-query without re-walking
//! the AST.

mod boost;
mod leaf;

pub use boost::BoostAccumulator;

use serde::{Deserialize, Serialize};

use crate::dsl::{Aggregator, NodeId, NodeKind, QueryTree};
use crate::error::{Error, Result};
use crate::query::{BooleanQuery, IndexQuery, MatchAllQuery, Occur};
use crate::tokenizer::{AnalyzerRegistry, QueryAnalyzer};

use leaf::compile_leaf;

/// Per-request compilation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileParams {
    /// Index language id; selects the query-time analyzer variant.
    pub language_id: String,
    /// Maximum term displacement allowed in compiled phrase queries.
    pub phrase_slop: u32,
}

impl CompileParams {
    pub fn new(language_id: impl Into<String>, phrase_slop: u32) -> Self {
        Self {
            language_id: language_id.into(),
            phrase_slop,
        }
    }
}

/// Result of one compilation: the boolean query for the whole AST plus the
/// boost bookkeeping collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub query: BooleanQuery,
    pub boosts: BoostAccumulator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompileMode {
    Full,
    TextOnly,
}

pub(crate) struct WalkContext<'a> {
    pub(crate) tree: &'a QueryTree,
    pub(crate) analyzer: &'a dyn QueryAnalyzer,
    pub(crate) language_id: &'a str,
    pub(crate) phrase_slop: u32,
    pub(crate) mode: CompileMode,
}

fn aggregator_occur(aggregator: Aggregator) -> Occur {
    match aggregator {
        Aggregator::And => Occur::Must,
        Aggregator::Or => Occur::Should,
        Aggregator::Optional => Occur::Should,
        Aggregator::Not => Occur::MustNot,
    }
}

/// Compiles query trees against a registry of per-language analyzers.
///
/// Holds no per-call state: each compilation builds its own accumulator and
/// returns it, so one compiler can serve concurrent callers.
#[derive(Clone)]
pub struct QueryCompiler {
    analyzers: AnalyzerRegistry,
}

impl QueryCompiler {
    pub fn new(analyzers: AnalyzerRegistry) -> Self {
        Self { analyzers }
    }

    /// Full compilation: every leaf becomes its real primitive query.
    pub fn compile(&self, tree: &QueryTree, params: &CompileParams) -> Result<CompiledQuery> {
        self.run(tree, params, CompileMode::Full)
    }

    /// Text-only compilation: non-TEXT leaves become zero-boost
    /// match-nothing placeholders; TEXT leaves compile as in full mode.
    pub fn compile_text_only(
        &self,
        tree: &QueryTree,
        params: &CompileParams,
    ) -> Result<CompiledQuery> {
        self.run(tree, params, CompileMode::TextOnly)
    }

    fn run(&self, tree: &QueryTree, params: &CompileParams, mode: CompileMode) -> Result<CompiledQuery> {
        let analyzer = self
            .analyzers
            .query_analyzer(&params.language_id)
            .ok_or_else(|| Error::UnknownLanguage(params.language_id.clone()))?;
        let cx = WalkContext {
            tree,
            analyzer: &*analyzer,
            language_id: &params.language_id,
            phrase_slop: params.phrase_slop,
            mode,
        };
        let mut query = BooleanQuery::new();
        let mut boosts = BoostAccumulator::default();
        walk(&cx, tree.root(), &mut query, &mut boosts)?;
        Ok(CompiledQuery { query, boosts })
    }
}

/// Recursive tree walk, attaching the node's clauses to `parent`.
fn walk(
    cx: &WalkContext<'_>,
    node_id: NodeId,
    parent: &mut BooleanQuery,
    boosts: &mut BoostAccumulator,
) -> Result<()> {
    match cx.tree.kind(node_id) {
        // Bare leaf at this recursion level — only the root can be one.
        NodeKind::Leaf(node) => {
            let query = compile_leaf(cx, node_id, node, boosts)?;
            parent.add(query, Occur::Must);
        }
        NodeKind::Aggregate {
            aggregator,
            children,
        } => {
            match aggregator {
                Aggregator::Optional => {
                    // Artificial zero-contribution sibling so the group can
                    // match even if no real optional clause does.
                    parent.add(
                        IndexQuery::MatchAll(MatchAllQuery::new().with_boost(0.0)),
                        Occur::Should,
                    );
                }
                Aggregator::Not => {
                    // Default boost: the group needs at least one positively
                    // matching clause next to the exclusions.
                    parent.add(IndexQuery::MatchAll(MatchAllQuery::new()), Occur::Should);
                }
                Aggregator::And | Aggregator::Or => {}
            }
            let occur = aggregator_occur(*aggregator);
            for &child in children {
                match cx.tree.kind(child) {
                    NodeKind::Leaf(node) => {
                        let query = compile_leaf(cx, child, node, boosts)?;
                        parent.add(query, occur);
                    }
                    NodeKind::Aggregate { .. } => {
                        let mut nested = BooleanQuery::new();
                        walk(cx, child, &mut nested, boosts)?;
                        parent.add(IndexQuery::Boolean(Box::new(nested)), occur);
                    }
                }
            }
        }
    }
    Ok(())
}
