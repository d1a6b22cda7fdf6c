//! Leaf compilation: one operator leaf into one primitive index query.

use crate::dsl::{Aggregator, ComparisonOp, FieldCategory, LeafNode, NodeId, Operand};
use crate::error::{Error, Result};
use crate::query::{
    IndexQuery, MatchNoneQuery, PhraseQuery, PositionedTerm, RangeBound, RangeQuery, TermQuery,
};
use crate::tokenizer::{QueryAnalyzer, normalize_query_text};

use super::{BoostAccumulator, CompileMode, WalkContext};

/// Field-name suffix marking 64-bit numeric fields.
///
/// The width of a range query follows this naming convention, not the
/// field's declared category — the category only selects the boost bucket.
const WIDE_RANGE_SUFFIX: &str = "Epoch";

/// Compile one leaf into a primitive query, recording its boost
/// contribution in the accumulator.
///
/// In text-only mode, leaves outside the TEXT category collapse into a
/// zero-boost match-nothing placeholder and contribute no bookkeeping.
pub(super) fn compile_leaf(
    cx: &WalkContext<'_>,
    node_id: NodeId,
    leaf: &LeafNode,
    boosts: &mut BoostAccumulator,
) -> Result<IndexQuery> {
    if cx.mode == CompileMode::TextOnly && leaf.field.category != FieldCategory::Text {
        return Ok(IndexQuery::MatchNone(MatchNoneQuery::new().with_boost(0.0)));
    }

    let parent_aggregator = cx.tree.parent_aggregator(node_id);
    let boost = leaf.field.boost;
    let mut query = match leaf.op {
        ComparisonOp::Equals => {
            if parent_aggregator != Some(Aggregator::Not)
                && leaf.field.category == FieldCategory::Criterion
            {
                boosts.record(leaf.field.category, &leaf.field_name, boost);
            }
            let operand = text_operand(leaf)?;
            IndexQuery::Term(TermQuery::new(&leaf.field_name, operand))
        }
        ComparisonOp::Between => {
            // Only the three range buckets take BETWEEN contributions; a
            // range on a field of any other category is not bookkept.
            if parent_aggregator != Some(Aggregator::Not)
                && matches!(
                    leaf.field.category,
                    FieldCategory::Range1 | FieldCategory::Range2 | FieldCategory::Range3
                )
            {
                boosts.record(leaf.field.category, &leaf.field_name, boost);
            }
            IndexQuery::Range(numeric_range_query(leaf)?)
        }
        ComparisonOp::Contains => {
            let text = normalize_query_text(text_operand(leaf)?);
            let terms = term_positions(cx.analyzer, &text, cx.language_id)?;
            match terms.len() {
                0 => return Err(Error::NoTokens(leaf.field_name.clone())),
                1 => {
                    let term = terms.into_iter().next().map(|t| t.text).unwrap_or_default();
                    IndexQuery::Term(TermQuery::new(&leaf.field_name, term))
                }
                _ => IndexQuery::Phrase(PhraseQuery::new(
                    &leaf.field_name,
                    terms,
                    cx.phrase_slop,
                )),
            }
        }
    };
    // Overwrite whatever default the query type carries with the field's
    // configured weight. Text-only mode only reaches here for TEXT leaves,
    // so their boost is the configured one in both modes.
    query.set_boost(boost);
    Ok(query)
}

fn text_operand(leaf: &LeafNode) -> Result<&str> {
    match &leaf.operand {
        Operand::Text(text) => Ok(text),
        Operand::IntRange { .. } | Operand::LongRange { .. } => Err(Error::MalformedQuery(
            format!("{:?} leaf on {} has a range operand", leaf.op, leaf.field_name),
        )),
    }
}

/// Build the numeric range query, picking the bound width by the field-name
/// heuristic. A 64-bit operand on a narrow field must fit in 32 bits.
fn numeric_range_query(leaf: &LeafNode) -> Result<RangeQuery> {
    let wide = leaf.field_name.ends_with(WIDE_RANGE_SUFFIX);
    let bound = match (&leaf.operand, wide) {
        (Operand::IntRange { min, max }, false) => RangeBound::I32 {
            min: *min,
            max: *max,
        },
        (Operand::IntRange { min, max }, true) => RangeBound::I64 {
            min: i64::from(*min),
            max: i64::from(*max),
        },
        (Operand::LongRange { min, max }, true) => RangeBound::I64 {
            min: *min,
            max: *max,
        },
        (Operand::LongRange { min, max }, false) => RangeBound::I32 {
            min: narrow(*min, &leaf.field_name)?,
            max: narrow(*max, &leaf.field_name)?,
        },
        (Operand::Text(_), _) => {
            return Err(Error::MalformedQuery(format!(
                "BETWEEN leaf on {} has a text operand",
                leaf.field_name
            )));
        }
    };
    Ok(RangeQuery::new(&leaf.field_name, bound))
}

fn narrow(value: i64, field_name: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::RangeOperand {
        field: field_name.to_string(),
        value,
    })
}

/// Assemble absolute term positions from analyzer position increments.
///
/// The running position starts at -1 and each token's increment is added
/// before its position is recorded, so analyzer-introduced gaps (removed
/// stopwords, skipped slots) survive into the phrase query.
fn term_positions(
    analyzer: &dyn QueryAnalyzer,
    text: &str,
    language_id: &str,
) -> Result<Vec<PositionedTerm>> {
    let tokens = analyzer.analyze(text).map_err(|e| {
        log::error!("analyzer failure for language {language_id} on {text:?}: {e}");
        e
    })?;
    let mut terms = Vec::with_capacity(tokens.len());
    let mut position: i64 = -1;
    for token in tokens {
        log::debug!("token: {:?} (+{})", token.text, token.position_increment);
        position += i64::from(token.position_increment);
        // A stream whose first increment is 0 clamps to position 0.
        terms.push(PositionedTerm::new(token.text, position.max(0) as u32));
    }
    Ok(terms)
}
