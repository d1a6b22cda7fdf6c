//! Boolean query with MUST, SHOULD, and MUST_NOT clauses

use super::{IndexQuery, Occur};

/// One clause of a boolean query: a sub-query plus its occurrence kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanClause {
    pub occur: Occur,
    pub query: IndexQuery,
}

/// Boolean query over an ordered clause list.
///
/// Clause order is preserved exactly as compilation emitted it: a group's
/// catch-all sentinel, when present, is always the first clause.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
    pub boost: f32,
}

impl Default for BooleanQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl BooleanQuery {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            boost: 1.0,
        }
    }

    pub fn add(&mut self, query: IndexQuery, occur: Occur) {
        self.clauses.push(BooleanClause { occur, query });
    }

    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl std::fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Boolean(")?;
        let mut first = true;
        for clause in &self.clauses {
            if !first {
                write!(f, " ")?;
            }
            match clause.occur {
                Occur::Must => write!(f, "+{}", clause.query)?,
                Occur::Should => write!(f, "{}", clause.query)?,
                Occur::MustNot => write!(f, "-{}", clause.query)?,
            }
            first = false;
        }
        write!(f, ")")
    }
}
