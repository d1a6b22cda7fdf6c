//! Phrase query - matches terms at explicit positions within slop

/// A phrase term pinned to an absolute position in the analyzed stream.
///
/// Positions are absolute, not sequential: analyzer-introduced gaps (e.g.
/// removed stopwords) show up as holes in the position sequence and must be
/// preserved for the match to behave like the indexed text.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTerm {
    pub text: String,
    pub position: u32,
}

impl PositionedTerm {
    pub fn new(text: impl Into<String>, position: u32) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Phrase query - matches documents containing the terms at their relative
/// positions, allowing up to `slop` positions of displacement.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseQuery {
    pub field: String,
    pub terms: Vec<PositionedTerm>,
    pub slop: u32,
    pub boost: f32,
}

impl PhraseQuery {
    pub fn new(field: impl Into<String>, terms: Vec<PositionedTerm>, slop: u32) -> Self {
        Self {
            field: field.into(),
            terms,
            slop,
            boost: 1.0,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl std::fmt::Display for PhraseQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:\"", self.field)?;
        let mut first = true;
        for term in &self.terms {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}@{}", term.text, term.position)?;
            first = false;
        }
        write!(f, "\"~{}", self.slop)
    }
}
