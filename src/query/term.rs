//! Term query - matches documents containing a specific term

/// Term query - matches documents containing a specific term in a field.
///
/// The term is matched exactly as given; analysis happens before the query
/// is built.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: String,
    pub term: String,
    pub boost: f32,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            term: term.into(),
            boost: 1.0,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl std::fmt::Display for TermQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_query_display() {
        let q = TermQuery::new("titleText_en", "rust");
        assert_eq!(q.to_string(), "titleText_en:rust");
        assert_eq!(q.boost, 1.0);
    }
}
