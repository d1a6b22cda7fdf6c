//! Numeric range query with inclusive bounds

/// Inclusive numeric bounds, in the width the physical field is indexed with.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBound {
    I32 { min: i32, max: i32 },
    I64 { min: i64, max: i64 },
}

/// Numeric range query - matches documents whose field value falls within
/// `[min, max]`, both bounds inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub field: String,
    pub bound: RangeBound,
    pub boost: f32,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>, bound: RangeBound) -> Self {
        Self {
            field: field.into(),
            bound,
            boost: 1.0,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl std::fmt::Display for RangeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.bound {
            RangeBound::I32 { min, max } => {
                write!(f, "{}:[{} TO {}]", self.field, min, max)
            }
            RangeBound::I64 { min, max } => {
                write!(f, "{}:[{} TO {}]", self.field, min, max)
            }
        }
    }
}
