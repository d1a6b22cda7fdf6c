//! Per-field boost bookkeeping collected during compilation.

use rustc_hash::FxHashMap;

use crate::dsl::FieldCategory;

/// Boost lists per field category, keyed by suffixed field name.
///
/// Populated as a side effect of leaf compilation and handed to the
/// downstream score-normalization stage. Each list holds the boosts of the
/// leaves of that category in depth-first encounter order. Created fresh per
/// compilation call; never shared across calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoostAccumulator {
    criterion: FxHashMap<String, Vec<f32>>,
    range1: FxHashMap<String, Vec<f32>>,
    range2: FxHashMap<String, Vec<f32>>,
    range3: FxHashMap<String, Vec<f32>>,
}

impl BoostAccumulator {
    fn bucket_mut(&mut self, category: FieldCategory) -> Option<&mut FxHashMap<String, Vec<f32>>> {
        match category {
            FieldCategory::Text => None,
            FieldCategory::Criterion => Some(&mut self.criterion),
            FieldCategory::Range1 => Some(&mut self.range1),
            FieldCategory::Range2 => Some(&mut self.range2),
            FieldCategory::Range3 => Some(&mut self.range3),
        }
    }

    /// Append a boost to the category's list for the field. Text has no
    /// bucket; recording it is a no-op.
    pub(crate) fn record(&mut self, category: FieldCategory, field_name: &str, boost: f32) {
        if let Some(bucket) = self.bucket_mut(category) {
            bucket.entry(field_name.to_string()).or_default().push(boost);
        }
    }

    pub fn criterion(&self) -> &FxHashMap<String, Vec<f32>> {
        &self.criterion
    }

    pub fn range1(&self) -> &FxHashMap<String, Vec<f32>> {
        &self.range1
    }

    pub fn range2(&self) -> &FxHashMap<String, Vec<f32>> {
        &self.range2
    }

    pub fn range3(&self) -> &FxHashMap<String, Vec<f32>> {
        &self.range3
    }

    pub fn is_empty(&self) -> bool {
        self.criterion.is_empty()
            && self.range1.is_empty()
            && self.range2.is_empty()
            && self.range3.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order_per_key() {
        let mut acc = BoostAccumulator::default();
        acc.record(FieldCategory::Criterion, "regionCriterion_en", 1.5);
        acc.record(FieldCategory::Criterion, "regionCriterion_en", 3.0);
        acc.record(FieldCategory::Range2, "salaryRange", 2.0);

        assert_eq!(
            acc.criterion().get("regionCriterion_en"),
            Some(&vec![1.5, 3.0])
        );
        assert_eq!(acc.range2().get("salaryRange"), Some(&vec![2.0]));
        assert!(acc.range1().is_empty());
        assert!(acc.range3().is_empty());
    }

    #[test]
    fn test_text_records_nothing() {
        let mut acc = BoostAccumulator::default();
        acc.record(FieldCategory::Text, "titleText_en", 2.0);
        assert!(acc.is_empty());
    }
}
