use crate::model::{EventRecord, TOTAL_VALUE_POINTER};

/// Sums the ISK value of a batch of killmails. Never fails: a record without
/// a usable value contributes nothing.
#[derive(Debug, Clone)]
pub struct ValueAggregator {
    pub pointer: String,
}

impl Default for ValueAggregator {
    fn default() -> Self {
        Self {
            pointer: TOTAL_VALUE_POINTER.to_string(),
        }
    }
}

impl ValueAggregator {
    pub fn with_pointer(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
        }
    }

    /// Fractional ISK is summed as-is and the final total truncated.
    pub fn aggregate(&self, records: &[EventRecord]) -> u64 {
        let sum: f64 = records
            .iter()
            .map(|r| r.numeric_or(&self.pointer, 0.0))
            .sum();
        // `as` saturates out-of-range floats
        sum as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> EventRecord {
        EventRecord::new(v)
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(ValueAggregator::default().aggregate(&[]), 0);
    }

    #[test]
    fn records_without_values_are_zero() {
        let records = vec![
            rec(json!({})),
            rec(json!({"zkb": null})),
            rec(json!({"zkb": {}})),
            rec(json!({"zkb": {"totalValue": null}})),
            rec(json!(null)),
        ];
        assert_eq!(ValueAggregator::default().aggregate(&records), 0);
    }

    #[test]
    fn mixed_records_sum_present_values() {
        let records = vec![
            rec(json!({"zkb": {"totalValue": 1_500_000.75}})),
            rec(json!({"killmail_id": 2})),
            rec(json!({"zkb": {"totalValue": 250_000_000}})),
            rec(json!({"zkb": {"totalValue": 0.5}})),
        ];
        assert_eq!(ValueAggregator::default().aggregate(&records), 251_500_001);
    }

    #[test]
    fn duplicates_are_counted_twice() {
        let r = rec(json!({"killmail_id": 1, "zkb": {"totalValue": 10}}));
        let records = vec![r.clone(), r];
        assert_eq!(ValueAggregator::default().aggregate(&records), 20);
    }

    #[test]
    fn custom_pointer() {
        let records = vec![rec(json!({"zkb": {"droppedValue": 7}}))];
        assert_eq!(
            ValueAggregator::with_pointer("/zkb/droppedValue").aggregate(&records),
            7
        );
    }
}
