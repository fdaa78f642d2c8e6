use std::ops::Add;
use strum::Display;
use tracing::warn;

/// How a single field of a report record combines when two records are merged.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum MergeRule {
    /// Absent values count as zero; absent only if both are absent.
    Sum,
    Max,
    /// Last writer wins.
    Replace,
    /// Lists are appended in merge order with no deduplication.
    Concat,
    /// Target value is kept; only filled from the source when absent.
    Retain,
    /// Delegated to the child record's own merge.
    Nested,
    /// Recomputed from other fields, never merged directly.
    Derived,
}

/// The merge rule of every serialized field of a record.
pub trait MergeRules {
    const RULES: &'static [(&'static str, MergeRule)];

    fn rule_for(field: &str) -> Option<MergeRule> {
        Self::RULES
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| *rule)
    }
}

/// Records whose merge cannot fail.
pub trait Merge: MergeRules {
    fn merge(&mut self, other: &Self);
}

pub fn sum_into<T: Add<Output = T> + Copy>(target: &mut Option<T>, source: Option<T>) {
    *target = match (*target, source) {
        (Some(existing), Some(new)) => Some(existing + new),
        (existing, new) => existing.or(new),
    };
}

/// Like [`sum_into`] for counts, saturating at `u64::MAX` instead of overflowing.
pub fn sum_counts_into(target: &mut Option<u64>, source: Option<u64>) {
    *target = match (*target, source) {
        (Some(existing), Some(new)) => Some(existing.checked_add(new).unwrap_or_else(|| {
            warn!("count {existing} + {new} overflows, keeping {}", u64::MAX);
            u64::MAX
        })),
        (existing, new) => existing.or(new),
    };
}

pub fn max_into<T: PartialOrd + Copy>(target: &mut Option<T>, source: Option<T>) {
    *target = match (*target, source) {
        (Some(existing), Some(new)) => Some(max_of_2(existing, new)),
        (existing, new) => existing.or(new),
    };
}

pub fn retain_into<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if target.is_none() {
        target.clone_from(source);
    }
}

pub fn concat_into<T: Clone>(target: &mut Vec<T>, source: &[T]) {
    target.extend_from_slice(source);
}

pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use serde::Serialize;
    use serde_json::Value;

    /// Asserts that every key of the serialized record has a rule, and every rule names a key.
    pub(crate) fn assert_rules_cover<T: MergeRules + Serialize>(record: &T) {
        let value = serde_json::to_value(record).unwrap();
        let object = value.as_object().unwrap();
        for key in object.keys() {
            assert!(
                T::rule_for(key).is_some(),
                "no merge rule for serialized field {key}"
            );
        }
        for (name, _) in T::RULES {
            assert!(
                object.contains_key(*name),
                "rule for {name} names a field that the fully populated record did not serialize"
            );
        }
    }

    /// Merges the record with a copy of itself and checks the doubling invariant per field.
    pub(crate) fn assert_self_merge_doubles<T: Merge + Clone + Serialize>(record: &T) {
        let before = serde_json::to_value(record).unwrap();
        let mut merged = record.clone();
        merged.merge(record);
        let after = serde_json::to_value(&merged).unwrap();

        for (key, rule) in T::RULES {
            let (old, new) = (&before[*key], &after[*key]);
            match rule {
                MergeRule::Sum => assert_all_numbers_doubled(key, old, new),
                MergeRule::Max | MergeRule::Retain | MergeRule::Replace => {
                    assert_eq!(old, new, "field {key} should be unchanged")
                }
                MergeRule::Concat => assert_eq!(
                    old.as_array().map(Vec::len).unwrap_or_default() * 2,
                    new.as_array().map(Vec::len).unwrap_or_default(),
                    "list {key} should double in length"
                ),
                MergeRule::Nested | MergeRule::Derived => {}
            }
        }
    }

    fn assert_all_numbers_doubled(key: &str, old: &Value, new: &Value) {
        match (old, new) {
            (Value::Number(a), Value::Number(b)) => {
                approx::assert_relative_eq!(a.as_f64().unwrap() * 2., b.as_f64().unwrap())
            }
            (Value::Object(a), Value::Object(b)) => {
                for (inner, value) in a {
                    assert_all_numbers_doubled(key, value, &b[inner]);
                }
            }
            (Value::Null, Value::Null) => {}
            _ => panic!("field {key} changed shape when merged: {old} -> {new}"),
        }
    }
}
