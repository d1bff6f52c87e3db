//! Entry normalization: raw value/weight properties into an ordered entry list.
//!
//! The `values` property arrives in whatever shape the session file holds:
//! a list, a label-to-value mapping, a lone scalar, or nothing at all. The
//! `weights` property is an optional numeric list that rarely agrees with
//! the value count. [`EntryList::build`] folds both into a single ordered
//! list of [`MenuEntry`] with resolved labels, sanitized weights, and the
//! capped circular geometry every layout reads from.

use crate::value::{display_string, numeric_echo, values_equal, Value};

/// Largest angular span a single entry may occupy, in degrees.
///
/// Capping keeps one heavy weight from swallowing the whole circle; the
/// cumulative placement accumulates capped spans, so an over-weighted
/// circle simply leaves an unused arc instead of overlapping.
pub const MAX_ANGLE_SPAN: f64 = 120.0;

/// The `values` property after shape coercion.
///
/// A mapping keeps its own key enumeration order, which becomes the entry
/// order. Scalars become a one-entry list; `null` and the empty string
/// become an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSpec {
    /// Ordered values, labeled by their own display strings.
    List(Vec<Value>),
    /// Ordered label-to-value pairs; keys become labels unless they are
    /// numeric echoes.
    Map(Vec<(String, Value)>),
}

impl ValueSpec {
    /// Coerce a raw property payload into a value shape.
    pub fn coerce(raw: &Value) -> Self {
        match raw {
            Value::Array(items) => Self::List(items.clone()),
            Value::Object(map) => {
                Self::Map(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            }
            Value::Null => Self::List(Vec::new()),
            Value::String(s) if s.is_empty() => Self::List(Vec::new()),
            scalar => Self::List(vec![scalar.clone()]),
        }
    }

    /// Number of entries this shape will produce.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(pairs) => pairs.len(),
        }
    }

    /// True when no entries will be produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ValueSpec {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// The `weights` property after shape coercion.
///
/// Anything that is not a list means "no weights"; list elements that are
/// not finite non-negative numbers fall back to weight `1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightSpec {
    weights: Option<Vec<f64>>,
}

impl WeightSpec {
    /// Coerce a raw property payload into a weight list.
    pub fn coerce(raw: &Value) -> Self {
        let weights = match raw {
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| sanitize_weight(item.as_f64().unwrap_or(f64::NAN)))
                    .collect(),
            ),
            _ => None,
        };
        Self { weights }
    }

    /// A spec with no weights at all.
    pub const fn none() -> Self {
        Self { weights: None }
    }

    /// The sanitized weight list, if one was given.
    pub fn as_slice(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Weight for entry `index`, padding missing positions with `1`.
    fn weight_at(&self, index: usize) -> f64 {
        match &self.weights {
            Some(list) => list.get(index).copied().unwrap_or(1.0),
            None => 1.0,
        }
    }
}

fn sanitize_weight(w: f64) -> f64 {
    if w.is_finite() && w >= 0.0 {
        w
    } else {
        1.0
    }
}

/// One selectable entry with its resolved label and geometry inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    /// The value submitted when this entry is confirmed.
    pub value: Value,
    /// Resolved label text.
    pub label: String,
    /// Sanitized weight used by every layout.
    pub weight: f64,
    /// Angular span in degrees, already capped. Box layouts ignore it.
    pub angle_span: f64,
    /// Cumulative start angle in degrees, clockwise from the top.
    pub start_angle: f64,
}

/// The normalized, ordered entry list a menu selects from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryList {
    entries: Vec<MenuEntry>,
}

impl EntryList {
    /// Build the entry list from coerced value and weight shapes.
    ///
    /// Weights are truncated or padded with `1` to the value count, spans
    /// are `360 * w / total` capped at [`MAX_ANGLE_SPAN`], and start
    /// angles accumulate the capped spans. A zero weight total leaves
    /// every span at zero.
    pub fn build(values: &ValueSpec, weights: &WeightSpec) -> Self {
        let count = values.len();
        let resolved: Vec<f64> = (0..count).map(|i| weights.weight_at(i)).collect();
        let total: f64 = resolved.iter().sum();

        let mut entries = Vec::with_capacity(count);
        let mut start = 0.0;
        for (index, weight) in resolved.into_iter().enumerate() {
            let (value, label) = match values {
                ValueSpec::List(items) => {
                    let v = items[index].clone();
                    let label = display_string(&v);
                    (v, label)
                }
                ValueSpec::Map(pairs) => {
                    let (key, v) = &pairs[index];
                    let label = if numeric_echo(key) {
                        display_string(v)
                    } else {
                        key.clone()
                    };
                    (v.clone(), label)
                }
            };
            let span = if total > 0.0 {
                (360.0 * weight / total).min(MAX_ANGLE_SPAN)
            } else {
                0.0
            };
            entries.push(MenuEntry {
                value,
                label,
                weight,
                angle_span: span,
                start_angle: start,
            });
            start += span;
        }
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&MenuEntry> {
        self.entries.get(index)
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MenuEntry> {
        self.entries.iter()
    }

    /// Index of the first entry whose value matches `candidate`.
    pub fn position_of(&self, candidate: &Value) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| values_equal(&entry.value, candidate))
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a MenuEntry;
    type IntoIter = std::slice::Iter<'a, MenuEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(raw: Value) -> ValueSpec {
        ValueSpec::coerce(&raw)
    }

    fn spans(entries: &EntryList) -> Vec<f64> {
        entries.iter().map(|e| e.angle_span).collect()
    }

    fn starts(entries: &EntryList) -> Vec<f64> {
        entries.iter().map(|e| e.start_angle).collect()
    }

    #[test]
    fn test_scalar_value_wraps_into_single_entry() {
        let entries = EntryList::build(&list(json!(5)), &WeightSpec::none());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get(0).map(|e| e.label.as_str()), Some("5"));
        assert_eq!(entries.get(0).map(|e| e.angle_span), Some(120.0));
    }

    #[test]
    fn test_null_and_empty_string_yield_no_entries() {
        assert!(EntryList::build(&list(Value::Null), &WeightSpec::none()).is_empty());
        assert!(EntryList::build(&list(json!("")), &WeightSpec::none()).is_empty());
    }

    #[test]
    fn test_uniform_weights_split_evenly() {
        let entries = EntryList::build(&list(json!([1, 2, 3, 4])), &WeightSpec::none());
        assert_eq!(spans(&entries), vec![90.0, 90.0, 90.0, 90.0]);
        assert_eq!(starts(&entries), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_empty_weight_list_pads_to_uniform_thirds() {
        let entries = EntryList::build(&list(json!([1, 2, 3])), &WeightSpec::coerce(&json!([])));
        let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![1.0, 1.0, 1.0]);
        assert_eq!(spans(&entries), vec![120.0, 120.0, 120.0]);
        assert_eq!(starts(&entries), vec![0.0, 120.0, 240.0]);
    }

    #[test]
    fn test_weight_list_truncated_and_padded() {
        // more weights than values: extras ignored
        let weights = WeightSpec::coerce(&json!([1, 1, 1, 9]));
        let entries = EntryList::build(&list(json!([1, 2, 3])), &weights);
        assert_eq!(spans(&entries), vec![120.0, 120.0, 120.0]);

        // fewer weights than values: missing positions weigh 1
        let weights = WeightSpec::coerce(&json!([2.0]));
        let entries = EntryList::build(&list(json!([1, 2, 3])), &weights);
        assert_eq!(entries.get(0).map(|e| e.weight), Some(2.0));
        assert_eq!(entries.get(2).map(|e| e.weight), Some(1.0));
    }

    #[test]
    fn test_heavy_weight_is_capped_and_placement_accumulates_capped_spans() {
        let weights = WeightSpec::coerce(&json!([10, 1, 1]));
        let entries = EntryList::build(&list(json!(["a", "b", "c"])), &weights);
        assert_eq!(spans(&entries), vec![120.0, 30.0, 30.0]);
        assert_eq!(starts(&entries), vec![0.0, 120.0, 150.0]);
    }

    #[test]
    fn test_capped_circle_leaves_unused_arc() {
        // both entries want 180 but are clamped, so [240, 360) stays unused
        let entries = EntryList::build(&list(json!(["x", "y"])), &WeightSpec::none());
        assert_eq!(spans(&entries), vec![120.0, 120.0]);
        assert_eq!(starts(&entries), vec![0.0, 120.0]);
    }

    #[test]
    fn test_zero_total_weight_collapses_spans() {
        let weights = WeightSpec::coerce(&json!([0, 0]));
        let entries = EntryList::build(&list(json!(["a", "b"])), &weights);
        assert_eq!(spans(&entries), vec![0.0, 0.0]);
    }

    #[test]
    fn test_invalid_weights_fall_back_to_one() {
        let weights = WeightSpec::coerce(&json!(["x", -2, null, 3]));
        let entries = EntryList::build(&list(json!([1, 2, 3, 4])), &weights);
        let resolved: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        assert_eq!(resolved, vec![1.0, 1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_non_list_weights_mean_uniform() {
        let entries = EntryList::build(&list(json!([1, 2])), &WeightSpec::coerce(&json!("")));
        assert_eq!(spans(&entries), vec![120.0, 120.0]);
    }

    #[test]
    fn test_map_labels_keep_non_numeric_keys() {
        let entries = EntryList::build(
            &list(json!({"A": 1, "B ": 2, "1x": 3})),
            &WeightSpec::none(),
        );
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B ", "1x"]);
        let values: Vec<&Value> = entries.iter().map(|e| &e.value).collect();
        assert_eq!(values, vec![&json!(1), &json!(2), &json!(3)]);
    }

    #[test]
    fn test_map_numeric_echo_keys_label_with_value() {
        let entries = EntryList::build(
            &list(json!({"01": "a", " 2 ": "b", "3.5": "c"})),
            &WeightSpec::none(),
        );
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_labels_use_display_strings() {
        let entries = EntryList::build(
            &list(json!([1, "two", {"x": 3}])),
            &WeightSpec::none(),
        );
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "two", "{\"x\":3}"]);
    }

    #[test]
    fn test_map_order_is_key_enumeration_order() {
        let entries = EntryList::build(
            &list(json!({"c": 1, "a": 2, "b": 3})),
            &WeightSpec::none(),
        );
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rebuild_is_idempotent_for_identical_inputs() {
        let values = list(json!({"up": [0, 1], "down": [0, -1]}));
        let weights = WeightSpec::coerce(&json!([3, 1]));
        let first = EntryList::build(&values, &weights);
        let second = EntryList::build(&values, &weights);
        assert_eq!(first, second);
    }

    #[test]
    fn test_position_of_matches_structurally() {
        let entries = EntryList::build(
            &list(json!([1, [2, 3], {"k": "v"}])),
            &WeightSpec::none(),
        );
        assert_eq!(entries.position_of(&json!(1.0)), Some(0));
        assert_eq!(entries.position_of(&json!([2, 3])), Some(1));
        assert_eq!(entries.position_of(&json!({"k": "v"})), Some(2));
        assert_eq!(entries.position_of(&json!(99)), None);
    }
}
