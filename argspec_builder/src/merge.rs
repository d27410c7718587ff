use serde_json::{Map, Value};

/// How a source value combines with the value already held under its key.
/// Chosen from the shape of the source value alone.
#[derive(Debug, PartialEq)]
enum Strategy {
    /// Arrays combine as a set union, in first-seen order.
    Union(Vec<Value>),
    /// Non-null objects merge key by key.
    Recurse(Map<String, Value>),
    /// Scalars and `null` overwrite.
    Replace(Value),
}

impl From<Value> for Strategy {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Strategy::Union(items),
            Value::Object(map) => Strategy::Recurse(map),
            other => Strategy::Replace(other),
        }
    }
}

/// Merge the partial object `source` into `target`.
///
/// For each key of `source`:
/// * An array is unioned with the array held at that key (an absent or non-array value counts as empty).
/// Duplicates are removed, keeping the first occurrence.
/// * A non-null object is merged recursively into the object held at that key (an absent or non-object value is replaced by `{}` first).
/// * Anything else replaces the value held at that key.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::merge;
/// use serde_json::json;
///
/// let mut target = json!({"tags": ["a", "b"], "nested": {"x": 1}, "n": 1});
/// let source = json!({"tags": ["b", "c"], "nested": {"y": 2}, "n": 2});
/// merge(
///     target.as_object_mut().unwrap(),
///     source.as_object().unwrap().clone(),
/// );
///
/// assert_eq!(
///     target,
///     json!({"tags": ["a", "b", "c"], "nested": {"x": 1, "y": 2}, "n": 2})
/// );
/// ```
pub fn merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match Strategy::from(value) {
            Strategy::Union(items) => {
                let slot = target.entry(key).or_insert_with(|| Value::Array(Vec::new()));

                if !slot.is_array() {
                    *slot = Value::Array(Vec::new());
                }

                if let Value::Array(existing) = slot {
                    let current = std::mem::take(existing);
                    *existing = union(current, items);
                }
            }
            Strategy::Recurse(map) => {
                let slot = target
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));

                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }

                if let Value::Object(existing) = slot {
                    merge(existing, map);
                }
            }
            Strategy::Replace(value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Merge each of `sources` into `target`, in order.
pub fn merge_all(
    target: &mut Map<String, Value>,
    sources: impl IntoIterator<Item = Map<String, Value>>,
) {
    for source in sources {
        merge(target, source);
    }
}

fn union(current: Vec<Value>, items: Vec<Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(current.len() + items.len());

    for item in current.into_iter().chain(items) {
        if !out.contains(&item) {
            out.push(item);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test value must be an object"),
        }
    }

    fn merged(sources: Vec<Value>) -> Value {
        let mut target = Map::new();
        merge_all(&mut target, sources.into_iter().map(object));
        Value::Object(target)
    }

    #[rstest]
    #[case(json!(["a"]), Strategy::Union(vec![json!("a")]))]
    #[case(json!({"a": 1}), Strategy::Recurse(object(json!({"a": 1}))))]
    #[case(json!(null), Strategy::Replace(json!(null)))]
    #[case(json!(1), Strategy::Replace(json!(1)))]
    #[case(json!("a"), Strategy::Replace(json!("a")))]
    #[case(json!(true), Strategy::Replace(json!(true)))]
    fn strategy(#[case] value: Value, #[case] expected: Strategy) {
        assert_eq!(Strategy::from(value), expected);
    }

    #[test]
    fn merge_empty() {
        assert_eq!(merged(vec![]), json!({}));
        assert_eq!(merged(vec![json!({})]), json!({}));
    }

    #[rstest]
    #[case(vec![json!({"x": 1}), json!({"x": 2})], json!({"x": 2}))]
    #[case(vec![json!({"x": "a"}), json!({"x": null})], json!({"x": null}))]
    #[case(vec![json!({"x": {"a": 1}}), json!({"x": 2})], json!({"x": 2}))]
    #[case(vec![json!({"x": [1]}), json!({"x": false})], json!({"x": false}))]
    fn merge_scalar_last_write_wins(#[case] sources: Vec<Value>, #[case] expected: Value) {
        assert_eq!(merged(sources), expected);
    }

    #[rstest]
    #[case(vec![json!({"x": ["a", "b"]}), json!({"x": ["b", "c"]})], json!({"x": ["a", "b", "c"]}))]
    #[case(vec![json!({"x": ["a", "a"]})], json!({"x": ["a"]}))]
    #[case(vec![json!({"x": ["b"]}), json!({"x": ["a", "b"]})], json!({"x": ["b", "a"]}))]
    #[case(vec![json!({"x": [1, "1"]}), json!({"x": [1]})], json!({"x": [1, "1"]}))]
    #[case(vec![json!({"x": [{"a": 1}]}), json!({"x": [{"a": 1}, {"a": 2}]})], json!({"x": [{"a": 1}, {"a": 2}]}))]
    #[case(vec![json!({"x": 3}), json!({"x": ["a"]})], json!({"x": ["a"]}))]
    #[case(vec![json!({"x": []}), json!({"x": []})], json!({"x": []}))]
    fn merge_array_union(#[case] sources: Vec<Value>, #[case] expected: Value) {
        assert_eq!(merged(sources), expected);
    }

    #[test]
    fn merge_array_idempotent() {
        let source = json!({"x": ["a", "b"]});
        assert_eq!(
            merged(vec![source.clone(), source.clone(), source]),
            json!({"x": ["a", "b"]})
        );
    }

    #[rstest]
    #[case(vec![json!({"x": {"a": 1}}), json!({"x": {"b": 2}})], json!({"x": {"a": 1, "b": 2}}))]
    #[case(vec![json!({"x": {"a": 1}}), json!({"x": {"a": 2}})], json!({"x": {"a": 2}}))]
    #[case(vec![json!({"x": 1}), json!({"x": {"a": 1}})], json!({"x": {"a": 1}}))]
    #[case(vec![json!({"x": {"a": {"b": [1]}}}), json!({"x": {"a": {"b": [2], "c": 3}}})], json!({"x": {"a": {"b": [1, 2], "c": 3}}}))]
    #[case(vec![json!({"x": {}})], json!({"x": {}}))]
    fn merge_object_recursive(#[case] sources: Vec<Value>, #[case] expected: Value) {
        assert_eq!(merged(sources), expected);
    }

    #[test]
    fn merge_disjoint_any_order() {
        for _ in 0..100 {
            let mut rng = thread_rng();
            let partials: Vec<Value> = (0..3)
                .map(|i| {
                    let mut partial = Map::new();
                    for j in 0..rng.gen_range(0..4) {
                        let value = match rng.gen_range(0..3) {
                            0 => json!(rng.gen::<u32>()),
                            1 => json!([rng.gen::<u8>(), rng.gen::<u8>()]),
                            _ => json!({"inner": rng.gen::<bool>()}),
                        };
                        partial.insert(format!("key_{i}_{j}"), value);
                    }
                    Value::Object(partial)
                })
                .collect();
            let (p1, p2, p3) = (
                partials[0].clone(),
                partials[1].clone(),
                partials[2].clone(),
            );

            let expected = merged(vec![p1.clone(), p2.clone(), p3.clone()]);
            assert_eq!(merged(vec![p3.clone(), p1.clone(), p2.clone()]), expected);
            assert_eq!(merged(vec![p2.clone(), p3.clone(), p1.clone()]), expected);
            assert_eq!(merged(vec![p3, p2, p1]), expected);
        }
    }
}
