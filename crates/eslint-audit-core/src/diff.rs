//! Two-way diff utilities consumed by drift reporting.

use std::collections::BTreeMap;

/// Symmetric difference of two lists, preserving input order.
///
/// Returns `(only_in_a, only_in_b)`.
#[must_use]
pub fn array_diff<T: PartialEq + Clone>(a: &[T], b: &[T]) -> (Vec<T>, Vec<T>) {
    let only_in_a = a.iter().filter(|x| !b.contains(x)).cloned().collect();
    let only_in_b = b.iter().filter(|x| !a.contains(x)).cloned().collect();
    (only_in_a, only_in_b)
}

/// Per-key differences between two maps.
///
/// Restricted to keys present in both inputs whose values differ; the
/// value pair is `(a_value, b_value)`.
#[must_use]
pub fn object_diff<K, V>(a: &BTreeMap<K, V>, b: &BTreeMap<K, V>) -> BTreeMap<K, (V, V)>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    a.iter()
        .filter_map(|(key, a_value)| {
            b.get(key).and_then(|b_value| {
                (a_value != b_value)
                    .then(|| (key.clone(), (a_value.clone(), b_value.clone())))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_diff_splits_exclusives() {
        let a = vec!["foo-rule", "bar-rule", "baz-rule"];
        let b = vec!["bar-rule", "qux-rule"];

        let (only_a, only_b) = array_diff(&a, &b);
        assert_eq!(only_a, ["foo-rule", "baz-rule"]);
        assert_eq!(only_b, ["qux-rule"]);
    }

    #[test]
    fn array_diff_of_equal_lists_is_empty() {
        let a = vec![1, 2, 3];
        let (only_a, only_b) = array_diff(&a, &a);
        assert!(only_a.is_empty());
        assert!(only_b.is_empty());
    }

    #[test]
    fn object_diff_reports_changed_shared_keys_only() {
        let a: BTreeMap<&str, i32> = [("shared", 1), ("changed", 1), ("only-a", 1)].into();
        let b: BTreeMap<&str, i32> = [("shared", 1), ("changed", 2), ("only-b", 1)].into();

        let diff = object_diff(&a, &b);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("changed"), Some(&(1, 2)));
    }

    #[test]
    fn object_diff_of_disjoint_maps_is_empty() {
        let a: BTreeMap<&str, i32> = [("x", 1)].into();
        let b: BTreeMap<&str, i32> = [("y", 1)].into();
        assert!(object_diff(&a, &b).is_empty());
    }
}
