//! Small stateless helpers shared by the parser and the tempo estimation.

use std::{collections::HashMap, hash::Hash};

use itertools::Itertools;

/// Counts how many times each value occurs.
#[must_use]
pub fn freq_rank<T, I>(values: I) -> HashMap<T, usize>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    values.into_iter().counts()
}

/// Picks the value occurring most often. Ties are broken by the smallest value.
///
/// Returns `None` only if `values` is empty.
pub fn pick_most_frequent<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Ord,
    I: IntoIterator<Item = T>,
{
    freq_rank(values)
        .into_iter()
        .min_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)))
        .map(|(value, _)| value)
}

/// Flattens nested collections into one vector, keeping the order.
#[must_use]
pub fn flatten<T, I>(nested: I) -> Vec<T>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = T>,
{
    nested.into_iter().flatten().collect()
}

/// Differences between each consecutive pair of `values`.
///
/// `values` is expected to be increasing, so the differences are non-negative.
#[must_use]
pub fn distance_of_increasing_values(values: &[i64]) -> Vec<i64> {
    values
        .iter()
        .tuple_windows()
        .map(|(prev, next)| next - prev)
        .collect()
}

/// Splits sorted `points` into clusters where neighbours are at most `eps` apart.
///
/// The input does not need to be sorted; it is sorted before clustering.
#[must_use]
pub fn linear_clusterization(points: &[i64], eps: i64) -> Vec<Vec<i64>> {
    let mut clusters: Vec<Vec<i64>> = Vec::new();
    for point in points.iter().copied().sorted_unstable() {
        match clusters.last_mut() {
            Some(cluster) if cluster.last().is_some_and(|&last| point <= last + eps) => {
                cluster.push(point);
            }
            _ => clusters.push(vec![point]),
        }
    }
    clusters
}

/// Returns the first of the longest lists, or an empty list.
#[must_use]
pub fn pick_the_largest_sublist<T: Clone>(lists: &[Vec<T>]) -> Vec<T> {
    let Some(longest) = lists.iter().map(Vec::len).max() else {
        return Vec::new();
    };
    lists
        .iter()
        .find(|list| list.len() == longest)
        .cloned()
        .unwrap_or_default()
}

/// Arithmetic mean, `None` on an empty slice.
#[must_use]
pub fn avg(values: &[i64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<i64>() as f64 / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_frequent_prefers_smaller_on_tie() {
        assert_eq!(pick_most_frequent(["b", "a", "b", "a", "c"]), Some("a"));
        assert_eq!(pick_most_frequent([3, 3, 1]), Some(3));
        assert_eq!(pick_most_frequent(Vec::<u8>::new()), None);
    }

    #[test]
    fn distances() {
        assert_eq!(distance_of_increasing_values(&[0, 250, 500, 1000]), vec![250, 250, 500]);
        assert!(distance_of_increasing_values(&[7]).is_empty());
    }

    #[test]
    fn clusters_split_on_gaps_larger_than_eps() {
        let clusters = linear_clusterization(&[250, 100, 252, 104, 255, 400], 5);
        assert_eq!(clusters, vec![vec![100, 104], vec![250, 252, 255], vec![400]]);
        assert!(linear_clusterization(&[], 5).is_empty());
    }

    #[test]
    fn largest_sublist_takes_first_of_ties() {
        let lists = vec![vec![1], vec![2, 3], vec![4, 5]];
        assert_eq!(pick_the_largest_sublist(&lists), vec![2, 3]);
        assert!(pick_the_largest_sublist::<i64>(&[]).is_empty());
    }

    #[test]
    fn average() {
        assert_eq!(avg(&[250, 252, 254]), Some(252.0));
        assert_eq!(avg(&[]), None);
    }

    #[test]
    fn flatten_keeps_order() {
        assert_eq!(flatten(vec![vec![1, 2], vec![], vec![3]]), vec![1, 2, 3]);
    }
}
