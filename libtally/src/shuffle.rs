use std::collections::BTreeMap;

use partition::Partition;

/// `group_by_key` merges the partitions of a stage and groups their values by key.
///
/// Groups come back in ascending key order. The values of a group are ordered partition by
/// partition, in the order the partitions are given, then in emission order within each
/// partition.
pub fn group_by_key<K, V>(partitions: Vec<Partition<K, V>>) -> Vec<(K, Vec<V>)>
where
    K: Ord,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for partition in partitions {
        for (key, value) in partition.into_pairs() {
            groups.entry(key).or_insert_with(Vec::new).push(value);
        }
    }
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(index: usize, pairs: &[(&'static str, u32)]) -> Partition<&'static str, u32> {
        Partition::new(index, pairs.to_vec())
    }

    #[test]
    fn groups_are_sorted_by_key() {
        let partitions = vec![
            partition(0, &[("pear", 1), ("apple", 2)]),
            partition(1, &[("fig", 3)]),
        ];

        let groups = group_by_key(partitions);

        let keys: Vec<&str> = groups.iter().map(|&(key, _)| key).collect();
        assert_eq!(vec!["apple", "fig", "pear"], keys);
    }

    #[test]
    fn values_follow_partition_then_emission_order() {
        let partitions = vec![
            partition(0, &[("k", 1), ("other", 9), ("k", 2)]),
            partition(1, &[("k", 3)]),
            partition(2, &[("k", 4), ("k", 5)]),
        ];

        let groups = group_by_key(partitions);

        assert_eq!(vec![("k", vec![1, 2, 3, 4, 5]), ("other", vec![9])], groups);
    }

    #[test]
    fn no_partitions_gives_no_groups() {
        let groups = group_by_key::<String, u32>(Vec::new());

        assert!(groups.is_empty());
    }
}
