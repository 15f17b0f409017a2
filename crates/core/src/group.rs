//! Series grouping engine
//!
//! A series is identified by GPU, backend, KV cache type pair, and context
//! depth. Model and build version are deliberately not part of the key, so
//! runs of different models or versions that agree on those four dimensions
//! land in the same series.

use crate::data::Record;
use std::collections::HashMap;

/// Derive the series key of a record
///
/// Total function of the four grouping fields; the textual format is fixed
/// so the key doubles as a stable legend label.
pub fn series_key(record: &Record) -> String {
    format!(
        "{} | {} | {}/{} | d={}",
        record.gpu_info, record.backends, record.type_k, record.type_v, record.n_depth
    )
}

/// One group of records sharing a series key
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGroup {
    /// The shared series key
    pub key: String,
    /// Member records in input order
    pub records: Vec<Record>,
}

/// Ordered partition of records into series groups
///
/// Groups appear in first-seen order of their keys; records keep their input
/// order within each group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesGroups {
    groups: Vec<SeriesGroup>,
}

impl SeriesGroups {
    /// Number of distinct series
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no series at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = &SeriesGroup> {
        self.groups.iter()
    }

    /// Look up a group by its key
    pub fn get(&self, key: &str) -> Option<&SeriesGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}

impl<'a> IntoIterator for &'a SeriesGroups {
    type Item = &'a SeriesGroup;
    type IntoIter = std::slice::Iter<'a, SeriesGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partition records into series groups in a single pass
///
/// Every input record lands in exactly one group; the union of all groups is
/// the input with order preserved within each group.
pub fn group_by_series(records: &[Record]) -> SeriesGroups {
    let mut groups: Vec<SeriesGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = series_key(record);
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(SeriesGroup {
                    key,
                    records: vec![record.clone()],
                });
            }
        }
    }

    SeriesGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gpu: &str, backend: &str, type_k: &str, type_v: &str, depth: u32) -> Record {
        Record {
            gpu_info: gpu.to_string(),
            backends: backend.to_string(),
            type_k: type_k.to_string(),
            type_v: type_v.to_string(),
            n_depth: depth,
            ..Default::default()
        }
    }

    #[test]
    fn test_series_key_format() {
        let r = record("RTX 4090", "CUDA", "f16", "q8_0", 2048);
        assert_eq!(series_key(&r), "RTX 4090 | CUDA | f16/q8_0 | d=2048");
    }

    #[test]
    fn test_key_includes_gpu() {
        // Two records identical except for the GPU must form two series
        let a = record("A", "cuda", "f16", "f16", 0);
        let b = record("B", "cuda", "f16", "f16", 0);
        assert_ne!(series_key(&a), series_key(&b));

        let groups = group_by_series(&[a, b]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_key_ignores_model_and_version() {
        let mut a = record("A", "cuda", "f16", "f16", 512);
        a.model_type = "7B".to_string();
        a.build_number = 100;
        let mut b = record("A", "cuda", "f16", "f16", 512);
        b.model_type = "13B".to_string();
        b.build_number = 200;

        assert_eq!(series_key(&a), series_key(&b));
        let groups = group_by_series(&[a, b]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.iter().next().unwrap().records.len(), 2);
    }

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let records = vec![
            record("B", "cuda", "f16", "f16", 0),
            record("A", "cuda", "f16", "f16", 0),
            record("B", "cuda", "f16", "f16", 0),
            record("C", "cuda", "f16", "f16", 0),
        ];
        let groups = group_by_series(&records);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "B | cuda | f16/f16 | d=0",
                "A | cuda | f16/f16 | d=0",
                "C | cuda | f16/f16 | d=0",
            ]
        );
    }

    #[test]
    fn test_partition_is_exhaustive() {
        let records = vec![
            record("A", "cuda", "f16", "f16", 0),
            record("A", "cuda", "f16", "f16", 512),
            record("B", "metal", "q8_0", "q8_0", 0),
            record("A", "cuda", "f16", "f16", 0),
        ];
        let groups = group_by_series(&records);

        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, records.len());

        // Same key iff same four grouping fields
        for group in &groups {
            for member in &group.records {
                assert_eq!(series_key(member), group.key);
            }
        }

        // Within-group order follows input order
        let first = groups.get("A | cuda | f16/f16 | d=0").unwrap();
        assert_eq!(first.records[0], records[0]);
        assert_eq!(first.records[1], records[3]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_series(&[]);
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }
}
