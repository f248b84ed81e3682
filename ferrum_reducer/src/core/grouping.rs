use crate::api::reduce::Reducer;
use crate::core::record::KeyValue;
use std::collections::BTreeMap;

/// Every value seen for every key of one reduce partition.
///
/// Keys iterate in ascending order; each value sequence keeps the order the
/// records were inserted in (map task order, then line order).
#[derive(Debug, Default)]
pub struct GroupingMap {
    groups: BTreeMap<String, Vec<String>>,
    values: usize,
}

impl GroupingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kv: KeyValue) {
        self.groups.entry(kv.key).or_default().push(kv.value);
        self.values += 1;
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn value_count(&self) -> usize {
        self.values
    }

    /// Calls `reducer` exactly once per key with that key's full value sequence.
    pub fn reduce<R>(self, reducer: &R) -> BTreeMap<String, String>
    where
        R: Reducer + ?Sized,
    {
        self.groups
            .into_iter()
            .map(|(key, values)| {
                let result = reducer.reduce(&key, &values);
                (key, result)
            })
            .collect()
    }
}

impl Extend<KeyValue> for GroupingMap {
    fn extend<T: IntoIterator<Item = KeyValue>>(&mut self, iter: T) {
        for kv in iter {
            self.insert(kv);
        }
    }
}
