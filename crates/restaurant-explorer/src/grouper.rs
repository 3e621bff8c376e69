use indexmap::IndexMap;

use crate::model::{CategoryKey, Record};

/// Records partitioned by category.
///
/// Category keys keep the order in which they were first seen; each group keeps the
/// relative order of its records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRecords {
    groups: IndexMap<CategoryKey, Vec<Record>>,
}

impl GroupedRecords {
    #[cfg(test)]
    pub fn get(&self, key: &CategoryKey) -> Option<&[Record]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &[Record])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn group_by_category(collection: &[Record]) -> GroupedRecords {
    let mut groups: IndexMap<CategoryKey, Vec<Record>> = IndexMap::new();
    for record in collection {
        groups
            .entry(CategoryKey::of(record))
            .or_default()
            .push(record.clone());
    }
    GroupedRecords { groups }
}
