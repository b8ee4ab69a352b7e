//! Wholesale-replace entity mirror
//!
//! Keyed by id, iterated in server response order. The only mutation is
//! [`EntityCache::replace_all`]; nothing is ever merged.

use indexmap::IndexMap;

use crate::domain::Entity;

#[derive(Debug, Clone)]
pub struct EntityCache<E: Entity> {
    entries: IndexMap<E::Id, E>,
}

impl<E: Entity> Default for EntityCache<E> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<E: Entity> EntityCache<E> {
    /// Discard current contents and mirror `records`
    pub fn replace_all(&mut self, records: Vec<E>) {
        self.entries = records.into_iter().map(|record| (record.id(), record)).collect();
    }

    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_replace_all_discards_previous() {
        let mut cache = EntityCache::default();
        cache.replace_all(vec![Category::new(1, "a"), Category::new(2, "b")]);
        assert_eq!(cache.len(), 2);

        cache.replace_all(vec![Category::new(3, "c")]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(3).map(|c| c.name.as_str()), Some("c"));
    }

    #[test]
    fn test_preserves_response_order() {
        let mut cache = EntityCache::default();
        cache.replace_all(vec![Category::new(9, "z"), Category::new(1, "a"), Category::new(5, "m")]);
        let ids: Vec<_> = cache.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }
}
