//! Deduplicating entities discovered across several groups (e.g. the users of
//! each project in a collection) until a cardinality budget is reached.

use crate::api::types::{Entity, EntityId};
use crate::error::FetchError;
use futures_util::{Stream, TryStreamExt};
use std::collections::HashMap;

/// Entities keyed by identity, in first-encounter order. Re-inserting an id
/// replaces the stored entity but keeps its position.
#[derive(Debug, Clone)]
pub struct UniqueEntities<T> {
    entries: Vec<T>,
    index: HashMap<EntityId, usize>,
}

impl<T: Entity> UniqueEntities<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn insert(&mut self, entity: T) {
        match self.index.get(entity.entity_id()) {
            Some(&pos) => self.entries[pos] = entity,
            None => {
                self.index.insert(entity.entity_id().clone(), self.entries.len());
                self.entries.push(entity);
            }
        }
    }

    /// Insert a whole group, then report whether the distinct count now
    /// exceeds `cap`.
    pub fn absorb_group<G>(&mut self, group: G, cap: usize) -> bool
    where
        G: IntoIterator<Item = T>,
    {
        for entity in group {
            self.insert(entity);
        }
        self.len() > cap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}

impl<T: Entity> Default for UniqueEntities<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold groups into `acc` until the distinct count exceeds `cap`. Groups are
/// consumed whole, so the result can exceed `cap` by at most the size of the
/// group that crossed it; later groups are never pulled from the iterator.
pub fn collect_unique<T, I, G>(mut acc: UniqueEntities<T>, groups: I, cap: usize) -> UniqueEntities<T>
where
    T: Entity,
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = T>,
{
    for group in groups {
        if acc.absorb_group(group, cap) {
            break;
        }
    }
    acc
}

/// Async form of [`collect_unique`] over groups that are fetched on demand.
/// Groups are awaited one at a time; once the cap is exceeded the stream is
/// dropped, so no fetch is issued for the remaining groups.
pub async fn collect_unique_stream<T, S>(
    mut acc: UniqueEntities<T>,
    groups: S,
    cap: usize,
) -> Result<UniqueEntities<T>, FetchError>
where
    T: Entity,
    S: Stream<Item = Result<Vec<T>, FetchError>>,
{
    let mut groups = std::pin::pin!(groups);
    let mut consumed = 0usize;
    while let Some(group) = groups.try_next().await? {
        consumed += 1;
        if acc.absorb_group(group, cap) {
            break;
        }
    }
    tracing::trace!(groups = consumed, distinct = acc.len(), cap, "unique entities collected");
    Ok(acc)
}
