use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::protocol::attributes::{Attribute, AttributeMap, AttributeUpdate, AttributeValue};
use crate::protocol::client::StatusUpdate;

struct StoreInner {
    values: DashMap<Attribute, AttributeValue>,
    revision: watch::Sender<u64>,
}

/// Last known attribute values of one device session.
///
/// Cloning is cheap and every clone sees the same values. Each key is read
/// and written atomically; a reader looking at two keys may observe them from
/// different updates.
#[derive(Clone)]
pub struct AttributeStore {
    inner: Arc<StoreInner>,
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeStore")
            .field("len", &self.inner.values.len())
            .field("revision", &self.revision())
            .finish()
    }
}

impl AttributeStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                values: DashMap::new(),
                revision,
            }),
        }
    }

    pub fn with_values(values: AttributeMap) -> Self {
        let store = Self::new();
        store.apply_update(values);
        store
    }

    pub fn get(&self, key: Attribute) -> Option<AttributeValue> {
        self.inner.values.get(&key).map(|v| v.value().clone())
    }

    pub fn contains(&self, key: Attribute) -> bool {
        self.inner.values.contains_key(&key)
    }

    pub fn get_int(&self, key: Attribute) -> Option<i64> {
        self.inner.values.get(&key).and_then(|v| v.as_int())
    }

    pub fn get_float(&self, key: Attribute) -> Option<f64> {
        self.inner.values.get(&key).and_then(|v| v.as_float())
    }

    pub fn get_bool(&self, key: Attribute) -> Option<bool> {
        self.inner.values.get(&key).and_then(|v| v.as_bool())
    }

    pub fn get_text(&self, key: Attribute) -> Option<String> {
        self.inner
            .values
            .get(&key)
            .and_then(|v| v.as_text().map(str::to_string))
    }

    /// Merges `update` into the snapshot, last write wins per key.
    pub fn apply_update(&self, update: AttributeMap) {
        trace!("Merging {} attributes", update.len());
        for (key, value) in update {
            self.inner.values.insert(key, value);
        }
        self.bump();
    }

    /// Replaces the whole snapshot with `values`.
    pub fn replace(&self, values: AttributeMap) {
        trace!("Replacing snapshot with {} attributes", values.len());
        self.inner
            .values
            .retain(|key, _| values.contains_key(key));
        for (key, value) in values {
            self.inner.values.insert(key, value);
        }
        self.bump();
    }

    pub fn snapshot(&self) -> AttributeMap {
        self.inner
            .values
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values.is_empty()
    }

    /// Number of updates applied so far.
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    /// Receiver notified after every merge or replace.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }
}

#[async_trait]
impl StatusUpdate for AttributeStore {
    async fn status_update(&self, update: AttributeUpdate) {
        match update {
            AttributeUpdate::Partial(values) => {
                debug!("Received partial update with {} attributes", values.len());
                self.apply_update(values)
            }
            AttributeUpdate::Full(values) => {
                debug!("Received full update with {} attributes", values.len());
                self.replace(values)
            }
        }
    }
}
