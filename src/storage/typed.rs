use super::memory::RecordStore;
use crate::error::GridResult;
use crate::record::{Entity, Value};

use std::marker::PhantomData;
use std::sync::Arc;

/// Typed view over a [`RecordStore`] whose kind is `E`.
///
/// Cloning the view clones the handle; every view of one cache sees the same data.
pub struct TypedCache<E> {
    store: Arc<RecordStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for TypedCache<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> TypedCache<E> {
    /// Wraps `store`, rejecting it if its kind is not `E`'s kind.
    pub fn new(store: Arc<RecordStore>) -> GridResult<Self> {
        let expected = E::kind();
        if store.kind() != &expected {
            return Err(crate::error::GridError::mismatch(
                expected.name,
                store.kind().name.clone(),
            ));
        }
        Ok(Self {
            store,
            _entity: PhantomData,
        })
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn put(&self, entity: &E) -> GridResult<()> {
        self.store.put(entity.key(), entity.to_record())
    }

    pub fn get(&self, key: impl Into<Value>) -> GridResult<Option<E>> {
        self.store
            .get(&key.into())
            .map(|record| E::from_record(&record))
            .transpose()
    }

    pub fn delete(&self, key: impl Into<Value>) -> GridResult<Option<E>> {
        self.store
            .delete(&key.into())
            .map(|record| E::from_record(&record))
            .transpose()
    }

    /// Snapshot of every entity, in insertion order.
    pub fn values(&self) -> GridResult<Vec<E>> {
        self.store
            .scan()
            .map(|(_, record)| E::from_record(&record))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
