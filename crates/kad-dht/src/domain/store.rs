//! Content-addressed local value store.

use std::collections::HashMap;

use crate::domain::{verify_content_address, ContentHasher, DhtError, NodeId};

/// A peer's local key/value map.
///
/// Keys are content addresses: [`ValueStore::insert_verified`] only admits
/// `(key, value)` when `hash(value) == key`. Replicas pushed by other peers
/// go through [`ValueStore::insert_replica`], which trusts the sender's
/// earlier validation; readers re-validate remote values instead.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: HashMap<NodeId, Vec<u8>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, key: &NodeId) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &NodeId) -> Option<&[u8]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Look up by raw key bytes; keys of the wrong width are never present.
    pub fn get_raw(&self, key: &[u8]) -> Option<&[u8]> {
        let key = NodeId::try_from(key).ok()?;
        self.get(&key)
    }

    /// Insert after checking `hash(value) == key`.
    ///
    /// Returns the parsed key when newly stored, `None` when the key was
    /// already present (the existing value is kept). A mismatch leaves the
    /// store untouched.
    pub fn insert_verified(
        &mut self,
        hasher: &dyn ContentHasher,
        key: &[u8],
        value: &[u8],
    ) -> Result<Option<NodeId>, DhtError> {
        let key = verify_content_address(hasher, key, value).map_err(|actual| {
            DhtError::ContentAddressMismatch {
                claimed: hex::encode(key),
                actual,
            }
        })?;
        if self.values.contains_key(&key) {
            return Ok(None);
        }
        self.values.insert(key, value.to_vec());
        Ok(Some(key))
    }

    /// Insert without validation (replica pushed by a peer that validated).
    ///
    /// Overwrites any previous value under `key`.
    pub fn insert_replica(&mut self, key: NodeId, value: Vec<u8>) {
        self.values.insert(key, value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeId> {
        self.values.keys()
    }
}
