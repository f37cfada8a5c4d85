//! Encode-side reference table.

use crate::{
    identity::{Identity, ObjectKey},
    Error, TrackerConfig,
};
use std::collections::HashMap;
use tracing::debug;

/// Assigns sequential ids to objects by identity during a single encode.
///
/// Ids start at zero and are never reused until [ReferenceWriter::clear].
#[derive(Debug)]
pub struct ReferenceWriter {
    ids: HashMap<ObjectKey, u32>,
    max_references: usize,
}

impl ReferenceWriter {
    pub fn new(cfg: TrackerConfig) -> Self {
        Self {
            ids: HashMap::new(),
            max_references: cfg.max_references,
        }
    }

    /// Returns the id of an already tracked object.
    pub fn try_get_id<I: Identity + ?Sized>(&self, obj: &I) -> Option<u32> {
        self.ids.get(&obj.key()).copied()
    }

    /// Returns the id of `obj`, assigning the next one if it was not tracked yet.
    ///
    /// Fails with [Error::CapacityExceeded] when a new id is needed and the table is full.
    pub fn track<I: Identity + ?Sized>(&mut self, obj: &I) -> Result<u32, Error> {
        self.try_track(obj).map(|(id, _)| id)
    }

    /// Like [Self::track], also reporting whether the object was newly tracked.
    pub fn try_track<I: Identity + ?Sized>(&mut self, obj: &I) -> Result<(u32, bool), Error> {
        let key = obj.key();
        if let Some(&id) = self.ids.get(&key) {
            return Ok((id, false));
        }
        if self.ids.len() >= self.max_references {
            debug!(capacity = self.max_references, "reference table full");
            return Err(Error::CapacityExceeded {
                capacity: self.max_references,
            });
        }
        let id = self.ids.len() as u32;
        self.ids.insert(key, id);
        Ok((id, true))
    }

    /// Number of tracked objects.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_references
    }

    /// Forgets every tracked object so the table can serve another call.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl Default for ReferenceWriter {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
