//! Decode-side reference table.
//!
//! Objects are constructed in two phases: an id is reserved when the object's tag is read, and the
//! (possibly incomplete) object is registered before its fields are decoded. A field that points
//! back at the object then resolves to the in-progress instance.

use crate::{Error, TrackerConfig};

/// State of an id in a [ReferenceReader].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<T> {
    /// Id handed out, object not registered yet.
    Reserved,
    Ready(T),
}

/// Arena of decoded objects indexed by reference id.
#[derive(Debug)]
pub struct ReferenceReader<T> {
    slots: Vec<Slot<T>>,
    max_references: usize,
}

impl<T> ReferenceReader<T> {
    pub fn new(cfg: TrackerConfig) -> Self {
        Self {
            slots: Vec::new(),
            max_references: cfg.max_references,
        }
    }

    fn ensure_capacity(&self, len: usize) -> Result<(), Error> {
        if len > self.max_references {
            return Err(Error::CapacityExceeded {
                capacity: self.max_references,
            });
        }
        Ok(())
    }

    /// Reserves the next id for an object that is about to be constructed.
    pub fn reserve_id(&mut self) -> Result<u32, Error> {
        let id = self.slots.len();
        self.ensure_capacity(id + 1)?;
        self.slots.push(Slot::Reserved);
        Ok(id as u32)
    }

    /// Registers `obj` under `id`.
    ///
    /// The id may have been reserved, may be the next unused id, or may lie further ahead, in
    /// which case the gap is filled with reserved slots. Registering an id twice fails with
    /// [Error::DuplicateReference].
    pub fn register(&mut self, id: u32, obj: T) -> Result<(), Error> {
        let index = id as usize;
        if index >= self.slots.len() {
            self.ensure_capacity(index + 1)?;
            self.slots.resize_with(index + 1, || Slot::Reserved);
        }
        let slot = &mut self.slots[index];
        if let Slot::Ready(_) = slot {
            return Err(Error::DuplicateReference(id));
        }
        *slot = Slot::Ready(obj);
        Ok(())
    }

    /// Returns the object registered under `id`.
    pub fn get(&self, id: u32) -> Option<&T> {
        match self.slots.get(id as usize)? {
            Slot::Ready(obj) => Some(obj),
            Slot::Reserved => None,
        }
    }

    /// Like [Self::get], distinguishing an unknown id from one still under construction.
    pub fn resolve(&self, id: u32) -> Result<&T, Error> {
        match self.slots.get(id as usize) {
            Some(Slot::Ready(obj)) => Ok(obj),
            Some(Slot::Reserved) => Err(Error::PendingReference(id)),
            None => Err(Error::UnknownReference(id)),
        }
    }

    /// Whether an object is registered under `id`.
    pub fn has(&self, id: u32) -> bool {
        matches!(self.slots.get(id as usize), Some(Slot::Ready(_)))
    }

    /// Whether `id` was handed out but nothing is registered under it yet.
    pub fn is_reserved(&self, id: u32) -> bool {
        matches!(self.slots.get(id as usize), Some(Slot::Reserved))
    }

    /// Number of ids handed out or registered.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every registered object so the table can serve another call.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for ReferenceReader<T> {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
