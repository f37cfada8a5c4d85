//! Content-keyed string table.
//!
//! Unlike the reference tables, strings are matched by value: two distinct allocations with the
//! same content share one id.

use crate::InternConfig;
use std::{collections::HashMap, sync::Arc};
use tracing::warn;

/// Deduplicates repeated strings by id, for both encoding and decoding.
///
/// When full, the table stops interning instead of failing: [InternTable::intern] returns `None`
/// and the caller writes the string inline.
#[derive(Debug)]
pub struct InternTable {
    ids: HashMap<Arc<str>, u32>,
    strings: Vec<Option<Arc<str>>>,
    max_entries: usize,
    degraded: bool,
}

impl InternTable {
    pub fn new(cfg: InternConfig) -> Self {
        Self {
            ids: HashMap::new(),
            strings: Vec::new(),
            max_entries: cfg.max_entries,
            degraded: false,
        }
    }

    fn degrade(&mut self) {
        if !self.degraded {
            self.degraded = true;
            warn!(
                max_entries = self.max_entries,
                "intern table full, writing strings inline"
            );
        }
    }

    /// Returns the id of already interned content.
    pub fn try_get_id(&self, s: &str) -> Option<u32> {
        self.ids.get(s).copied()
    }

    /// Returns the id for `s`, interning it if needed.
    ///
    /// Interning the same content twice returns the same id. Returns `None` once the table is
    /// full and `s` was not already interned.
    pub fn intern(&mut self, s: &str) -> Option<u32> {
        self.try_intern(s).map(|(id, _)| id)
    }

    /// Like [Self::intern], also reporting whether the content was newly interned.
    pub fn try_intern(&mut self, s: &str) -> Option<(u32, bool)> {
        if let Some(id) = self.try_get_id(s) {
            return Some((id, false));
        }
        if self.strings.len() >= self.max_entries {
            self.degrade();
            return None;
        }
        let id = self.strings.len() as u32;
        let value: Arc<str> = Arc::from(s);
        self.ids.insert(Arc::clone(&value), id);
        self.strings.push(Some(value));
        Some((id, true))
    }

    /// Records that `id` stands for `s`, as read from encoded input.
    ///
    /// Ids may arrive in any order; skipped ids are left empty until registered. Returns `false`
    /// without registering when `id` lies beyond the table's bound.
    pub fn register(&mut self, id: u32, s: &str) -> bool {
        let index = id as usize;
        if index >= self.max_entries {
            self.degrade();
            return false;
        }
        if index >= self.strings.len() {
            self.strings.resize(index + 1, None);
        }
        let value: Arc<str> = Arc::from(s);
        if let Some(previous) = self.strings[index].replace(Arc::clone(&value)) {
            if self.ids.get(&previous) == Some(&id) {
                self.forget(&previous);
            }
        }
        self.ids.entry(value).or_insert(id);
        true
    }

    /// Points `s` at the lowest slot still holding it, or drops it when none does.
    fn forget(&mut self, s: &Arc<str>) {
        let holder = self
            .strings
            .iter()
            .position(|slot| slot.as_deref() == Some(&**s));
        match holder {
            Some(index) => {
                self.ids.insert(Arc::clone(s), index as u32);
            }
            None => {
                self.ids.remove(s);
            }
        }
    }

    /// Returns the content registered under `id`.
    pub fn get(&self, id: u32) -> Option<&str> {
        self.strings.get(id as usize)?.as_deref()
    }

    /// Returns the shared content registered under `id`.
    pub fn get_shared(&self, id: u32) -> Option<Arc<str>> {
        self.strings.get(id as usize)?.clone()
    }

    /// Next id [Self::intern] would assign.
    pub fn next_id(&self) -> u32 {
        self.strings.len() as u32
    }

    /// Number of slots, including unregistered gaps.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Whether the table has hit its bound.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Forgets every string so the table can serve another call.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.strings.clear();
        self.degraded = false;
    }
}

impl Default for InternTable {
    fn default() -> Self {
        Self::new(InternConfig::default())
    }
}
