use super::{Adapter, Save};
use crate::{Objects, Result};
use log::debug;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryState {
    saves: usize,
    snapshot: Option<Objects>,
}

/// Shared view of what a [`MemoryAdapter`] has been asked to save.
#[derive(Debug, Clone, Default)]
pub struct MemoryHandle {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryHandle {
    /// Number of times the store called its save callback.
    pub fn saves(&self) -> usize {
        self.state.borrow().saves
    }

    /// Copy of the backing map as of the last save.
    pub fn snapshot(&self) -> Option<Objects> {
        self.state.borrow().snapshot.clone()
    }
}

/// An in-process adapter.
///
/// Entries registered with [`MemoryAdapter::with_entry`] are written into the
/// backing map when the store opens. Every save is mirrored into the
/// [`MemoryHandle`] returned by [`MemoryAdapter::handle`].
///
/// # Example
///
/// ```rust
/// use impulsedb::{Config, MemoryAdapter};
/// use serde_json::json;
///
/// let adapter = MemoryAdapter::new().with_entry("users", json!({ "alice": 1 }));
/// let handle = adapter.handle();
/// let mut store = impulsedb::open("ns", Config::new().adapter(adapter)).unwrap();
///
/// assert_eq!(store.collection("users").get("alice"), Some(json!(1)));
/// store.collection("users").set("bob", 2).unwrap();
/// assert_eq!(handle.saves(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    entries: Objects,
    handle: MemoryHandle,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `collection` with `entry` when the store opens.
    pub fn with_entry(mut self, collection: impl Into<String>, entry: Value) -> Self {
        self.entries.insert(collection.into(), entry);
        self
    }

    pub fn handle(&self) -> MemoryHandle {
        self.handle.clone()
    }
}

impl Adapter for MemoryAdapter {
    fn attach(&mut self, namespace: &str, objects: &mut Objects) -> Result<Box<dyn Save>> {
        debug!(
            "memory adapter attached to {:?} with {} entries",
            namespace,
            self.entries.len()
        );
        objects.extend(std::mem::take(&mut self.entries));
        Ok(Box::new(MemorySave {
            handle: self.handle.clone(),
        }))
    }
}

struct MemorySave {
    handle: MemoryHandle,
}

impl Save for MemorySave {
    fn save(&mut self, _namespace: &str, objects: &Objects) -> Result<()> {
        let mut state = self.handle.state.borrow_mut();
        state.saves += 1;
        state.snapshot = Some(objects.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attach_moves_entries_into_objects() {
        let mut adapter = MemoryAdapter::new()
            .with_entry("a", json!({ "x": 1 }))
            .with_entry("b", json!("scalar"));
        let mut objects = Objects::new();
        objects.insert("a".to_owned(), json!({ "old": true }));

        adapter.attach("ns", &mut objects).unwrap();

        assert_eq!(objects.get("a"), Some(&json!({ "x": 1 })));
        assert_eq!(objects.get("b"), Some(&json!("scalar")));
        assert!(adapter.entries.is_empty());
    }

    #[test]
    fn save_is_mirrored_into_handle() {
        let mut adapter = MemoryAdapter::new();
        let handle = adapter.handle();
        let mut objects = Objects::new();
        let mut save = adapter.attach("ns", &mut objects).unwrap();
        assert_eq!(handle.saves(), 0);
        assert_eq!(handle.snapshot(), None);

        objects.insert("c".to_owned(), json!({ "k": "v" }));
        save.save("ns", &objects).unwrap();
        save.save("ns", &objects).unwrap();

        assert_eq!(handle.saves(), 2);
        assert_eq!(handle.snapshot(), Some(objects));
    }
}
