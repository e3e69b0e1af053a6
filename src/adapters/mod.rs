use crate::{Objects, Result};

pub use self::func::{adapter_fn, save_fn, AdapterFn, SaveFn};
pub use self::memory::{MemoryAdapter, MemoryHandle};

mod func;
mod memory;

/// Trait that describes how a store is connected to its persistence.
///
/// A store calls [`Adapter::attach`] once, while it is being opened, with its
/// namespace and its still-empty backing map. The adapter may fill the map
/// (e.g. with previously persisted collections) and returns the [`Save`]
/// callback the store keeps for the rest of its life. The adapter itself is
/// dropped afterwards.
pub trait Adapter {
    fn attach(&mut self, namespace: &str, objects: &mut Objects) -> Result<Box<dyn Save>>;
}

/// Callback invoked by the store after every mutation.
///
/// The store has already applied the mutation when `save` runs, so a failing
/// or no-op save never hides a write from subsequent reads.
pub trait Save {
    fn save(&mut self, namespace: &str, objects: &Objects) -> Result<()>;
}

/// A [`Save`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSave;

impl Save for NoopSave {
    fn save(&mut self, _namespace: &str, _objects: &Objects) -> Result<()> {
        Ok(())
    }
}
