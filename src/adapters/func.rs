use super::{Adapter, Save};
use crate::{Objects, Result};

/// An [`Adapter`] built from a closure, see [`adapter_fn`].
pub struct AdapterFn<F>(F);

/// Wrap a closure `|namespace, objects| -> impl Save` as an [`Adapter`].
///
/// # Example
///
/// ```rust
/// use impulsedb::{adapter_fn, Config, NoopSave};
///
/// let config = Config::new().adapter(adapter_fn(|_name, _objects| NoopSave));
/// let store = impulsedb::open("ns", config).unwrap();
/// assert!(store.objects().is_empty());
/// ```
pub fn adapter_fn<F, S>(f: F) -> AdapterFn<F>
where
    F: FnMut(&str, &mut Objects) -> S,
    S: Save + 'static,
{
    AdapterFn(f)
}

impl<F, S> Adapter for AdapterFn<F>
where
    F: FnMut(&str, &mut Objects) -> S,
    S: Save + 'static,
{
    fn attach(&mut self, namespace: &str, objects: &mut Objects) -> Result<Box<dyn Save>> {
        Ok(Box::new((self.0)(namespace, objects)))
    }
}

/// A [`Save`] built from a closure, see [`save_fn`].
pub struct SaveFn<F>(F);

/// Wrap a closure `|namespace, objects| -> Result<()>` as a [`Save`].
pub fn save_fn<F>(f: F) -> SaveFn<F>
where
    F: FnMut(&str, &Objects) -> Result<()>,
{
    SaveFn(f)
}

impl<F> Save for SaveFn<F>
where
    F: FnMut(&str, &Objects) -> Result<()>,
{
    fn save(&mut self, namespace: &str, objects: &Objects) -> Result<()> {
        (self.0)(namespace, objects)
    }
}
