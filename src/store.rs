use crate::adapters::{Adapter, Save};
use crate::{Error, Result};
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// The backing object of a store: collection name -> entry.
pub type Objects = Map<String, Value>;

/// Options for [`Store::open`].
#[derive(Default)]
pub struct Config {
    adapter: Option<Box<dyn Adapter>>,
}

impl Config {
    /// A config without an adapter. It must be given one before opening.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapter(mut self, adapter: impl Adapter + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }
}

/// The `Store` keeps named collections in one in-memory backing object.
///
/// Each collection is an entry of the backing object, and each entry is a
/// record whose fields are read and written through a [`Collection`]. The
/// store's adapter sees the backing object once, at open time; afterwards it
/// only hears about the store through its save callback.
///
/// # Example
///
/// ```rust
/// use impulsedb::{Config, MemoryAdapter, Store};
/// use serde_json::json;
///
/// let mut store = Store::open("ns", Config::new().adapter(MemoryAdapter::new())).unwrap();
/// store.collection("foo").set("bar", "baz").unwrap();
/// assert_eq!(store.collection("foo").get("bar"), Some(json!("baz")));
/// assert_eq!(store.collection("foo").get("missing"), None);
/// ```
pub struct Store {
    namespace: String,
    objects: Objects,
    save: Box<dyn Save>,
}

impl Store {
    /// Open a store bound to `namespace`.
    ///
    /// The configured adapter is attached exactly once, here, with a fresh
    /// empty backing object.
    ///
    /// # Errors
    ///
    /// It returns `Error::Configuration` if the namespace is empty or the config
    /// carries no adapter.
    ///
    /// It propagates errors raised by the adapter.
    pub fn open(namespace: impl Into<String>, config: Config) -> Result<Store> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(Error::Configuration("namespace must not be empty".to_owned()));
        }
        let mut adapter = config
            .adapter
            .ok_or_else(|| Error::Configuration("adapter is missing".to_owned()))?;

        let mut objects = Objects::new();
        let save = adapter.attach(&namespace, &mut objects)?;
        debug!(
            "opened store {:?} with {} collections",
            namespace,
            objects.len()
        );

        Ok(Store {
            namespace,
            objects,
            save,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read-only view of the whole backing object.
    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    /// Sorted names of every collection present in the backing object.
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self.objects.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Access the collection called `name`.
    ///
    /// Nothing is created until the first write, and views obtained for the
    /// same name always observe each other's writes.
    pub fn collection(&mut self, name: impl Into<String>) -> Collection<'_> {
        Collection {
            store: self,
            name: name.into(),
        }
    }

    /// Hand the current backing object to the save callback.
    pub fn save(&mut self) -> Result<()> {
        debug!("saving store {:?}", self.namespace);
        self.save.save(&self.namespace, &self.objects)
    }
}

/// A view over one entry of a [`Store`].
pub struct Collection<'a> {
    store: &'a mut Store,
    name: String,
}

impl Collection<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the whole entry, or `None` if the collection does not exist.
    pub fn entry(&self) -> Option<Value> {
        self.store.objects.get(&self.name).cloned()
    }

    /// Get the value of `field`.
    ///
    /// Returns `None` if the entry or the field does not exist, or if the entry
    /// is not an object.
    pub fn get(&self, field: &str) -> Option<Value> {
        trace!("get {:?}.{:?}", self.name, field);
        self.field(field).cloned()
    }

    /// Get the value of `field` deserialized as `T`.
    ///
    /// # Errors
    ///
    /// It propagates deserialization errors when the stored value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>> {
        self.field(field)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(Error::from)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.field(field).is_some()
    }

    /// Names of the fields of the entry, empty if the collection does not exist.
    pub fn fields(&self) -> Vec<String> {
        self.store
            .objects
            .get(&self.name)
            .and_then(Value::as_object)
            .map(|entry| entry.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Set `field` to `value`, creating the entry if it is absent, then save.
    ///
    /// The write is visible to `get` even if the save callback fails.
    ///
    /// # Errors
    ///
    /// It returns `Error::NotAnObject` if the entry exists but is not an object.
    ///
    /// It propagates serialization errors and errors from the save callback.
    pub fn set<V: Serialize>(&mut self, field: impl Into<String>, value: V) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let field = field.into();
        trace!("set {:?}.{:?}", self.name, field);

        self.entry_mut()?.insert(field, value);
        self.store.save()
    }

    /// Remove `field` and return its old value, then save.
    ///
    /// # Errors
    ///
    /// It returns `Error::KeyNotFound` if the entry or the field does not exist,
    /// and `Error::NotAnObject` if the entry is not an object.
    ///
    /// It propagates errors from the save callback.
    pub fn remove(&mut self, field: &str) -> Result<Value> {
        trace!("remove {:?}.{:?}", self.name, field);
        let entry = match self.store.objects.get_mut(&self.name) {
            Some(entry) => entry
                .as_object_mut()
                .ok_or_else(|| Error::NotAnObject(self.name.clone()))?,
            None => return Err(Error::KeyNotFound),
        };
        let old = entry.remove(field).ok_or(Error::KeyNotFound)?;

        self.store.save()?;
        Ok(old)
    }

    fn field(&self, field: &str) -> Option<&Value> {
        self.store
            .objects
            .get(&self.name)
            .and_then(|entry| entry.get(field))
    }

    fn entry_mut(&mut self) -> Result<&mut Objects> {
        self.store
            .objects
            .entry(self.name.clone())
            .or_insert_with(|| Value::Object(Objects::new()))
            .as_object_mut()
            .ok_or_else(|| Error::NotAnObject(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{adapter_fn, NoopSave};
    use serde_json::json;

    fn store_with(entries: Objects) -> Store {
        let config = Config::new().adapter(adapter_fn(move |_name, objects| {
            objects.extend(entries.clone());
            NoopSave
        }));
        Store::open("test", config).unwrap()
    }

    #[test]
    fn set_creates_entry_lazily() {
        let mut store = store_with(Objects::new());
        assert_eq!(store.collection("foo").entry(), None);
        assert!(store.collections().is_empty());

        let mut foo = store.collection("foo");
        assert_eq!(foo.name(), "foo");
        foo.set("bar", "baz").unwrap();
        assert_eq!(store.collection("foo").entry(), Some(json!({ "bar": "baz" })));
        assert_eq!(store.collections(), vec!["foo".to_owned()]);
    }

    #[test]
    fn non_object_entry() {
        let mut entries = Objects::new();
        entries.insert("scalar".to_owned(), json!(7));
        let mut store = store_with(entries);

        assert_eq!(store.collection("scalar").get("x"), None);
        assert!(store.collection("scalar").fields().is_empty());
        assert!(matches!(
            store.collection("scalar").set("x", 1),
            Err(Error::NotAnObject(name)) if name == "scalar"
        ));
        assert!(matches!(
            store.collection("scalar").remove("x"),
            Err(Error::NotAnObject(_))
        ));
        assert_eq!(store.collection("scalar").entry(), Some(json!(7)));
    }

    #[test]
    fn remove_field() {
        let mut store = store_with(Objects::new());
        assert!(matches!(
            store.collection("foo").remove("bar"),
            Err(Error::KeyNotFound)
        ));

        store.collection("foo").set("bar", 1).unwrap();
        store.collection("foo").set("qux", 2).unwrap();
        assert_eq!(store.collection("foo").remove("bar").unwrap(), json!(1));
        assert!(!store.collection("foo").contains("bar"));
        assert_eq!(store.collection("foo").fields(), vec!["qux".to_owned()]);
        assert!(matches!(
            store.collection("foo").remove("bar"),
            Err(Error::KeyNotFound)
        ));
    }

    #[test]
    fn get_as_typed() {
        let mut store = store_with(Objects::new());
        store.collection("foo").set("n", 42u32).unwrap();
        store.collection("foo").set("s", "str").unwrap();

        assert_eq!(store.collection("foo").get_as::<u32>("n").unwrap(), Some(42));
        assert_eq!(store.collection("foo").get_as::<u32>("none").unwrap(), None);
        assert!(matches!(
            store.collection("foo").get_as::<u32>("s"),
            Err(Error::SerdeJson(_))
        ));
    }
}
