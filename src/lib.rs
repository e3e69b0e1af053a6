//! An embeddable key-value database.
//!
//! A [`Store`] is bound to a namespace and an [`Adapter`]. The adapter sees the
//! backing object map once, when the store is opened, and hands back a [`Save`]
//! callback that the store calls after every mutation.
//!
//! # Example
//!
//! ```rust
//! use impulsedb::{adapter_fn, Config, NoopSave};
//! use serde_json::json;
//!
//! let config = Config::new().adapter(adapter_fn(|name, objects| {
//!     objects.insert("super secret key".to_owned(), json!({ "name": name }));
//!     NoopSave
//! }));
//! let mut db = impulsedb::open("boo", config).unwrap();
//!
//! db.collection("foo").set("bar", "baz").unwrap();
//! assert_eq!(db.collection("foo").get("bar"), Some(json!("baz")));
//! assert_eq!(db.collection("super secret key").get("name"), Some(json!("boo")));
//! ```

pub use adapters::{
    adapter_fn, save_fn, Adapter, AdapterFn, MemoryAdapter, MemoryHandle, NoopSave, Save, SaveFn,
};
pub use error::{Error, Result};
pub use store::{Collection, Config, Objects, Store};

mod adapters;
mod error;
mod store;

/// Open a store bound to `namespace`, see [`Store::open`].
pub fn open(namespace: impl Into<String>, config: Config) -> Result<Store> {
    Store::open(namespace, config)
}
