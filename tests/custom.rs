use impulsedb::{adapter_fn, Config, NoopSave, Store};
use serde_json::json;

fn custom_db() -> Store {
    impulsedb::open(
        "boo",
        Config::new().adapter(adapter_fn(|name, objects| {
            objects.insert("super secret key".to_owned(), json!({ "name": name }));
            NoopSave
        })),
    )
    .unwrap()
}

#[test]
fn noop_adapter() {
    let mut db = custom_db();

    db.collection("foo").set("bar", "baz").unwrap();
    assert_eq!(db.collection("foo").get("bar"), Some(json!("baz")));
    assert_eq!(
        db.collection("super secret key").get("name"),
        Some(json!("boo"))
    );
}
