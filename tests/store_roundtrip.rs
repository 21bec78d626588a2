use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use contactsync::{
    contact::Contact,
    store::contacts::{ContactStore, LoadError},
};

const EMPTY_DOC: &str = r#"<?xml version="1.0"?><contacts />"#;

fn seed(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("seed");
    path
}

fn empty_store(dir: &Path) -> ContactStore {
    let path = seed(dir, "ContactList.xml", EMPTY_DOC);
    ContactStore::load(&path).expect("load")
}

#[test]
fn contains_and_get_flip_after_put() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = empty_store(tmp.path());

    assert!(!store.contains("Ann", "Smith"));
    assert_eq!(store.get("Ann", "Smith"), None);

    assert!(store.put(&Contact::new("Ann", "Smith", "ann@example.com")));

    assert!(store.contains("Ann", "Smith"));
    let found = store.get("Ann", "Smith").expect("present after put");
    assert_eq!(found, Contact::new("Ann", "Smith", "ann@example.com"));
}

#[test]
fn key_comparison_is_case_sensitive_and_untrimmed() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = empty_store(tmp.path());
    store.put(&Contact::new("Ann", "Smith", "ann@example.com"));

    assert!(!store.contains("ann", "Smith"));
    assert!(!store.contains("Ann", "smith"));
    assert!(!store.contains("Ann ", "Smith"));
    assert!(store.contains("Ann", "Smith"));
}

#[test]
fn put_twice_same_key_last_write_wins() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = empty_store(tmp.path());

    assert!(store.put(&Contact::new("Jane", "Doe", "old@example.com")));
    assert!(store.put(&Contact::new("Jane", "Doe", "new@example.com")));

    let all = store.get_all();
    assert_eq!(all, vec![Contact::new("Jane", "Doe", "new@example.com")]);
}

#[test]
fn get_all_preserves_insertion_order() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = empty_store(tmp.path());

    let contacts: Vec<Contact> = (0..5)
        .map(|i| Contact::new(format!("First{i}"), format!("Last{i}"), format!("u{i}@x.com")))
        .collect();
    for contact in &contacts {
        assert!(store.put(contact));
    }

    assert_eq!(store.get_all(), contacts);
}

#[test]
fn save_load_round_trip_preserves_order_and_fields() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = empty_store(tmp.path());

    store.put(&Contact::new("Jane", "Doe", "jane@x.com"));
    store.put(&Contact::new("Bob", "Lee", "bob@y.com"));
    store.put(&Contact::new("Ann", "Smith", ""));

    let out = tmp.path().join("out.xml");
    store.save_to(&out).expect("save");

    let reloaded = ContactStore::load(&out).expect("reload");
    assert_eq!(reloaded.get_all(), store.get_all());
}

#[test]
fn save_writes_back_to_the_load_path() {
    let tmp = TempDir::new().expect("tmp");
    let path = seed(tmp.path(), "ContactList.xml", EMPTY_DOC);

    let mut store = ContactStore::load(&path).expect("load");
    store.put(&Contact::new("Jane", "Doe", "jane@x.com"));
    store.save().expect("save");

    let reloaded = ContactStore::load(&path).expect("reload");
    assert_eq!(
        reloaded.get_all(),
        vec![Contact::new("Jane", "Doe", "jane@x.com")]
    );
}

#[test]
fn nested_contacts_are_findable_but_not_enumerated() {
    let doc = concat!(
        r#"<contacts>"#,
        r#"<contact first="Jane" last="Doe">"#,
        r#"<first>Jane</first><last>Doe</last><email>jane@x.com</email>"#,
        r#"</contact>"#,
        r#"<group>"#,
        r#"<contact first="Ann" last="Smith">"#,
        r#"<first>Ann</first><last>Smith</last><email>ann@y.com</email>"#,
        r#"</contact>"#,
        r#"</group>"#,
        r#"</contacts>"#,
    );
    let tmp = TempDir::new().expect("tmp");
    let path = seed(tmp.path(), "nested.xml", doc);
    let mut store = ContactStore::load(&path).expect("load");

    // descendant search reaches the nested node
    assert!(store.contains("Ann", "Smith"));
    assert_eq!(
        store.get("Ann", "Smith"),
        Some(Contact::new("Ann", "Smith", "ann@y.com"))
    );

    // top-level enumeration does not
    assert_eq!(store.get_all(), vec![Contact::new("Jane", "Doe", "jane@x.com")]);

    // put updates the nested node in place instead of appending a duplicate
    assert!(store.put(&Contact::new("Ann", "Smith", "ann@z.com")));
    assert_eq!(
        store.get("Ann", "Smith"),
        Some(Contact::new("Ann", "Smith", "ann@z.com"))
    );
    assert_eq!(store.get_all().len(), 1);
}

#[test]
fn missing_field_children_read_as_empty_strings() {
    let doc = concat!(
        r#"<contacts>"#,
        r#"<contact first="Jane" last="Doe">"#,
        r#"<first>Jane</first><last>Doe</last>"#,
        r#"</contact>"#,
        r#"</contacts>"#,
    );
    let tmp = TempDir::new().expect("tmp");
    let path = seed(tmp.path(), "noemail.xml", doc);
    let mut store = ContactStore::load(&path).expect("load");

    let found = store.get("Jane", "Doe").expect("present");
    assert_eq!(found.email, "");

    // put creates the missing email child rather than failing
    assert!(store.put(&Contact::new("Jane", "Doe", "jane@x.com")));
    assert_eq!(
        store.get("Jane", "Doe"),
        Some(Contact::new("Jane", "Doe", "jane@x.com"))
    );
}

#[test]
fn alternating_lookups_never_reuse_the_wrong_cached_node() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = empty_store(tmp.path());
    store.put(&Contact::new("Jane", "Doe", "jane@x.com"));
    store.put(&Contact::new("Bob", "Lee", "bob@y.com"));

    for _ in 0..3 {
        assert_eq!(store.get("Jane", "Doe").expect("jane").email, "jane@x.com");
        assert_eq!(store.get("Bob", "Lee").expect("bob").email, "bob@y.com");
        assert!(!store.contains("Jane", "Lee"));
    }

    // an update seen through a repeated (cached) lookup is the new value
    store.put(&Contact::new("Bob", "Lee", "bob@z.com"));
    assert_eq!(store.get("Bob", "Lee").expect("bob").email, "bob@z.com");
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let tmp = TempDir::new().expect("tmp");

    let missing = tmp.path().join("absent.xml");
    let err = ContactStore::load(&missing).err().expect("missing file must fail");
    assert!(matches!(err, LoadError::Io(_)), "expected io error, got {err:?}");

    let garbled = seed(tmp.path(), "garbled.xml", "this is not a document");
    let err = ContactStore::load(&garbled).err().expect("malformed file must fail");
    assert!(matches!(err, LoadError::Parse(_)), "expected parse error, got {err:?}");
}
