use docform_core::db::migrations::latest_version;
use docform_core::db::{open_db, open_db_in_memory};
use docform_core::{
    BlobKind, FormSnapshot, FormStateStore, KeyValueStore, SettingKind, SqliteKeyValueStore,
};

#[test]
fn open_in_memory_applies_migrations() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn set_overwrites_and_remove_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("contractData", "{}").unwrap();
    store.set("contractData", "{\"a\":\"1\"}").unwrap();
    assert_eq!(
        store.get("contractData").unwrap().as_deref(),
        Some("{\"a\":\"1\"}")
    );

    store.remove("contractData").unwrap();
    store.remove("contractData").unwrap();
    assert_eq!(store.get("contractData").unwrap(), None);
}

#[test]
fn form_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forms.sqlite3");
    let snapshot: FormSnapshot = [("buyerName", "ACME"), ("totalAmount", "1500")]
        .into_iter()
        .collect();

    {
        let conn = open_db(&path).unwrap();
        let state = FormStateStore::new(SqliteKeyValueStore::new(&conn));
        state.persist_snapshot(&snapshot);
        state.persist_blob(BlobKind::Specification, "<table></table>");
        state.persist_setting(SettingKind::DeliveryTerm, "FOB");
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    assert_eq!(
        store.keys().unwrap(),
        vec![
            "contractData".to_string(),
            "loadedSpecification".to_string(),
            "termOfDelivery".to_string(),
        ]
    );

    let state = FormStateStore::new(store);
    assert_eq!(state.load_snapshot(), snapshot);
    state.clear_all();
    assert_eq!(state.load_blob(BlobKind::Specification), None);
    assert_eq!(
        state.load_setting(SettingKind::DeliveryTerm).as_deref(),
        Some("FOB")
    );
}
