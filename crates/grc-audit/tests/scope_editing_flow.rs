//! End-to-end scope editing: load an audit, toggle checkboxes, persist the
//! full-replacement update and reload.

use grc_audit::{AuditError, AuditStore, InMemoryAuditStore, ScopeEditor};
use grc_scope::{Coverage, ScopeId};
use grc_test_utils::{create_test_audit, sample_tables};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn edit_persist_and_reload_scope() {
    let tables = sample_tables();
    let store = InMemoryAuditStore::new();
    let audit = store
        .create(create_test_audit().with_id("audit-1"))
        .await
        .unwrap();

    let mut editor = ScopeEditor::for_audit(&audit, &tables);
    editor.toggle(&ScopeId::macroprocess("M1"), true);
    editor.toggle(&ScopeId::subprocess("S4"), true);
    assert!(editor.is_dirty());
    assert_eq!(editor.coverage(&ScopeId::subprocess("S3")), Coverage::Implicit);

    let saved = store
        .replace_scope("audit-1", editor.into_update(), audit.revision)
        .await
        .unwrap();
    assert_eq!(saved.scope_entities, vec!["macroproceso-M1", "subproceso-S4"]);
    assert_eq!(saved.revision, audit.revision + 1);

    // Excluding one covered subprocess demotes the macroprocess
    let reloaded = store.get("audit-1").await.unwrap();
    let mut editor = ScopeEditor::for_audit(&reloaded, &tables);
    assert!(!editor.is_dirty());
    editor.toggle_raw("subproceso-S1", false).unwrap();

    assert_eq!(editor.coverage(&ScopeId::subprocess("S1")), Coverage::OutOfScope);
    assert_eq!(editor.coverage(&ScopeId::subprocess("S2")), Coverage::Explicit);
    assert_eq!(editor.coverage(&ScopeId::subprocess("S3")), Coverage::Implicit);

    let saved = store
        .replace_scope("audit-1", editor.into_update(), reloaded.revision)
        .await
        .unwrap();
    assert_eq!(
        saved.scope_entities,
        vec!["subproceso-S4", "process-P2", "subproceso-S2"]
    );
}

#[tokio::test]
async fn concurrent_editors_conflict() {
    let tables = sample_tables();
    let store = InMemoryAuditStore::new();
    let audit = store.create(create_test_audit()).await.unwrap();

    let mut first = ScopeEditor::for_audit(&audit, &tables);
    let mut second = ScopeEditor::for_audit(&audit, &tables);
    first.toggle(&ScopeId::process("P1"), true);
    second.toggle(&ScopeId::process("P3"), true);

    store
        .replace_scope(&audit.id, first.into_update(), audit.revision)
        .await
        .unwrap();
    let err = store
        .replace_scope(&audit.id, second.into_update(), audit.revision)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Conflict { .. }));
    assert!(err.is_retryable());

    let stored = store.get(&audit.id).await.unwrap();
    assert_eq!(stored.scope_entities, vec!["process-P1"]);
}

#[tokio::test]
async fn stale_scope_entries_are_dropped_on_next_save() {
    let tables = sample_tables();
    let store = InMemoryAuditStore::new();
    let mut audit = create_test_audit();
    audit.scope_entities = vec![
        "process-P1".to_string(),
        "process-gone".to_string(),
        "not-an-id".to_string(),
    ];
    let audit = store.create(audit).await.unwrap();

    let mut editor = ScopeEditor::for_audit(&audit, &tables);
    editor.toggle(&ScopeId::subprocess("S4"), true);

    let saved = store
        .replace_scope(&audit.id, editor.into_update(), audit.revision)
        .await
        .unwrap();
    assert_eq!(saved.scope_entities, vec!["process-P1", "subproceso-S4"]);
}

#[test]
fn malformed_toggle_is_rejected() {
    let tables = sample_tables();
    let audit = create_test_audit();
    let mut editor = ScopeEditor::for_audit(&audit, &tables);

    let err = editor.toggle_raw("proceso-P1", true).unwrap_err();

    assert!(matches!(err, AuditError::Scope(_)));
    assert!(editor.selection().is_empty());
}
