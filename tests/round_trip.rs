use rusqlite::Connection;

use eisen::model::{self, OpType, Priority};
use eisen::transfer;

fn open_journal(path: &std::path::Path) -> Connection {
    let db = Connection::open(path).expect("open journal");
    model::init_log(&db).expect("init log");
    db
}

/// Build a journal with a little real history: one task that went through
/// an update, one that was deleted, one untouched.
fn seed(db: &Connection) -> Vec<String> {
    let a = model::create(
        db,
        "patch the auth bypass",
        Priority::UrgentImportant,
        Some("2026-08-10"),
        "security",
        3.0,
    )
    .expect("create a");
    model::update(db, &a, "status", "in_progress").expect("update a");

    let b = model::create(db, "tidy the wiki", Priority::Normal, None, "routine", 1.0)
        .expect("create b");
    model::delete(db, &b).expect("delete b");

    let c = model::create(
        db,
        "quarterly planning deck",
        Priority::Important,
        Some("2026-09-01"),
        "development",
        6.0,
    )
    .expect("create c");

    vec![a, b, c]
}

#[test]
fn export_then_import_reproduces_every_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = open_journal(&dir.path().join("source.sqlite"));
    let ids = seed(&source);

    let export_path = dir.path().join("dump.json");
    transfer::export(&source, Some(export_path.clone())).expect("export");

    let target = open_journal(&dir.path().join("target.sqlite"));
    let report = transfer::import(&target, &export_path).expect("import");
    assert_eq!(report.imported, 5);
    assert_eq!(report.skipped, 0);

    for id in &ids {
        let original = model::history(&source, id).expect("source history");
        let replayed = model::history(&target, id).expect("target history");
        assert_eq!(original.len(), replayed.len());
        for (a, b) in original.iter().zip(replayed.iter()) {
            assert_eq!(a.version, b.version);
            assert_eq!(a.description, b.description);
            assert_eq!(a.status, b.status);
            assert_eq!(a.priority, b.priority);
            assert_eq!(a.due_date, b.due_date);
            assert_eq!(a.task_type, b.task_type);
            assert_eq!(a.operation_type, b.operation_type);
            assert_eq!(a.change_summary, b.change_summary);
            assert_eq!(a.created_at, b.created_at);
        }
    }
}

#[test]
fn import_skips_rows_that_break_version_contiguity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = open_journal(&dir.path().join("source.sqlite"));
    seed(&source);

    let mut rows = model::full_log(&source).expect("full log");
    assert_eq!(rows.len(), 5);

    // drop one task's version 1 so its later versions can no longer chain
    let victim = rows
        .iter()
        .find(|r| r.version == 2)
        .expect("a second version exists")
        .task_uuid
        .clone();
    rows.retain(|r| !(r.task_uuid == victim && r.version == 1));

    let crooked_path = dir.path().join("crooked.json");
    std::fs::write(
        &crooked_path,
        serde_json::to_vec_pretty(&rows).expect("serialize"),
    )
    .expect("write crooked dump");

    let target = open_journal(&dir.path().join("target.sqlite"));
    let report = transfer::import(&target, &crooked_path).expect("import");
    assert_eq!(report.imported, 3);
    assert_eq!(report.skipped, 1);
    assert!(model::history(&target, &victim).expect("history").is_empty());
}

#[test]
fn import_into_a_populated_journal_only_appends() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = open_journal(&dir.path().join("source.sqlite"));
    let ids = seed(&source);

    let export_path = dir.path().join("dump.json");
    transfer::export(&source, Some(export_path.clone())).expect("export");

    // re-importing into the same journal: every row already exists, so
    // every version collides with its chain and is skipped
    let report = transfer::import(&source, &export_path).expect("re-import");
    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 5);

    for id in &ids {
        let chain = model::history(&source, id).expect("history");
        let versions: Vec<u32> = chain.iter().map(|r| r.version).collect();
        let expected: Vec<u32> = (1..=chain.len() as u32).rev().collect();
        assert_eq!(versions, expected);
    }
}

#[test]
fn import_defaults_missing_fields_the_lenient_way() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = open_journal(&dir.path().join("target.sqlite"));

    let foreign = r#"[
        {"task_uuid": "legacy-1", "description": "carried over from the old system"}
    ]"#;
    let path = dir.path().join("foreign.json");
    std::fs::write(&path, foreign).expect("write foreign dump");

    let report = transfer::import(&target, &path).expect("import");
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 0);

    let record = model::latest_active(&target, "legacy-1").expect("active");
    assert_eq!(record.version, 1);
    assert_eq!(record.task_type, "general");
    assert_eq!(record.operation_type, OpType::Migration);
    assert_eq!(record.priority, Priority::Normal);
}
