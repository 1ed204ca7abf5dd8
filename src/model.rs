use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// The lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

/// A quadrant of the urgency/importance matrix. Stored as the task's base
/// priority; the priority engine recomputes the displayed quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    UrgentImportant,
    Important,
    Urgent,
    Normal,
}

/// Why a version was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    Create,
    Update,
    StatusChange,
    Delete,
    Restore,
    Snapshot,
    Migration,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }

    /// Map stored text back to a status. The schema CHECK keeps the column
    /// inside the enumerated set, so anything else means a hand-edited
    /// journal; fall back to todo rather than poisoning every read.
    fn from_stored(s: &str) -> Status {
        Status::from_str(s).unwrap_or(Status::Todo)
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Status> {
        match s {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            other => Err(Error::ConstraintViolation(format!(
                "status must be one of todo, in_progress, completed (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Status {
    fn default() -> Status {
        Status::Todo
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => "urgent_important",
            Priority::Important => "important",
            Priority::Urgent => "urgent",
            Priority::Normal => "normal",
        }
    }

    /// Unknown stored text degrades to normal instead of failing the read.
    fn from_stored(s: &str) -> Priority {
        Priority::from_str(s).unwrap_or(Priority::Normal)
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Priority> {
        match s {
            "urgent_important" => Ok(Priority::UrgentImportant),
            "important" => Ok(Priority::Important),
            "urgent" => Ok(Priority::Urgent),
            "normal" => Ok(Priority::Normal),
            other => Err(Error::ConstraintViolation(format!(
                "priority must be one of urgent_important, important, urgent, normal (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Priority {
    fn default() -> Priority {
        Priority::Normal
    }
}

impl OpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpType::Create => "create",
            OpType::Update => "update",
            OpType::StatusChange => "status_change",
            OpType::Delete => "delete",
            OpType::Restore => "restore",
            OpType::Snapshot => "snapshot",
            OpType::Migration => "migration",
        }
    }

    fn from_stored(s: &str) -> OpType {
        match s {
            "create" => OpType::Create,
            "update" => OpType::Update,
            "status_change" => OpType::StatusChange,
            "delete" => OpType::Delete,
            "restore" => OpType::Restore,
            "snapshot" => OpType::Snapshot,
            _ => OpType::Migration,
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_op() -> OpType {
    OpType::Migration
}

fn default_task_type() -> String {
    "general".to_string()
}

fn default_summary() -> String {
    "Imported from JSON".to_string()
}

fn default_version() -> u32 {
    1
}

/// One version of a task. Rows are immutable once written; every mutation
/// appends a new version instead.
///
/// `due_date` and `created_at` stay as stored text: the write path validates
/// them, but imported journals may carry dates the engine should degrade on
/// rather than refuse to read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_uuid: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default = "default_task_type")]
    pub task_type: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default = "default_op")]
    pub operation_type: OpType,
    #[serde(default = "default_summary")]
    pub change_summary: String,
    #[serde(default)]
    pub created_at: String,
}

impl TaskRecord {
    /// Start a copy-forward revision of this version.
    pub fn revise(&self) -> Revision {
        Revision { next: self.clone() }
    }

    pub fn short_uuid(&self) -> &str {
        match self.task_uuid.char_indices().nth(8) {
            Some((idx, _)) => &self.task_uuid[..idx],
            None => &self.task_uuid,
        }
    }
}

/// Copy-on-write builder over the previous snapshot. Every recognized field
/// overwrite is validated here so that nothing outside the enumerated sets
/// or date/number formats ever reaches the log.
pub struct Revision {
    next: TaskRecord,
}

impl Revision {
    pub fn set(mut self, field: &str, value: &str) -> Result<Revision> {
        match field {
            "description" => self.next.description = value.to_string(),
            "status" => self.next.status = value.parse()?,
            "priority" => self.next.priority = value.parse()?,
            "due_date" => self.next.due_date = parse_due(value)?,
            "task_type" => self.next.task_type = value.to_string(),
            "estimated_hours" => self.next.estimated_hours = parse_hours(value)?,
            other => return Err(Error::UnsupportedField(other.to_string())),
        }
        Ok(self)
    }

    pub fn status(mut self, status: Status) -> Revision {
        self.next.status = status;
        self
    }

    /// Seal the revision as the next version. `created_at` is cleared so the
    /// log stamps the insertion time.
    pub fn finish(mut self, op: OpType, change_summary: String) -> TaskRecord {
        self.next.version += 1;
        self.next.operation_type = op;
        self.next.change_summary = change_summary;
        self.next.created_at = String::new();
        self.next
    }
}

/// Validate a due date supplied by the collaborator. The literal `null`
/// clears the date.
fn parse_due(value: &str) -> Result<Option<String>> {
    if value == "null" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| Error::MalformedInput(format!("'{}' is not a YYYY-MM-DD date", value)))?;
    Ok(Some(value.to_string()))
}

fn parse_hours(value: &str) -> Result<f64> {
    let hours: f64 = value
        .parse()
        .map_err(|_| Error::MalformedInput(format!("'{}' is not a number of hours", value)))?;
    if hours < 0.0 {
        return Err(Error::ConstraintViolation(
            "estimated_hours must not be negative".to_string(),
        ));
    }
    Ok(hours)
}

/// Take the first 50 characters of a description for an audit note.
fn summary_prefix(description: &str) -> String {
    description.chars().take(50).collect()
}

const COLUMNS: &str = "task_uuid, version, description, status, priority, due_date, \
                       task_type, estimated_hours, operation_type, change_summary, created_at";

const LATEST_JOIN: &str = "JOIN (SELECT task_uuid, MAX(version) AS max_version \
                           FROM task_log GROUP BY task_uuid) latest \
                           ON u.task_uuid = latest.task_uuid AND u.version = latest.max_version";

/// Initialize the append-only task log.
pub fn init_log(db: &Connection) -> Result<()> {
    db.execute(
        "CREATE TABLE IF NOT EXISTS task_log (
                  id               INTEGER PRIMARY KEY AUTOINCREMENT,
                  task_uuid        TEXT NOT NULL,
                  version          INTEGER NOT NULL DEFAULT 1,
                  description      TEXT NOT NULL,
                  status           TEXT NOT NULL DEFAULT 'todo'
                      CHECK(status IN ('todo', 'in_progress', 'completed')),
                  priority         TEXT NOT NULL DEFAULT 'normal'
                      CHECK(priority IN ('urgent_important', 'important', 'urgent', 'normal')),
                  due_date         TEXT,
                  task_type        TEXT NOT NULL DEFAULT 'general',
                  estimated_hours  REAL NOT NULL DEFAULT 0,
                  operation_type   TEXT NOT NULL
                      CHECK(operation_type IN ('create', 'update', 'status_change',
                                               'delete', 'restore', 'snapshot', 'migration')),
                  change_summary   TEXT NOT NULL DEFAULT '',
                  created_at       TEXT NOT NULL
                  )",
        [],
    )?;
    db.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_task_version ON task_log (task_uuid, version)",
        [],
    )?;
    db.execute(
        "CREATE INDEX IF NOT EXISTS idx_task_uuid ON task_log (task_uuid)",
        [],
    )?;
    db.execute(
        "CREATE INDEX IF NOT EXISTS idx_status ON task_log (status)",
        [],
    )?;
    Ok(())
}

/// Append one version to the log. The version must extend the task's chain
/// by exactly one; anything else breaks the total-order invariant and is
/// rejected. No row is ever mutated or removed.
pub fn append(db: &Connection, record: &TaskRecord) -> Result<()> {
    let expected = max_version(db, &record.task_uuid)?.map_or(1, |v| v + 1);
    if record.version != expected {
        return Err(Error::ConstraintViolation(format!(
            "version {} for task {} breaks the chain (expected {})",
            record.version, record.task_uuid, expected
        )));
    }

    let created_at = if record.created_at.is_empty() {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        record.created_at.clone()
    };

    db.execute(
        "INSERT INTO task_log (task_uuid, version, description, status, priority, due_date, \
         task_type, estimated_hours, operation_type, change_summary, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.task_uuid,
            record.version,
            record.description,
            record.status.as_str(),
            record.priority.as_str(),
            record.due_date,
            record.task_type,
            record.estimated_hours,
            record.operation_type.as_str(),
            record.change_summary,
            created_at,
        ],
    )?;
    Ok(())
}

fn max_version(db: &Connection, task_uuid: &str) -> Result<Option<u32>> {
    let max = db.query_row(
        "SELECT MAX(version) FROM task_log WHERE task_uuid = ?1",
        params![task_uuid],
        |row| row.get::<_, Option<u32>>(0),
    )?;
    Ok(max)
}

/// The highest-version row for a task, tombstone or not.
fn latest_version(db: &Connection, task_uuid: &str) -> Result<Option<TaskRecord>> {
    let record = db
        .query_row(
            &format!(
                "SELECT {} FROM task_log WHERE task_uuid = ?1 ORDER BY version DESC LIMIT 1",
                COLUMNS
            ),
            params![task_uuid],
            record_from_row,
        )
        .optional()?;
    Ok(record)
}

/// The current state of a task. A task whose latest version is a delete
/// tombstone is logically absent even though its rows remain.
pub fn latest_active(db: &Connection, task_uuid: &str) -> Result<TaskRecord> {
    match latest_version(db, task_uuid)? {
        Some(record) if record.operation_type != OpType::Delete => Ok(record),
        _ => Err(Error::NotFound(task_uuid.to_string())),
    }
}

/// The latest version of every task that is not tombstoned, optionally
/// filtered by status, most recently created first.
pub fn list_active(db: &Connection, status: Option<Status>) -> Result<Vec<TaskRecord>> {
    let base = format!(
        "SELECT {} FROM task_log u {} WHERE u.operation_type != 'delete'",
        columns_on("u"),
        LATEST_JOIN
    );
    let order = "ORDER BY u.created_at DESC, u.id DESC";

    match status {
        Some(status) => {
            let mut stmt = db.prepare(&format!("{} AND u.status = ?1 {}", base, order))?;
            let rows = stmt.query_map(params![status.as_str()], record_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        }
        None => {
            let mut stmt = db.prepare(&format!("{} {}", base, order))?;
            let rows = stmt.query_map([], record_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        }
    }
}

/// Full version chain for a task, newest first, tombstones included. An
/// unknown id yields an empty chain.
pub fn history(db: &Connection, task_uuid: &str) -> Result<Vec<TaskRecord>> {
    let mut stmt = db.prepare(&format!(
        "SELECT {} FROM task_log WHERE task_uuid = ?1 ORDER BY version DESC",
        COLUMNS
    ))?;
    let rows = stmt.query_map(params![task_uuid], record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// Every row in the log in insertion order, for export.
pub fn full_log(db: &Connection) -> Result<Vec<TaskRecord>> {
    let mut stmt = db.prepare(&format!("SELECT {} FROM task_log ORDER BY id", COLUMNS))?;
    let rows = stmt.query_map([], record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// Create a task as version 1 of a fresh identifier.
pub fn create(
    db: &Connection,
    description: &str,
    priority: Priority,
    due_date: Option<&str>,
    task_type: &str,
    estimated_hours: f64,
) -> Result<String> {
    let due_date = match due_date {
        Some(value) => parse_due(value)?,
        None => None,
    };
    if estimated_hours < 0.0 {
        return Err(Error::ConstraintViolation(
            "estimated_hours must not be negative".to_string(),
        ));
    }

    let task_uuid = Uuid::new_v4().to_string();
    let record = TaskRecord {
        task_uuid: task_uuid.clone(),
        version: 1,
        description: description.to_string(),
        status: Status::Todo,
        priority,
        due_date,
        task_type: task_type.to_string(),
        estimated_hours,
        operation_type: OpType::Create,
        change_summary: format!("Created task: {}", summary_prefix(description)),
        created_at: String::new(),
    };
    append(db, &record)?;
    Ok(task_uuid)
}

/// Overwrite one field of a task's current state as a new version. All
/// other fields are copied forward untouched.
pub fn update(db: &Connection, task_uuid: &str, field: &str, value: &str) -> Result<TaskRecord> {
    let current = latest_active(db, task_uuid)?;
    let next = current
        .revise()
        .set(field, value)?
        .finish(OpType::Update, format!("Updated {}: {}", field, value));
    append(db, &next)?;
    Ok(next)
}

/// Shortcut status transition to completed.
pub fn complete(db: &Connection, task_uuid: &str) -> Result<TaskRecord> {
    let current = latest_active(db, task_uuid)?;
    let next = current.revise().status(Status::Completed).finish(
        OpType::StatusChange,
        format!("Marked completed: {}", summary_prefix(&current.description)),
    );
    append(db, &next)?;
    Ok(next)
}

/// Soft-delete a task by appending a tombstone. The tombstone is a full
/// copy of the previous version, so deleting an already-deleted task just
/// grows the chain by one more tombstone.
pub fn delete(db: &Connection, task_uuid: &str) -> Result<TaskRecord> {
    let current =
        latest_version(db, task_uuid)?.ok_or_else(|| Error::NotFound(task_uuid.to_string()))?;
    let next = current.revise().finish(
        OpType::Delete,
        format!("Deleted task: {}", summary_prefix(&current.description)),
    );
    append(db, &next)?;
    Ok(next)
}

/// Bring a tombstoned task back into active views by appending a copy of
/// its last content with a restore marker.
pub fn restore(db: &Connection, task_uuid: &str) -> Result<TaskRecord> {
    let current =
        latest_version(db, task_uuid)?.ok_or_else(|| Error::NotFound(task_uuid.to_string()))?;
    if current.operation_type != OpType::Delete {
        return Err(Error::ConstraintViolation(format!(
            "task {} is not deleted",
            task_uuid
        )));
    }
    let next = current.revise().finish(
        OpType::Restore,
        format!("Restored task: {}", summary_prefix(&current.description)),
    );
    append(db, &next)?;
    Ok(next)
}

/// Active tasks whose description contains the keyword, most recent first.
pub fn search_active(db: &Connection, keyword: &str) -> Result<Vec<TaskRecord>> {
    let mut stmt = db.prepare(&format!(
        "SELECT {} FROM task_log u {} \
         WHERE u.operation_type != 'delete' AND u.description LIKE ?1 \
         ORDER BY u.created_at DESC, u.id DESC",
        columns_on("u"),
        LATEST_JOIN
    ))?;
    let pattern = format!("%{}%", keyword);
    let rows = stmt.query_map(params![pattern], record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

fn columns_on(alias: &str) -> String {
    COLUMNS
        .split(',')
        .map(|c| format!("{}.{}", alias, c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map a row in COLUMNS order back to a record.
fn record_from_row(row: &Row) -> rusqlite::Result<TaskRecord> {
    Ok(TaskRecord {
        task_uuid: row.get(0)?,
        version: row.get(1)?,
        description: row.get(2)?,
        status: Status::from_stored(&row.get::<_, String>(3)?),
        priority: Priority::from_stored(&row.get::<_, String>(4)?),
        due_date: row.get(5)?,
        task_type: row.get(6)?,
        estimated_hours: row.get(7)?,
        operation_type: OpType::from_stored(&row.get::<_, String>(8)?),
        change_summary: row.get(9)?,
        created_at: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem_db() -> Connection {
        let db = Connection::open_in_memory().expect("open in-memory db");
        init_log(&db).expect("init log");
        db
    }

    fn sample_task(db: &Connection) -> String {
        create(
            db,
            "write the quarterly report",
            Priority::Important,
            Some("2026-09-01"),
            "development",
            4.0,
        )
        .expect("create task")
    }

    #[test]
    fn versions_are_contiguous_from_one() {
        let db = mem_db();
        let id = sample_task(&db);
        update(&db, &id, "status", "in_progress").unwrap();
        update(&db, &id, "estimated_hours", "6").unwrap();
        delete(&db, &id).unwrap();

        let chain = history(&db, &id).unwrap();
        let versions: Vec<u32> = chain.iter().map(|r| r.version).collect();
        assert_eq!(versions, vec![4, 3, 2, 1]);
    }

    #[test]
    fn append_rejects_version_gaps_and_duplicates() {
        let db = mem_db();
        let id = sample_task(&db);
        let current = latest_active(&db, &id).unwrap();

        let mut gap = current.clone();
        gap.version = 3;
        assert!(matches!(
            append(&db, &gap),
            Err(Error::ConstraintViolation(_))
        ));

        let mut dup = current.clone();
        dup.version = 1;
        assert!(matches!(
            append(&db, &dup),
            Err(Error::ConstraintViolation(_))
        ));
    }

    #[test]
    fn update_copies_all_other_fields_forward() {
        let db = mem_db();
        let id = sample_task(&db);
        let before = latest_active(&db, &id).unwrap();

        let after = update(&db, &id, "status", "completed").unwrap();
        assert_eq!(after.version, 2);
        assert_eq!(after.status, Status::Completed);
        assert_eq!(after.operation_type, OpType::Update);
        assert_eq!(after.description, before.description);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.due_date, before.due_date);
        assert_eq!(after.task_type, before.task_type);
        assert_eq!(after.estimated_hours, before.estimated_hours);
    }

    #[test]
    fn update_never_mutates_existing_rows() {
        let db = mem_db();
        let id = sample_task(&db);
        let v1_before = history(&db, &id).unwrap().pop().unwrap();

        update(&db, &id, "description", "rewritten").unwrap();
        let chain = history(&db, &id).unwrap();
        assert_eq!(chain.len(), 2);

        let v1_after = chain.last().unwrap();
        assert_eq!(v1_after.description, v1_before.description);
        assert_eq!(v1_after.created_at, v1_before.created_at);
        assert_eq!(v1_after.operation_type, OpType::Create);
    }

    #[test]
    fn update_validates_fields_and_values() {
        let db = mem_db();
        let id = sample_task(&db);

        assert!(matches!(
            update(&db, &id, "color", "red"),
            Err(Error::UnsupportedField(_))
        ));
        assert!(matches!(
            update(&db, &id, "status", "paused"),
            Err(Error::ConstraintViolation(_))
        ));
        assert!(matches!(
            update(&db, &id, "priority", "top"),
            Err(Error::ConstraintViolation(_))
        ));
        assert!(matches!(
            update(&db, &id, "due_date", "next tuesday"),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            update(&db, &id, "estimated_hours", "lots"),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            update(&db, &id, "estimated_hours", "-1"),
            Err(Error::ConstraintViolation(_))
        ));

        // failed updates must not grow the chain
        assert_eq!(history(&db, &id).unwrap().len(), 1);
    }

    #[test]
    fn due_date_null_clears_the_deadline() {
        let db = mem_db();
        let id = sample_task(&db);
        let after = update(&db, &id, "due_date", "null").unwrap();
        assert_eq!(after.due_date, None);
    }

    #[test]
    fn deleted_task_is_absent_from_active_views_but_kept_in_history() {
        let db = mem_db();
        let id = sample_task(&db);
        update(&db, &id, "status", "in_progress").unwrap();
        delete(&db, &id).unwrap();

        assert!(matches!(latest_active(&db, &id), Err(Error::NotFound(_))));
        assert!(list_active(&db, None).unwrap().is_empty());
        for status in &[Status::Todo, Status::InProgress, Status::Completed] {
            assert!(list_active(&db, Some(*status)).unwrap().is_empty());
        }

        let chain = history(&db, &id).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].operation_type, OpType::Delete);
    }

    #[test]
    fn deleting_twice_appends_a_second_tombstone() {
        let db = mem_db();
        let id = sample_task(&db);
        delete(&db, &id).unwrap();
        let second = delete(&db, &id).unwrap();
        assert_eq!(second.version, 3);
        assert_eq!(second.operation_type, OpType::Delete);
    }

    #[test]
    fn restore_brings_back_the_last_content() {
        let db = mem_db();
        let id = sample_task(&db);
        update(&db, &id, "status", "in_progress").unwrap();
        delete(&db, &id).unwrap();

        let restored = restore(&db, &id).unwrap();
        assert_eq!(restored.version, 4);
        assert_eq!(restored.operation_type, OpType::Restore);
        assert_eq!(restored.status, Status::InProgress);

        let active = latest_active(&db, &id).unwrap();
        assert_eq!(active.description, "write the quarterly report");
    }

    #[test]
    fn restore_requires_a_tombstone() {
        let db = mem_db();
        let id = sample_task(&db);
        assert!(matches!(
            restore(&db, &id),
            Err(Error::ConstraintViolation(_))
        ));
        assert!(matches!(
            restore(&db, "no-such-task"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn complete_records_a_status_change() {
        let db = mem_db();
        let id = sample_task(&db);
        let done = complete(&db, &id).unwrap();
        assert_eq!(done.status, Status::Completed);
        assert_eq!(done.operation_type, OpType::StatusChange);
    }

    #[test]
    fn list_active_respects_the_status_filter() {
        let db = mem_db();
        let a = sample_task(&db);
        let b = create(&db, "file expenses", Priority::Normal, None, "routine", 0.5).unwrap();
        update(&db, &b, "status", "completed").unwrap();

        let todo = list_active(&db, Some(Status::Todo)).unwrap();
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].task_uuid, a);

        let done = list_active(&db, Some(Status::Completed)).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].task_uuid, b);

        assert_eq!(list_active(&db, None).unwrap().len(), 2);
    }

    #[test]
    fn search_matches_active_descriptions_only() {
        let db = mem_db();
        sample_task(&db);
        let gone =
            create(&db, "report the outage", Priority::Urgent, None, "bug_fix", 1.0).unwrap();
        delete(&db, &gone).unwrap();

        let hits = search_active(&db, "report").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "write the quarterly report");
        assert!(search_active(&db, "deploy").unwrap().is_empty());
    }

    #[test]
    fn history_grows_by_one_per_successful_operation() {
        let db = mem_db();
        let id = sample_task(&db);
        assert_eq!(history(&db, &id).unwrap().len(), 1);
        update(&db, &id, "task_type", "client").unwrap();
        assert_eq!(history(&db, &id).unwrap().len(), 2);
        delete(&db, &id).unwrap();
        assert_eq!(history(&db, &id).unwrap().len(), 3);
    }
}
