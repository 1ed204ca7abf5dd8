use anyhow::Result;
use chrono::Local;
use prettytable::{Cell, Row, Table};
use rusqlite::Connection;

use crate::model::{self, OpType, Priority, Status, TaskRecord};
use crate::priority::{self, PriorityConfig, Score, WEIGHT_CEILING};

pub fn add(
    db: &Connection,
    description: &str,
    priority: Priority,
    due: Option<&str>,
    task_type: &str,
    hours: f64,
) -> Result<()> {
    let task_uuid = model::create(db, description, priority, due, task_type, hours)?;
    println!("Created task {}", task_uuid);
    println!("  task: {}", description);
    println!("  priority: {}", priority);
    if let Some(due) = due {
        println!("  due: {}", due);
    }
    Ok(())
}

pub fn update_field(db: &Connection, task_uuid: &str, field: &str, value: &str) -> Result<()> {
    let record = model::update(db, task_uuid, field, value)?;
    println!("Updated {} to version {}", record.short_uuid(), record.version);
    println!("  {} = {}", field, value);
    Ok(())
}

pub fn done(db: &Connection, task_uuid: &str) -> Result<()> {
    let record = model::complete(db, task_uuid)?;
    println!("Completed: {}", record.description);
    Ok(())
}

pub fn remove(db: &Connection, task_uuid: &str) -> Result<()> {
    let record = model::delete(db, task_uuid)?;
    println!("Deleted: {}", record.description);
    Ok(())
}

pub fn restore(db: &Connection, task_uuid: &str) -> Result<()> {
    let record = model::restore(db, task_uuid)?;
    println!("Restored: {}", record.description);
    Ok(())
}

/// Resolve every active snapshot, score it against the current clock, and
/// rank by dynamic weight. The log hands tasks over most-recent-first, so
/// equal weights keep that order.
fn scored_active<'a>(
    db: &Connection,
    config: &'a PriorityConfig,
    status: Option<Status>,
) -> Result<Vec<(TaskRecord, Score<'a>)>> {
    let now = Local::now().naive_local();
    let mut scored: Vec<(TaskRecord, Score)> = model::list_active(db, status)?
        .into_iter()
        .map(|task| {
            let score = config.score(&task, now);
            (task, score)
        })
        .collect();
    priority::rank(&mut scored);
    Ok(scored)
}

/// Smart list: active tasks ranked by recomputed priority.
pub fn list(db: &Connection, config: &PriorityConfig, status: Option<Status>) -> Result<()> {
    let scored = scored_active(db, config, status)?;
    if scored.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["id", "task", "priority", "weight", "time pressure", "due"]);
    for (task, score) in &scored {
        let info = config.quadrant(score.final_priority);
        table.add_row(Row::new(vec![
            Cell::new(task.short_uuid()),
            Cell::new(&truncate(&task.description, 42)),
            Cell::new(&format!("{} {}", info.icon, info.name)).style_spec(info.style),
            Cell::new(&format!("{:.1}", score.dynamic_weight)),
            Cell::new(&pressure_cell(score)),
            Cell::new(task.due_date.as_deref().unwrap_or("-")),
        ]));
    }
    table.printstd();
    println!("{} task(s).", scored.len());
    Ok(())
}

/// Basic list: stored fields only, no scoring.
pub fn list_basic(db: &Connection, status: Option<Status>) -> Result<()> {
    let tasks = model::list_active(db, status)?;
    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["id", "task", "status", "priority", "due"]);
    for task in &tasks {
        table.add_row(row![
            task.short_uuid(),
            truncate(&task.description, 42),
            task.status,
            task.priority,
            task.due_date.as_deref().unwrap_or("-")
        ]);
    }
    table.printstd();
    println!("{} task(s).", tasks.len());
    Ok(())
}

/// Four-quadrant matrix over the *recomputed* priorities.
pub fn matrix(db: &Connection, config: &PriorityConfig) -> Result<()> {
    let scored = scored_active(db, config, None)?;

    println!("┌──────────────────────────────────┬──────────────────────────────────┐");
    println!("│ 🔥 Q1  urgent & important        │ ⭐ Q2  important, not urgent      │");
    println!("├──────────────────────────────────┼──────────────────────────────────┤");
    println!("│ ⚡ Q3  urgent, not important     │ 📝 Q4  neither                   │");
    println!("└──────────────────────────────────┴──────────────────────────────────┘");

    for quadrant in &[
        Priority::UrgentImportant,
        Priority::Important,
        Priority::Urgent,
        Priority::Normal,
    ] {
        let info = config.quadrant(*quadrant);
        println!();
        println!("{} {}  {} ({})", info.icon, info.label, info.name, info.action);

        let members: Vec<&(TaskRecord, Score)> = scored
            .iter()
            .filter(|(_, score)| score.final_priority == *quadrant)
            .collect();
        if members.is_empty() {
            println!("  (empty)");
            continue;
        }
        for (task, score) in members.iter().take(5) {
            println!("  • {}", truncate(&task.description, 55));
            println!(
                "    id: {}  weight: {:.1}  {}",
                task.short_uuid(),
                score.dynamic_weight,
                pressure_cell(score)
            );
        }
        if members.len() > 5 {
            println!("  ... and {} more", members.len() - 5);
        }
    }
    Ok(())
}

/// Latest state of one task plus its full version chain, tombstones
/// included.
pub fn show(db: &Connection, config: &PriorityConfig, task_uuid: &str) -> Result<()> {
    let chain = model::history(db, task_uuid)?;
    let latest = match chain.first() {
        Some(latest) => latest,
        None => {
            println!("No task with id {}", task_uuid);
            return Ok(());
        }
    };

    println!("Task {}", latest.task_uuid);
    if latest.operation_type == OpType::Delete {
        println!("  (deleted; `restore` brings it back)");
    }
    println!("{}", textwrap::indent(&textwrap::fill(&latest.description, 68), "  "));
    println!("  status: {}", latest.status);
    println!("  base priority: {}", latest.priority);
    println!("  due: {}", latest.due_date.as_deref().unwrap_or("-"));
    println!("  type: {}", latest.task_type);
    println!("  estimated hours: {}", latest.estimated_hours);

    if latest.operation_type != OpType::Delete {
        let score = config.score(latest, Local::now().naive_local());
        let info = config.quadrant(score.final_priority);
        println!(
            "  smart priority: {} {}, weight {:.1}/{:.0}",
            info.icon, info.name, score.dynamic_weight, WEIGHT_CEILING
        );
        println!("  {}", info.action);
    }

    println!();
    println!("History ({} version(s)):", chain.len());
    let mut table = Table::new();
    table.add_row(row!["version", "operation", "created at", "summary"]);
    for record in &chain {
        table.add_row(row![
            format!("v{}", record.version),
            record.operation_type,
            record.created_at,
            truncate(&record.change_summary, 50)
        ]);
    }
    table.printstd();
    Ok(())
}

/// Explain how a task's dynamic weight is assembled.
pub fn analyze(db: &Connection, config: &PriorityConfig, task_uuid: &str) -> Result<()> {
    let task = model::latest_active(db, task_uuid)?;
    let score = config.score(&task, Local::now().naive_local());
    let info = config.quadrant(score.final_priority);

    println!("Task analysis");
    println!("{}", textwrap::indent(&textwrap::fill(&task.description, 68), "  "));
    println!("  id: {}", task.task_uuid);
    println!();
    println!("  stored priority:   {}", task.priority);
    println!("  smart priority:    {} ({})", score.final_priority, info.label);
    println!();
    println!("  base weight:       {:.0}", score.base_weight);
    println!(
        "  time pressure:     {} {} ({}) +{:.0}%",
        score.pressure.icon,
        score.pressure.level,
        score.pressure.desc,
        score.time_pressure * 100.0
    );
    if let Some(days) = score.remaining_days {
        println!("  days remaining:    {}", days);
    }
    println!("  type bonus:        +{:.0}%", score.type_bonus * 100.0);
    println!("  effort bonus:      +{:.0}%", score.effort_bonus * 100.0);
    println!(
        "  dynamic weight:    {:.1}/{:.0}",
        score.dynamic_weight, WEIGHT_CEILING
    );
    println!();
    println!("  recommended: {}", info.action);
    println!("  tips: {}, {}", info.tips[0], info.tips[1]);
    println!("  timing: {}", score.pressure.advice);
    Ok(())
}

/// Keyword search over active task descriptions.
pub fn search(db: &Connection, keyword: &str) -> Result<()> {
    let hits = model::search_active(db, keyword)?;
    if hits.is_empty() {
        println!("No tasks matching '{}'", keyword);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["id", "task", "status", "priority", "due"]);
    for task in &hits {
        table.add_row(row![
            task.short_uuid(),
            truncate(&task.description, 42),
            task.status,
            task.priority,
            task.due_date.as_deref().unwrap_or("-")
        ]);
    }
    table.printstd();
    println!("{} match(es) for '{}'", hits.len(), keyword);
    Ok(())
}

fn pressure_cell(score: &Score<'_>) -> String {
    if score.time_pressure > 0.0 {
        format!(
            "{} {} (+{:.0}%)",
            score.pressure.icon,
            score.pressure.level,
            score.time_pressure * 100.0
        )
    } else {
        format!("{} {}", score.pressure.icon, score.pressure.level)
    }
}

/// Shorten text for a table cell, preferring a word boundary when one
/// falls late enough in the cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    match cut.rfind(' ') {
        Some(pos) if pos * 10 >= max * 7 => format!("{}...", &cut[..pos]),
        _ => format!("{}...", cut),
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_text_untouched() {
        assert_eq!(truncate("ship it", 42), "ship it");
    }

    #[test]
    fn truncate_marks_cut_text_and_respects_the_limit() {
        let text = "migrate the billing service to the new message queue";
        let cut = truncate(text, 30);
        assert_eq!(cut, "migrate the billing service...");
        assert!(cut.chars().count() <= 30);
    }

    #[test]
    fn truncate_backs_up_to_a_word_boundary_when_one_falls_late() {
        let text = "coordinate the datacenter failover rehearsal schedule";
        let cut = truncate(text, 40);
        // cut lands mid-word; the boundary at "rehearsal" is past 70% of
        // the limit, so the trailing fragment is dropped
        assert_eq!(cut, "coordinate the datacenter failover...");
    }
}
