use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{Priority, TaskRecord};

/// Dynamic weights never exceed this ceiling.
pub const WEIGHT_CEILING: f64 = 150.0;

/// Display and scoring data for one quadrant of the matrix.
#[derive(Debug)]
pub struct QuadrantInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub action: &'static str,
    pub label: &'static str,
    /// prettytable cell style for the quadrant column.
    pub style: &'static str,
    pub weight: f64,
    pub tips: [&'static str; 2],
}

/// One rung of the time-pressure ladder: applies when the remaining days
/// until the deadline are at most `ceiling_days`.
#[derive(Debug)]
pub struct PressureLevel {
    pub ceiling_days: i64,
    pub coefficient: f64,
    pub level: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub advice: &'static str,
}

/// Immutable scoring tables, built once at startup and passed by reference
/// into every scoring call. Nothing here changes at runtime.
#[derive(Debug)]
pub struct PriorityConfig {
    quadrants: [QuadrantInfo; 4],
    type_weights: &'static [(&'static str, f64)],
    pressure_ladder: [PressureLevel; 5],
    no_pressure: PressureLevel,
}

const TYPE_WEIGHTS: &[(&str, f64)] = &[
    ("emergency", 0.4),
    ("security", 0.4),
    ("bug_fix", 0.35),
    ("deadline", 0.3),
    ("client", 0.3),
    ("meeting", 0.25),
    ("development", 0.2),
    ("communication", 0.15),
    ("research", 0.12),
    ("learning", 0.1),
    ("maintenance", 0.08),
    ("routine", 0.05),
    ("general", 0.0),
];

impl Default for PriorityConfig {
    fn default() -> PriorityConfig {
        PriorityConfig {
            quadrants: [
                QuadrantInfo {
                    name: "Urgent & Important",
                    icon: "🔥",
                    action: "Do it now",
                    label: "Q1",
                    style: "bFr",
                    weight: 100.0,
                    tips: ["clear away distractions", "finish before anything else"],
                },
                QuadrantInfo {
                    name: "Important",
                    icon: "⭐",
                    action: "Schedule it",
                    label: "Q2",
                    style: "bFy",
                    weight: 80.0,
                    tips: ["block out enough time", "review progress regularly"],
                },
                QuadrantInfo {
                    name: "Urgent",
                    icon: "⚡",
                    action: "Delegate it",
                    label: "Q3",
                    style: "bFm",
                    weight: 60.0,
                    tips: ["find the right person", "set a checkpoint"],
                },
                QuadrantInfo {
                    name: "Neither",
                    icon: "📝",
                    action: "Consider dropping it",
                    label: "Q4",
                    style: "bFg",
                    weight: 20.0,
                    tips: ["question its real value", "park it for idle time"],
                },
            ],
            type_weights: TYPE_WEIGHTS,
            pressure_ladder: [
                PressureLevel {
                    ceiling_days: 0,
                    coefficient: 0.5,
                    level: "extreme",
                    desc: "overdue",
                    icon: "🚨",
                    advice: "handle immediately",
                },
                PressureLevel {
                    ceiling_days: 1,
                    coefficient: 0.4,
                    level: "high",
                    desc: "due within a day",
                    icon: "🔥",
                    advice: "schedule it first",
                },
                PressureLevel {
                    ceiling_days: 3,
                    coefficient: 0.3,
                    level: "medium",
                    desc: "due within 3 days",
                    icon: "⚡",
                    advice: "get to it soon",
                },
                PressureLevel {
                    ceiling_days: 7,
                    coefficient: 0.2,
                    level: "low",
                    desc: "due within a week",
                    icon: "⏰",
                    advice: "plan ahead",
                },
                PressureLevel {
                    ceiling_days: i64::MAX,
                    coefficient: 0.1,
                    level: "slight",
                    desc: "more than a week away",
                    icon: "📅",
                    advice: "no rush yet",
                },
            ],
            no_pressure: PressureLevel {
                ceiling_days: i64::MAX,
                coefficient: 0.0,
                level: "none",
                desc: "no deadline",
                icon: "🟢",
                advice: "schedule freely",
            },
        }
    }
}

/// The scored view of one task snapshot.
#[derive(Debug)]
pub struct Score<'a> {
    pub base_weight: f64,
    pub dynamic_weight: f64,
    pub final_priority: Priority,
    pub time_pressure: f64,
    pub pressure: &'a PressureLevel,
    pub remaining_days: Option<i64>,
    pub type_bonus: f64,
    pub effort_bonus: f64,
}

impl PriorityConfig {
    pub fn quadrant(&self, priority: Priority) -> &QuadrantInfo {
        match priority {
            Priority::UrgentImportant => &self.quadrants[0],
            Priority::Important => &self.quadrants[1],
            Priority::Urgent => &self.quadrants[2],
            Priority::Normal => &self.quadrants[3],
        }
    }

    pub fn base_weight(&self, priority: Priority) -> f64 {
        self.quadrant(priority).weight
    }

    /// Type bonus by case-insensitive tag lookup; unknown tags score zero.
    pub fn type_bonus(&self, task_type: &str) -> f64 {
        let tag = task_type.to_lowercase();
        self.type_weights
            .iter()
            .find(|(name, _)| *name == tag)
            .map_or(0.0, |(_, weight)| *weight)
    }

    /// Resolve the time-pressure rung for a deadline. A missing or
    /// malformed due date means no pressure, never an error.
    pub fn pressure(
        &self,
        due_date: Option<&str>,
        now: NaiveDateTime,
    ) -> (&PressureLevel, Option<i64>) {
        let remaining = match due_date.and_then(|d| remaining_days(d, now)) {
            Some(days) => days,
            None => return (&self.no_pressure, None),
        };
        let level = self
            .pressure_ladder
            .iter()
            .find(|l| remaining <= l.ceiling_days)
            .unwrap_or(&self.no_pressure);
        (level, Some(remaining))
    }

    /// Score one resolved snapshot. Pure: same record and same clock give
    /// the same result.
    pub fn score<'a>(&'a self, record: &TaskRecord, now: NaiveDateTime) -> Score<'a> {
        let base_weight = self.base_weight(record.priority);
        let (pressure, remaining_days) = self.pressure(record.due_date.as_deref(), now);
        let type_bonus = self.type_bonus(&record.task_type);
        let effort_bonus = effort_bonus(record.estimated_hours);

        let raw = base_weight * (1.0 + pressure.coefficient + type_bonus + effort_bonus);
        let dynamic_weight = raw.min(WEIGHT_CEILING);

        Score {
            base_weight,
            dynamic_weight,
            final_priority: reclassify(dynamic_weight),
            time_pressure: pressure.coefficient,
            pressure,
            remaining_days,
            type_bonus,
            effort_bonus,
        }
    }
}

/// Whole days between now and the deadline's midnight, floored. A task due
/// today is already at or past zero, which puts it on the overdue rung.
fn remaining_days(due_date: &str, now: NaiveDateTime) -> Option<i64> {
    let due = NaiveDate::parse_from_str(due_date, "%Y-%m-%d").ok()?;
    let midnight = due.and_hms_opt(0, 0, 0)?;
    Some((midnight - now).num_seconds().div_euclid(86_400))
}

/// Effort bonus ladder over estimated hours.
fn effort_bonus(estimated_hours: f64) -> f64 {
    if estimated_hours <= 0.0 {
        0.0
    } else if estimated_hours <= 2.0 {
        0.05
    } else if estimated_hours <= 8.0 {
        0.1
    } else if estimated_hours <= 24.0 {
        0.15
    } else {
        0.2
    }
}

/// Re-derive the displayed quadrant from the dynamic weight. This is
/// independent of the stored base priority: deadline pressure can promote
/// a normal task and a quiet urgent_important task can drop.
fn reclassify(weight: f64) -> Priority {
    if weight >= 120.0 {
        Priority::UrgentImportant
    } else if weight >= 90.0 {
        Priority::Important
    } else if weight >= 60.0 {
        Priority::Urgent
    } else {
        Priority::Normal
    }
}

/// Order scored snapshots by dynamic weight, heaviest first. The sort is
/// stable, so ties keep the caller's input order.
pub fn rank(scored: &mut Vec<(TaskRecord, Score<'_>)>) {
    scored.sort_by(|a, b| b.1.dynamic_weight.total_cmp(&a.1.dynamic_weight));
}
