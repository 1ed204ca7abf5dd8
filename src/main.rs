use std::path::PathBuf;

use anyhow::anyhow;
use directories::ProjectDirs;
use rusqlite::Connection;
use structopt::StructOpt;

use eisen::cli::{Command::*, CommandLineArgs};
use eisen::model::init_log;
use eisen::priority::PriorityConfig;
use eisen::{interface, transfer};

fn find_default_journal_file() -> Option<PathBuf> {
    let base_dirs = ProjectDirs::from("com", "eisen", "eisen")?;
    let root_dir = base_dirs.data_dir();
    if !root_dir.exists() {
        std::fs::create_dir_all(root_dir).ok()?;
    }
    let mut path = PathBuf::from(root_dir);
    path.push("journal.sqlite");
    Some(path)
}

/// Open the journal database, creating the log schema if needed.
fn get_journal_db(journal_path: PathBuf) -> anyhow::Result<Connection> {
    let db = Connection::open(&journal_path)?;
    init_log(&db)?;
    Ok(db)
}

fn main() -> anyhow::Result<()> {
    let CommandLineArgs {
        action,
        journal_file,
    } = CommandLineArgs::from_args();

    let journal_file = journal_file
        .or_else(find_default_journal_file)
        .ok_or_else(|| anyhow!("Failed to find journal file."))?;

    let db = get_journal_db(journal_file)?;
    let config = PriorityConfig::default();

    match action {
        Add {
            description,
            priority,
            due,
            task_type,
            hours,
        } => interface::add(&db, &description, priority, due.as_deref(), &task_type, hours),
        Update { uuid, field, value } => interface::update_field(&db, &uuid, &field, &value),
        Done { uuid } => interface::done(&db, &uuid),
        Rm { uuid } => interface::remove(&db, &uuid),
        Restore { uuid } => interface::restore(&db, &uuid),
        List { status, basic } => {
            if basic {
                interface::list_basic(&db, status)
            } else {
                interface::list(&db, &config, status)
            }
        }
        Matrix => interface::matrix(&db, &config),
        Show { uuid } => interface::show(&db, &config, &uuid),
        Analyze { uuid } => interface::analyze(&db, &config, &uuid),
        Search { keyword } => interface::search(&db, &keyword),
        Export { path } => transfer::export(&db, path).map(|_| ()),
        Import { path } => transfer::import(&db, &path).map(|_| ()),
    }?;
    Ok(())
}
