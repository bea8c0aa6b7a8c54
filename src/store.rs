//! SQLite save files.
//!
//! A save file holds two flat tables, one row per todo and one row per tag:
//!
//! ```sql
//! CREATE TABLE todos(tag TEXT, content TEXT, done BOOLEAN);
//! CREATE TABLE tags(name TEXT, color TEXT);
//! ```
//!
//! A connection is opened and closed inside each call; nothing is held open
//! between commands. Prompting before an overwrite is the caller's job, see
//! [`needs_overwrite_confirmation`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags};

use crate::db::Database;
use crate::error::Result;
use crate::fields::Color;
use crate::todo::Todo;

/// Store used when `save`/`load` get no argument and `--db` is not given.
pub const DEFAULT_STORE: &str = "uluto.db";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todos(tag TEXT, content TEXT, done BOOLEAN);
    CREATE TABLE IF NOT EXISTS tags(name TEXT, color TEXT);
";

/// True when `path` exists and already holds data.
pub fn needs_overwrite_confirmation(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() != 0).unwrap_or(false)
}

/// Copy `path` to `<dir>/backup/<timestamp>_<file name>` and return the copy's path.
pub fn create_backup(path: &Path) -> Result<PathBuf> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent_dir.join("backup");
    fs::create_dir_all(&backup_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_STORE);
    let backup_path = backup_dir.join(format!("{}_{}", timestamp, file_name));

    fs::copy(path, &backup_path)?;
    info!("backed up {} to {}", path.display(), backup_path.display());
    Ok(backup_path)
}

/// Replace whatever is at `path` with the contents of `db`.
///
/// An existing file is removed first; every row is written in one transaction.
pub fn save(path: &Path, db: &Database) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)?;
    {
        let mut insert_todo = tx.prepare("INSERT INTO todos VALUES(?1, ?2, ?3)")?;
        for t in &db.todos {
            insert_todo.execute(params![t.tag, t.content, t.done])?;
        }
        let mut insert_tag = tx.prepare("INSERT INTO tags VALUES(?1, ?2)")?;
        for tag in &db.tags {
            insert_tag.execute(params![tag.name, tag.color.name()])?;
        }
    }
    tx.commit()?;

    info!(
        "saved {} todo(s) and {} tag(s) to {}",
        db.todos.len(),
        db.tags.len(),
        path.display()
    );
    Ok(())
}

/// A save file read back into memory.
#[derive(Debug)]
pub struct Loaded {
    pub db: Database,
    /// `(name, color)` of tag rows left out because the color is not in the palette.
    pub skipped: Vec<(String, String)>,
}

/// Read a save file into a fresh `Database`.
///
/// The file is opened read-only, so a missing path is an error rather than a
/// new empty file. `done` is true only when the stored value is exactly 1.
/// Tag rows with an unknown color are skipped, not fatal; their todos still load.
pub fn load(path: &Path) -> Result<Loaded> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let mut db = Database::default();
    let mut skipped = Vec::new();

    let mut stmt = conn.prepare("SELECT tag, content, done FROM todos ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        let done: Value = row.get(2)?;
        Ok(Todo {
            tag: row.get(0)?,
            content: row.get(1)?,
            done: done == Value::Integer(1),
        })
    })?;
    for todo in rows {
        db.todos.push(todo?);
    }

    let mut stmt = conn.prepare("SELECT name, color FROM tags ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
        let (name, color) = row?;
        match color.parse::<Color>() {
            Ok(c) => db.set_tag(&name, c),
            Err(e) => {
                warn!("skipping tag '{}' in {}: {e}", name, path.display());
                skipped.push((name, color));
            }
        }
    }

    debug!("read {} todo(s) from {}", db.todos.len(), path.display());
    Ok(Loaded { db, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UlutoError;
    use crate::fields::MarkTarget;

    fn sample() -> Database {
        let mut db = Database::default();
        db.set_tag("work", Color::Blue);
        db.set_tag("home", Color::Green);
        db.push_todo("work", "write report");
        db.push_todo("home", "water plants");
        db.push_todo("gym", "leg day");
        db.mark(MarkTarget::Position(1)).unwrap();
        db
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        let db = sample();

        save(&path, &db).unwrap();
        let back = load(&path).unwrap().db;
        assert_eq!(back, db);
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        save(&path, &sample()).unwrap();

        let mut smaller = Database::default();
        smaller.push_todo("misc", "only one");
        save(&path, &smaller).unwrap();

        assert_eq!(load(&path).unwrap().db, smaller);
    }

    #[test]
    fn test_needs_overwrite_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        assert!(!needs_overwrite_confirmation(&path));

        fs::write(&path, b"").unwrap();
        assert!(!needs_overwrite_confirmation(&path));

        save(&path, &sample()).unwrap();
        assert!(needs_overwrite_confirmation(&path));
    }

    #[test]
    fn test_load_missing_file_fails_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.db");
        assert!(matches!(load(&path), Err(UlutoError::Sqlite(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_normalises_done_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foreign.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(
            "INSERT INTO todos VALUES('a', 'one', 1);
             INSERT INTO todos VALUES('a', 'two', 0);
             INSERT INTO todos VALUES('a', 'three', 'True');
             INSERT INTO todos VALUES('a', 'four', 2);
             INSERT INTO tags VALUES('a', 'magenta');",
        )
        .unwrap();
        drop(conn);

        let db = load(&path).unwrap().db;
        let flags: Vec<bool> = db.todos.iter().map(|t| t.done).collect();
        assert_eq!(flags, vec![true, false, false, false]);
        assert_eq!(db.tag_color("a"), Some(Color::Magenta));
    }

    #[test]
    fn test_load_skips_tags_with_unknown_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("older.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(
            "INSERT INTO todos VALUES('work', 'ship it', 0);
             INSERT INTO tags VALUES('work', 'random');
             INSERT INTO tags VALUES('home', 'green');",
        )
        .unwrap();
        drop(conn);

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.skipped, vec![("work".to_string(), "random".to_string())]);
        assert_eq!(loaded.db.todos, vec![Todo::new("work", "ship it")]);
        assert!(!loaded.db.has_tag("work"));
        assert_eq!(loaded.db.tag_color("home"), Some(Color::Green));
    }

    #[test]
    fn test_saved_tag_rows_keep_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.db");
        let mut db = Database::default();
        db.set_tag("zoo", Color::Cyan);
        db.set_tag("apple", Color::Red);
        save(&path, &db).unwrap();

        let conn = Connection::open(&path).unwrap();
        let mut stmt = conn.prepare("SELECT name FROM tags ORDER BY rowid").unwrap();
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(names, vec!["zoo", "apple"]);
        assert_eq!(load(&path).unwrap().db, db);
    }

    #[test]
    fn test_create_backup_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        save(&path, &sample()).unwrap();

        let backup = create_backup(&path).unwrap();
        assert_eq!(backup.parent().unwrap(), dir.path().join("backup"));
        assert!(backup.file_name().unwrap().to_str().unwrap().ends_with("_todos.db"));
        assert_eq!(load(&backup).unwrap().db, sample());
    }
}
