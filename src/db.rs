//! In-memory todo list and tag registry.
//!
//! This module provides the `Database` struct holding the ordered todos and
//! the tag colors, along with the mutations the REPL commands apply to it.
//! None of these functions prompt; the interactive parts live in `session`.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UlutoError};
use crate::fields::{ClearKind, Color, MarkTarget};
use crate::todo::{Tag, Todo};

/// Todos in display order plus the tag registry, kept in the order tags were
/// first added. Tag names are unique.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Database {
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Color registered for `name`, if any.
    pub fn tag_color(&self, name: &str) -> Option<Color> {
        self.tags.iter().find(|t| t.name == name).map(|t| t.color)
    }

    /// Append a new, unfinished todo. The tag is not checked against the registry.
    pub fn push_todo(&mut self, tag: &str, content: &str) {
        self.todos.push(Todo::new(tag, content));
    }

    /// Insert or overwrite a tag's color. An overwritten tag keeps its place.
    pub fn set_tag(&mut self, name: &str, color: Color) {
        match self.tags.iter_mut().find(|t| t.name == name) {
            Some(tag) => tag.color = color,
            None => self.tags.push(Tag {
                name: name.to_string(),
                color,
            }),
        }
    }

    /// Toggle `done` on one todo, or on every todo independently.
    pub fn mark(&mut self, target: MarkTarget) -> Result<()> {
        match target {
            MarkTarget::All => {
                for t in self.todos.iter_mut() {
                    t.done = !t.done;
                }
            }
            MarkTarget::Position(idx) => {
                let len = self.todos.len();
                let t = self
                    .todos
                    .get_mut(idx)
                    .ok_or(UlutoError::OutOfRange { index: idx, len })?;
                t.done = !t.done;
            }
        }
        Ok(())
    }

    /// Remove and return the todo at `idx`.
    pub fn delete(&mut self, idx: usize) -> Result<Todo> {
        if idx >= self.todos.len() {
            return Err(UlutoError::OutOfRange {
                index: idx,
                len: self.todos.len(),
            });
        }
        Ok(self.todos.remove(idx))
    }

    /// Remove finished todos or every todo, returning how many went.
    ///
    /// `Done` only looks at positions before the last one: a finished final
    /// todo survives.
    pub fn clear(&mut self, kind: ClearKind) -> usize {
        let before = self.todos.len();
        match kind {
            ClearKind::All => self.todos.clear(),
            ClearKind::Done => {
                let last = before.saturating_sub(1);
                let mut idx = 0;
                self.todos.retain(|t| {
                    let keep = idx >= last || !t.done;
                    idx += 1;
                    keep
                });
            }
        }
        before - self.todos.len()
    }

    /// Write a JSON snapshot using an atomic write (temp file + rename).
    pub fn export(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}
