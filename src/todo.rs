//! Todo data structure.
//!
//! A todo has no identity beyond its position in the owning list; deleting one
//! shifts every later position down by one.

use serde::{Deserialize, Serialize};

use crate::fields::Color;

/// A single task with its tag, text and completion flag.
///
/// `tag` names an entry of the tag registry but does not own it; the registry
/// may not contain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub tag: String,
    pub content: String,
    pub done: bool,
}

impl Todo {
    /// Create an unfinished todo.
    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Todo {
            tag: tag.into(),
            content: content.into(),
            done: false,
        }
    }
}

/// A tag name and the color it renders in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub color: Color,
}
