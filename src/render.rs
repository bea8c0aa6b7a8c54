//! Listing, greeting and help text.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Attribute, Color as TermColor, Stylize};
use crossterm::terminal::{Clear, ClearType};

use crate::db::Database;
use crate::error::{Result, UlutoError};

pub const EMPTY_LIST: &str = "You have no todo right now.";

const HELP: &str = "
    add_todo: Add a new todo
    add_tag <name> <color>: Add a new tag
    mark <all | position of todo from 0>: Mark a todo as done (or undone)
    delete <position of todo from 0>: Delete a specific todo (use 'clear all' to delete every todo)
    clear <done | all>: Clear finished todos or all todos
    change_tag_color <tag_name>: Change color of a tag
    clearscr: Clear the screen
    export <file>: Write the todos and tags to a JSON file
    save <db_name?>: Save the todos into the database
    load <db_name?>: Load information to the todo list from the database
    help: Print this help message
    exit: Exit this program
";

/// Wrap `text` in `color` when coloring is on.
pub fn paint(text: &str, color: TermColor, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Render every todo as `tag: content [Done!]`, one per line.
///
/// Fails without producing any output when a todo's tag has no color.
pub fn render_todos(db: &Database, color: bool) -> Result<String> {
    if db.is_empty() {
        return Ok(format!("{EMPTY_LIST}\n"));
    }
    let mut out = String::new();
    for todo in &db.todos {
        let tag_color = db
            .tag_color(&todo.tag)
            .ok_or_else(|| UlutoError::UnregisteredTag(todo.tag.clone()))?;
        let done = if todo.done {
            format!(" {}", paint("Done!", TermColor::DarkGreen, color))
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{}: {}{}\n",
            paint(&todo.tag, tag_color.terminal(), color),
            todo.content,
            done
        ));
    }
    Ok(out)
}

pub fn greeting(color: bool) -> String {
    format!(
        "\n{} - Ultimate Luto, version {}.\nType 'help' for help, and 'exit' to quit.\n",
        paint("ULuto", TermColor::DarkRed, color),
        env!("CARGO_PKG_VERSION")
    )
}

pub fn help(color: bool) -> String {
    let title = if color {
        "Commands:".attribute(Attribute::Bold).to_string()
    } else {
        "Commands:".to_string()
    };
    format!("{title}{HELP}")
}

/// Clear the terminal and move the cursor home.
pub fn clear_screen<W: Write>(out: &mut W) -> Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
