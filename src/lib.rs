//! # ULuto - Ultimate Luto
//!
//! An interactive, single-user todo list for the terminal.
//!
//! Todos carry a tag, and tags carry one of six display colors. The REPL
//! renders the list before every prompt and accepts short commands:
//!
//! ```text
//! >> add_tag work blue
//! >> add_todo
//! >> mark 0
//! >> clear done
//! >> save
//! ```
//!
//! State lives in memory until `save` writes it to a SQLite file (`uluto.db`
//! by default). `load` reads one back, replacing the current list only when
//! the whole file was read. Leaving with unsaved changes asks whether to save.

pub mod cli;
pub mod command;
pub mod console;
pub mod db;
pub mod error;
pub mod fields;
pub mod render;
pub mod session;
pub mod store;
pub mod todo;
