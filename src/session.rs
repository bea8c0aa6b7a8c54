//! The REPL: one `Session` owns the todo list, the dirty flag and the console,
//! and runs commands until `exit` (or end of input).

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::command::{self, Command};
use crate::console::Console;
use crate::db::Database;
use crate::error::{Result, UlutoError};
use crate::fields::{parse_position, ClearKind, Color, ColorAnswer, MarkTarget};
use crate::render;
use crate::store;

const PROMPT: &str = ">> ";

/// Launch-time configuration for a session.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Store used by `save`/`load` without an argument and by `exit`.
    pub store: PathBuf,
    pub color: bool,
    /// Copy a save file aside before overwriting it.
    pub backup: bool,
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    db: Database,
    has_changed: bool,
    /// Last store successfully saved to or loaded from.
    store: PathBuf,
    backup: bool,
    console: Console<R, W>,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, console: Console<R, W>) -> Self {
        Session {
            db: Database::default(),
            has_changed: false,
            store: settings.store,
            backup: settings.backup,
            console,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source used to resolve `random` colors.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    pub fn store(&self) -> &Path {
        &self.store
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Greet, then render and dispatch until `exit` or end of input.
    ///
    /// Only failures to write to the console end the loop early.
    pub fn run(&mut self) -> Result<()> {
        let greeting = render::greeting(self.console.color);
        self.console.say(&greeting)?;
        loop {
            self.show_todos()?;
            let Some(line) = self.console.read_line(PROMPT)? else {
                debug!("end of input, exiting");
                self.console.say("")?;
                self.exit()?;
                return Ok(());
            };
            if self.handle_line(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Print the listing, or the reason it cannot be printed.
    pub fn show_todos(&mut self) -> Result<()> {
        match render::render_todos(&self.db, self.console.color) {
            Ok(listing) => self.console.print(&listing),
            Err(e) => self.report(&e),
        }
    }

    /// Parse and run one input line, reporting any command error.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let cmd = match command::parse(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.report(&e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("dispatching {:?}", cmd);
        match self.execute(cmd) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                self.report(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<Flow> {
        match cmd {
            Command::AddTodo => self.add_todo()?,
            Command::AddTag { name, color } => self.add_tag(&name, &color)?,
            Command::Mark(target) => self.mark(&target)?,
            Command::Delete(position) => self.delete(&position)?,
            Command::Clear(kind) => self.clear(&kind)?,
            Command::ChangeTagColor(name) => self.change_tag_color(&name)?,
            Command::ClearScreen => render::clear_screen(self.console.output())?,
            Command::Export(file) => self.export(Path::new(&file))?,
            Command::Help => {
                let help = render::help(self.console.color);
                self.console.say(&help)?;
            }
            Command::Save(target) => self.save(target)?,
            Command::Load(target) => self.load(target)?,
            Command::Exit => {
                self.exit()?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &UlutoError) -> Result<()> {
        if err.is_bare() {
            self.console.say(&err.to_string())
        } else {
            self.console.say(&format!("Error: {err}"))
        }
    }

    fn add_todo(&mut self) -> Result<()> {
        let tag = self.console.ask("Tag: ")?;
        let content = self.console.ask("Content: ")?;

        if !self.db.has_tag(&tag) {
            let create = self
                .console
                .yes_no(&format!("Tag '{tag}' hasn't been created yet. Create tag?"))?;
            if create {
                let color = self.console.ask_color("Tag color", &mut self.rng)?;
                self.register_tag(&tag, color)?;
            }
        }

        self.db.push_todo(&tag, &content);
        self.has_changed = true;
        self.console.say("Todo added successfully.")
    }

    fn add_tag(&mut self, name: &str, color: &str) -> Result<()> {
        let color = match color.parse::<ColorAnswer>() {
            Ok(ColorAnswer::Color(c)) => c,
            Ok(ColorAnswer::Random) => Color::random(&mut self.rng),
            Ok(ColorAnswer::Help) | Err(_) => return Err(UlutoError::InvalidColor(color.to_string())),
        };
        self.register_tag(name, color)
    }

    fn register_tag(&mut self, name: &str, color: Color) -> Result<()> {
        self.db.set_tag(name, color);
        self.has_changed = true;
        self.console.say(&format!("New tag '{name}' added successfully."))
    }

    fn mark(&mut self, target: &str) -> Result<()> {
        let target: MarkTarget = target.parse()?;
        self.db.mark(target)?;
        self.has_changed = true;
        Ok(())
    }

    fn delete(&mut self, position: &str) -> Result<()> {
        let idx = parse_position(position)?;
        self.db.delete(idx)?;
        self.has_changed = true;
        self.console.say("Todo deleted successfully.")
    }

    fn clear(&mut self, kind: &str) -> Result<()> {
        let kind: ClearKind = kind.parse()?;
        if self.db.clear(kind) > 0 {
            self.has_changed = true;
        }
        Ok(())
    }

    fn change_tag_color(&mut self, name: &str) -> Result<()> {
        let color = self.console.ask_color("New tag color", &mut self.rng)?;
        self.db.set_tag(name, color);
        self.has_changed = true;
        self.console.say("Tag color changed successfully.")
    }

    fn export(&mut self, path: &Path) -> Result<()> {
        self.db.export(path)?;
        info!("exported {} todo(s) to {}", self.db.todos.len(), path.display());
        self.console.say(&format!(
            "Exported {} todo(s) to {}.",
            self.db.todos.len(),
            path.display()
        ))
    }

    fn target(&self, target: Option<String>) -> PathBuf {
        target.map(PathBuf::from).unwrap_or_else(|| self.store.clone())
    }

    fn save(&mut self, target: Option<String>) -> Result<()> {
        let path = self.target(target);
        match self.write_store(&path) {
            Ok(()) => {
                self.store = path;
                self.has_changed = false;
                self.console.say("Save to database successfully.")
            }
            Err(e) => {
                warn!("save to {} failed: {e}", path.display());
                self.console.say(&format!("Error when saving database: {e}"))
            }
        }
    }

    fn write_store(&mut self, path: &Path) -> Result<()> {
        if store::needs_overwrite_confirmation(path) {
            let overwrite = self
                .console
                .yes_no("This database has been written before. Overwrite?")?;
            if !overwrite {
                return Err(UlutoError::OverwriteDeclined(path.to_path_buf()));
            }
            if self.backup {
                store::create_backup(path)?;
            }
        }
        store::save(path, &self.db)
    }

    /// Read the store into a staged list and swap it in only if the read succeeded.
    fn load(&mut self, target: Option<String>) -> Result<()> {
        let path = self.target(target);
        match store::load(&path) {
            Ok(loaded) => {
                info!("loaded {} todo(s) from {}", loaded.db.todos.len(), path.display());
                for (name, color) in &loaded.skipped {
                    let err = UlutoError::InvalidColor(color.clone());
                    self.console.say(&format!("Skipped tag '{name}': {err}"))?;
                }
                self.db = loaded.db;
                self.store = path;
                self.has_changed = false;
                self.console.say("Load from database successfully.")
            }
            Err(e) => {
                warn!("load from {} failed: {e}", path.display());
                self.console.say(&format!("Error when loading database: {e}"))
            }
        }
    }

    /// Offer to save unsaved changes. End of input counts as "no".
    fn exit(&mut self) -> Result<()> {
        if !self.has_changed {
            return Ok(());
        }
        let save = match self.console.yes_no("You haven't saved your todos yet. Save?") {
            Ok(answer) => answer,
            Err(UlutoError::InputClosed) => false,
            Err(e) => return Err(e),
        };
        if save {
            self.save(None)?;
        }
        Ok(())
    }
}
