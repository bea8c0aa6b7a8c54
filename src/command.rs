//! REPL command parsing.
//!
//! A line is split on whitespace; the first word names the command and the
//! rest are positional arguments. Most commands take a fixed number of
//! arguments, checked before anything runs. `save`, `load` and `exit` are not
//! checked: the first two take an optional store path and ignore extra words.

use crate::error::{Result, UlutoError};

/// A parsed REPL command. Argument values are kept as typed so each handler
/// reports its own conversion errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTodo,
    AddTag { name: String, color: String },
    Mark(String),
    Delete(String),
    Clear(String),
    ChangeTagColor(String),
    ClearScreen,
    Export(String),
    Help,
    Save(Option<String>),
    Load(Option<String>),
    Exit,
}

/// Number of arguments each checked command takes.
pub fn required_args(name: &str) -> Option<usize> {
    match name {
        "add_todo" => Some(0),
        "add_tag" => Some(2),
        "mark" => Some(1),
        "delete" => Some(1),
        "clear" => Some(1),
        "change_tag_color" => Some(1),
        "clearscr" => Some(0),
        "export" => Some(1),
        "help" => Some(0),
        _ => None,
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<String> = words.map(str::to_string).collect();

    if let Some(expected) = required_args(name) {
        if args.len() != expected {
            return Err(UlutoError::ArgumentCount {
                expected,
                got: args.len(),
            });
        }
    }

    let command = match (name, args.as_slice()) {
        ("add_todo", []) => Command::AddTodo,
        ("add_tag", [name, color]) => Command::AddTag {
            name: name.clone(),
            color: color.clone(),
        },
        ("mark", [target]) => Command::Mark(target.clone()),
        ("delete", [position]) => Command::Delete(position.clone()),
        ("clear", [kind]) => Command::Clear(kind.clone()),
        ("change_tag_color", [name]) => Command::ChangeTagColor(name.clone()),
        ("clearscr", []) => Command::ClearScreen,
        ("export", [file]) => Command::Export(file.clone()),
        ("help", []) => Command::Help,
        ("save", rest) => Command::Save(rest.first().cloned()),
        ("load", rest) => Command::Load(rest.first().cloned()),
        ("exit", _) => Command::Exit,
        (other, _) => return Err(UlutoError::InvalidCommand(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \t ").unwrap(), None);
    }

    #[test]
    fn test_checked_commands() {
        assert_eq!(parse("add_todo").unwrap(), Some(Command::AddTodo));
        assert_eq!(
            parse("  add_tag   work  blue ").unwrap(),
            Some(Command::AddTag { name: "work".into(), color: "blue".into() })
        );
        assert_eq!(parse("mark all").unwrap(), Some(Command::Mark("all".into())));
        assert_eq!(parse("delete 2").unwrap(), Some(Command::Delete("2".into())));
        assert_eq!(parse("clear done").unwrap(), Some(Command::Clear("done".into())));
        assert_eq!(parse("change_tag_color work").unwrap(), Some(Command::ChangeTagColor("work".into())));
        assert_eq!(parse("clearscr").unwrap(), Some(Command::ClearScreen));
        assert_eq!(parse("export out.json").unwrap(), Some(Command::Export("out.json".into())));
        assert_eq!(parse("help").unwrap(), Some(Command::Help));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let err = parse("mark").unwrap_err();
        assert_eq!(err.to_string(), "expected 1 argument(s), got 0.");

        let err = parse("add_tag work").unwrap_err();
        assert!(matches!(err, UlutoError::ArgumentCount { expected: 2, got: 1 }));

        let err = parse("help me please").unwrap_err();
        assert!(matches!(err, UlutoError::ArgumentCount { expected: 0, got: 2 }));
    }

    #[test]
    fn test_unchecked_commands() {
        assert_eq!(parse("save").unwrap(), Some(Command::Save(None)));
        assert_eq!(parse("save a.db b.db").unwrap(), Some(Command::Save(Some("a.db".into()))));
        assert_eq!(parse("load other.db").unwrap(), Some(Command::Load(Some("other.db".into()))));
        assert_eq!(parse("exit now").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn test_invalid_command() {
        let err = parse("foo bar").unwrap_err();
        assert_eq!(err.to_string(), "foo: Invalid command.");
        assert!(required_args("foo").is_none());
    }
}
