use scrape_console_core::{Msg, PathField};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  set <input|output|invalid> <path>   edit a form field
  pick <input|output|invalid>         open the backend's picker dialog
  defaults                            load default paths
  reset                               clear the form
  run                                 start a scrape run
  history                             refresh run history
  show                                print the console again
  help                                this text
  quit                                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ui(Msg),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs a field: input, output or invalid")]
    MissingField(&'static str),
    #[error("unknown field {0:?}; expected input, output or invalid")]
    UnknownField(String),
}

/// Parses one line of user input. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let (word, rest) = split_word(line);
    if word.is_empty() {
        return Ok(None);
    }

    let command = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let (name, value) = split_word(rest);
            let field = parse_field(name, "set")?;
            Command::Ui(Msg::FieldEdited {
                field,
                value: value.to_string(),
            })
        }
        "pick" => Command::Ui(Msg::PickClicked(parse_field(split_word(rest).0, "pick")?)),
        "defaults" | "load" => Command::Ui(Msg::LoadDefaultsClicked),
        "reset" => Command::Ui(Msg::ResetClicked),
        "run" | "submit" => Command::Ui(Msg::SubmitClicked),
        "history" | "refresh" => Command::Ui(Msg::RefreshHistoryClicked),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_field(name: &str, command: &'static str) -> Result<PathField, CommandError> {
    if name.is_empty() {
        return Err(CommandError::MissingField(command));
    }
    PathField::parse(name).ok_or_else(|| CommandError::UnknownField(name.to_string()))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text.trim_end(), ""),
    }
}
