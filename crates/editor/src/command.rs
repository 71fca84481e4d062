//! Line commands for the terminal front end.

use std::path::PathBuf;

use thiserror::Error;

use storefront_core::{DomainError, ProductId};

use crate::form::FormField;
use crate::session::UserEvent;

pub const HELP: &str = "\
commands:
  name <text> | description <text> | price <text>   fill the form
  image <path>                                      attach a JPG/PNG image
  submit                                            add the product
  sort name | sort price                            reorder the list
  search [text]                                     live filter (empty clears)
  edit <id>                                         load a product into the form
  delete <id>, then confirm | cancel                remove a product
  rate <id> <1-5>                                   rate a product
  show | json | help | quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UserEvent),
    /// Read the file at the path and feed it through image intake.
    LoadImage(PathBuf),
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Id(#[from] DomainError),
}

/// Parse a single input line. Blank lines parse as `Show`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "" | "show" | "list" => Command::Show,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "name" => set_field(FormField::Name, rest),
        "description" | "desc" => set_field(FormField::Description, rest),
        "price" => set_field(FormField::Price, rest),
        "image" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("image <path>"));
            }
            Command::LoadImage(PathBuf::from(rest))
        }
        "submit" => Command::Event(UserEvent::Submit),
        "sort" => match rest.to_ascii_lowercase().as_str() {
            "name" => Command::Event(UserEvent::SortByName),
            "price" => Command::Event(UserEvent::SortByPrice),
            _ => return Err(CommandError::Usage("sort name | sort price")),
        },
        "search" => Command::Event(UserEvent::Search(rest.to_string())),
        "edit" => Command::Event(UserEvent::Edit(parse_id(rest, "edit <id>")?)),
        "delete" => Command::Event(UserEvent::RequestDelete(parse_id(rest, "delete <id>")?)),
        "confirm" => Command::Event(UserEvent::ConfirmDelete),
        "cancel" => Command::Event(UserEvent::CancelDelete),
        "rate" => {
            let Some((id, raw)) = rest.split_once(char::is_whitespace) else {
                return Err(CommandError::Usage("rate <id> <1-5>"));
            };
            Command::Event(UserEvent::SubmitRating {
                id: parse_id(id, "rate <id> <1-5>")?,
                raw: raw.trim().to_string(),
            })
        }
        _ => return Err(CommandError::Unknown(head.to_string())),
    };
    Ok(command)
}

fn set_field(field: FormField, value: &str) -> Command {
    Command::Event(UserEvent::SetField {
        field,
        value: value.to_string(),
    })
}

fn parse_id(raw: &str, usage: &'static str) -> Result<ProductId, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(raw.parse::<ProductId>()?)
}
