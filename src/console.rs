//! Line-oriented command language for the terminal front end.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::session::{FormField, Session, UnknownName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Client,
    Courier,
    Reviews,
    Back,
    Tab(String),
    Set(FormField, String),
    Create,
    Accept(String),
    Start(String),
    Complete(String),
    Release(String),
    Cancel(String),
    Rate { id: String, rating: u64, review: String },
    Show,
    Dump,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    UnknownName(#[from] UnknownName),
}

pub const HELP: &str = "\
commands:
  client | courier | reviews | back     switch screen
  tab <name>                            switch tab on the current screen
  set <address|description|price> <v>   fill the new-order form
  create                                submit the form
  accept <id> | start <id> | complete <id> | release <id>
  cancel <id>                           cancel one of your orders
  rate <id> <1-5> [review]              rate a completed order
  show | dump | help | quit";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let id_arg = |usage: &'static str| -> Result<String, ParseError> {
            match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
                [id] => Ok(id.to_string()),
                _ => Err(ParseError::Usage(usage)),
            }
        };

        match word {
            "" => Err(ParseError::Empty),
            "client" => Ok(Command::Client),
            "courier" => Ok(Command::Courier),
            "reviews" => Ok(Command::Reviews),
            "back" => Ok(Command::Back),
            "tab" => id_arg("tab <name>").map(Command::Tab),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(ParseError::Usage("set <address|description|price> <value>"));
                }
                let field = field.parse()?;
                Ok(Command::Set(field, value.trim().to_string()))
            }
            "create" => Ok(Command::Create),
            "accept" => id_arg("accept <id>").map(Command::Accept),
            "start" => id_arg("start <id>").map(Command::Start),
            "complete" => id_arg("complete <id>").map(Command::Complete),
            "release" => id_arg("release <id>").map(Command::Release),
            "cancel" => id_arg("cancel <id>").map(Command::Cancel),
            "rate" => {
                const USAGE: &str = "rate <id> <1-5> [review]";
                let mut parts = rest.splitn(3, char::is_whitespace);
                let id = parts.next().filter(|s| !s.is_empty()).ok_or(ParseError::Usage(USAGE))?;
                let rating = parts
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ParseError::Usage(USAGE))?;
                let review = parts.next().unwrap_or("").trim().to_string();
                Ok(Command::Rate {
                    id: id.to_string(),
                    rating,
                    review,
                })
            }
            "show" => Ok(Command::Show),
            "dump" => Ok(Command::Dump),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// What the front end should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Redraw the current screen.
    Render,
    /// Print this text instead of redrawing.
    Print(String),
    Quit,
}

/// Runs one command against the session.
///
/// Lifecycle failures are already reported through the session's notifier, so they
/// only end up in the debug log here.
pub async fn execute(session: &mut Session, command: Command) -> Step {
    let outcome = match command {
        Command::Client => {
            session.select_client();
            Ok(())
        }
        Command::Courier => {
            session.select_courier();
            Ok(())
        }
        Command::Reviews => {
            session.show_reviews();
            Ok(())
        }
        Command::Back => {
            session.back();
            Ok(())
        }
        Command::Tab(name) => {
            session.open_tab(&name);
            Ok(())
        }
        Command::Set(field, value) => {
            session.set_field(field, value);
            Ok(())
        }
        Command::Create => session.create_order().await.map(drop),
        Command::Accept(id) => session.accept_order(&id).await.map(drop),
        Command::Start(id) => session.start_work(&id).await.map(drop),
        Command::Complete(id) => session.complete_order(&id).await.map(drop),
        Command::Release(id) => session.release_order(&id).await.map(drop),
        Command::Cancel(id) => session.cancel_order(&id).await.map(drop),
        Command::Rate { id, rating, review } => session.rate_order(&id, rating, &review).await.map(drop),
        Command::Show => Ok(()),
        Command::Dump => {
            return match session.orders().await {
                Ok(orders) => match serde_json::to_string_pretty(&orders) {
                    Ok(json) => Step::Print(json),
                    Err(e) => Step::Print(format!("failed to serialize orders: {e}")),
                },
                Err(e) => Step::Print(format!("failed to read orders: {e}")),
            };
        }
        Command::Help => return Step::Print(HELP.to_string()),
        Command::Quit => return Step::Quit,
    };
    if let Err(e) = outcome {
        debug!(error = %e, "Command failed");
    }
    Step::Render
}
