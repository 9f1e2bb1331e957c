//! Interactive shell
//!
//! Reads one command per line from stdin. Errors are reported and the loop
//! keeps going; only `exit` or end of input ends the session.

use anyhow::Result;
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{execute, Action, Flow, Session, WriteOp};
use crate::output::{ErrorMessage, Outputter};

pub const HELP: &str = "\
Commands:
  help                          Show this help
  route START END               Shortest route between two nodes
  list-nodes                    List all nodes
  list-edges                    List all edges
  add-node NAME X Y             Add a node (not supported)
  add-edge FROM TO WEIGHT       Add an edge (not supported)
  remove-node NAME              Remove a node (not supported)
  remove-edge FROM TO           Remove an edge (not supported)
  reload                        Reload the graph and recompute routes
  status                        Show database and navigator status
  exit | quit | q               Leave the shell";

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help'.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid number: {value}")]
    InvalidNumber { value: String },
}

fn number(value: &str) -> Result<f64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        value: value.to_string(),
    })
}

/// Parse one shell line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(None);
    };

    let action = match (command.to_lowercase().as_str(), args) {
        ("help" | "?", []) => Action::Help,
        ("exit" | "quit" | "q", []) => Action::Exit,
        ("route" | "r", [start, end]) => Action::Route {
            start: start.to_string(),
            end: end.to_string(),
        },
        ("route" | "r", _) => return Err(ParseError::Usage("route START END")),
        ("list-nodes" | "nodes", []) => Action::ListNodes,
        ("list-edges" | "edges", []) => Action::ListEdges,
        ("add-node", [name, x, y]) => Action::Write(WriteOp::AddNode {
            name: name.to_string(),
            x: number(x)?,
            y: number(y)?,
        }),
        ("add-node", _) => return Err(ParseError::Usage("add-node NAME X Y")),
        ("add-edge", [from, to, weight]) => Action::Write(WriteOp::AddEdge {
            from: from.to_string(),
            to: to.to_string(),
            weight: number(weight)?,
        }),
        ("add-edge", _) => return Err(ParseError::Usage("add-edge FROM TO WEIGHT")),
        ("remove-node", [name]) => Action::Write(WriteOp::RemoveNode {
            name: name.to_string(),
        }),
        ("remove-node", _) => return Err(ParseError::Usage("remove-node NAME")),
        ("remove-edge", [from, to]) => Action::Write(WriteOp::RemoveEdge {
            from: from.to_string(),
            to: to.to_string(),
        }),
        ("remove-edge", _) => return Err(ParseError::Usage("remove-edge FROM TO")),
        ("reload", []) => Action::Reload,
        ("status" | "st", []) => Action::Status,
        _ => return Err(ParseError::UnknownCommand(command.to_string())),
    };
    Ok(Some(action))
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn report(session: &Session, err: &anyhow::Error) {
    println!("{}", ErrorMessage::from_error(err).render(session.output()));
}

pub async fn run(session: &Session) -> Result<()> {
    println!("Navigator shell on {}", session.db_path().display());
    println!("Type 'help' for commands, 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => {
                println!("Tip: type 'help'.");
                continue;
            }
            Err(e) => {
                report(session, &e.into());
                continue;
            }
        };

        match execute(session, action).await {
            Ok(Flow::Exit) => {
                println!("Bye.");
                break;
            }
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::debug!("Shell command failed: {:#}", e);
                report(session, &e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Action {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn test_route_keeps_name_case() {
        assert_eq!(
            parse("ROUTE Harbor mill"),
            Action::Route {
                start: "Harbor".to_string(),
                end: "mill".to_string()
            }
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("nodes"), Action::ListNodes);
        assert_eq!(parse("list-edges"), Action::ListEdges);
        assert_eq!(parse("q"), Action::Exit);
        assert_eq!(parse("quit"), Action::Exit);
        assert_eq!(parse("st"), Action::Status);
    }

    #[test]
    fn test_write_commands_parse_numbers() {
        assert_eq!(
            parse("add-node Z -1.5 2"),
            Action::Write(WriteOp::AddNode {
                name: "Z".to_string(),
                x: -1.5,
                y: 2.0
            })
        );
        assert_eq!(
            parse_line("add-edge A B heavy"),
            Err(ParseError::InvalidNumber {
                value: "heavy".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_arity_shows_usage() {
        assert_eq!(
            parse_line("route A"),
            Err(ParseError::Usage("route START END"))
        );
        assert_eq!(
            parse_line("remove-edge A"),
            Err(ParseError::Usage("remove-edge FROM TO"))
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_line("teleport A").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command 'teleport'. Type 'help'.");
    }
}
