//! Interactive browsing.
//!
//! A [`PagingController`] owns page, page size and filter. Each command
//! becomes a controller transition; the controller issues a ticket, a
//! [`Fetcher`] runs it as a tokio task, and the result comes back through a
//! channel to be applied. Results of superseded tickets are dropped by the
//! controller, so typing `n n n` quickly ends on the third page whatever order
//! the responses arrive in.
//!
//! Input is read only while no fetch is outstanding. A command therefore sees
//! the page the previous one produced, and end of input never drops a page.

use super::commands::Connection;
use super::render::{render_created, render_error, render_page, render_violations};
use anyhow::Context;
use pokedexapp::client::notify_created;
use pokedexapp::client::paging::{Applied, FetchDispatch, FetchTicket, PagingController, Step};
use pokedexapp::model::{CreateOutcome, PageResponse};
use pokedexapp::validation::candidate_from_form;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::debug;

const HELP: &str = "\
Commands:
  n, next             next page
  p, prev             previous page
  page N              go to page N
  size N              show N records per page
  filter TYPES        only records with any of TYPES (comma-separated)
  clear               drop the filter
  add NAME | TYPES | SPRITE
                      create a record
  r, refresh          fetch the current page again
  h, help             this help
  q, quit             leave";

const EMPTY_FILTER: &str = "Enter multiple types separated by comma to filter the list";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    /// Zero-based page index.
    Page(usize),
    Size(usize),
    Filter(String),
    Clear,
    Add {
        name: String,
        types: String,
        sprite: String,
    },
    Refresh,
    Help,
    Quit,
}

/// Parses one input line. Blank lines are `Ok(None)`.
pub fn parse_browse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Prev,
        "page" => {
            let number = parse_positive(rest, "page")?;
            BrowseCommand::Page(number - 1)
        }
        "size" => BrowseCommand::Size(parse_positive(rest, "size")?),
        "filter" | "f" => {
            if rest.split(',').all(|t| t.trim().is_empty()) {
                return Err(EMPTY_FILTER.to_string());
            }
            BrowseCommand::Filter(rest.to_string())
        }
        "clear" => BrowseCommand::Clear,
        "add" => parse_add(rest)?,
        "r" | "refresh" => BrowseCommand::Refresh,
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

fn parse_positive(arg: &str, what: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("Usage: {} N, with N a positive number", what)),
    }
}

fn parse_add(rest: &str) -> Result<BrowseCommand, String> {
    let parts: Vec<&str> = rest.splitn(3, '|').map(str::trim).collect();
    match parts.as_slice() {
        [name, types, sprite] => Ok(BrowseCommand::Add {
            name: name.to_string(),
            types: types.to_string(),
            sprite: sprite.to_string(),
        }),
        _ => Err("Usage: add NAME | TYPES | SPRITE".to_string()),
    }
}

type FetchResult = (FetchTicket, Result<PageResponse, String>);

/// Runs each ticket against the connection on its own task.
struct Fetcher {
    connection: Arc<Connection>,
    results: UnboundedSender<FetchResult>,
}

impl FetchDispatch for Fetcher {
    fn dispatch(&mut self, ticket: FetchTicket) {
        let connection = Arc::clone(&self.connection);
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = connection
                .list(&ticket.query)
                .await
                .map_err(|e| format!("{:#}", e));
            if results.send((ticket, result)).is_err() {
                debug!("browser closed before fetch finished");
            }
        });
    }
}

fn draw(controller: &PagingController<Fetcher>) {
    let Some(view) = controller.view() else {
        return;
    };
    let (page_number, page_size) = match controller.view_query() {
        Some(query) => (
            usize::try_from(query.page).unwrap_or(1),
            usize::try_from(query.page_size).unwrap_or(1),
        ),
        None => (controller.state().page + 1, controller.state().page_size),
    };
    let filter = &controller.state().filter_text;
    if !filter.trim().is_empty() {
        println!("Filter: {}", filter.trim());
    }
    print!("{}", render_page(view, page_number, page_size));
}

pub async fn run(
    connection: Connection,
    page_size: usize,
    query: Option<String>,
) -> anyhow::Result<()> {
    let connection = Arc::new(connection);
    let (results_tx, mut results_rx) = unbounded_channel::<FetchResult>();
    let fetcher = Fetcher {
        connection: Arc::clone(&connection),
        results: results_tx,
    };
    let mut controller = PagingController::new(fetcher).with_page_size(page_size);

    match query {
        Some(query) if !query.trim().is_empty() => controller.change_filter(query),
        _ => controller.start(),
    }
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some((ticket, result)) = results_rx.recv() => {
                match controller.apply(&ticket, result) {
                    Applied::Rendered => draw(&controller),
                    Applied::Failed => {
                        let message = controller.last_error().unwrap_or("fetch failed");
                        eprintln!("{}", render_error(message));
                    }
                    Applied::Stale => {}
                }
            }
            line = lines.next_line(), if !controller.is_loading() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_browse_command(&line) {
                    Ok(Some(BrowseCommand::Quit)) => break,
                    Ok(Some(command)) => handle(&mut controller, &connection, command).await,
                    Ok(None) => {}
                    Err(message) => eprintln!("{}", render_error(&message)),
                }
            }
        }
    }
    Ok(())
}

async fn handle(
    controller: &mut PagingController<Fetcher>,
    connection: &Connection,
    command: BrowseCommand,
) {
    match command {
        BrowseCommand::Next => match controller.next_page() {
            Step::Moved => {}
            Step::AtEdge => println!("Already on the last page."),
            Step::Pending => println!("Page not loaded yet, try 'refresh'."),
        },
        BrowseCommand::Prev => {
            if controller.prev_page() == Step::AtEdge {
                println!("Already on the first page.");
            }
        }
        BrowseCommand::Page(page) => controller.change_page(page),
        BrowseCommand::Size(size) => controller.change_page_size(size),
        BrowseCommand::Filter(types) => controller.change_filter(types),
        BrowseCommand::Clear => controller.change_filter(""),
        BrowseCommand::Add { name, types, sprite } => {
            let outcome = connection
                .create(candidate_from_form(&name, &types, &sprite))
                .await;
            match &outcome {
                CreateOutcome::Created(record) => println!("{}", render_created(record)),
                CreateOutcome::Invalid(violations) => {
                    eprintln!("{}", render_violations(violations))
                }
                CreateOutcome::Failed(message) => eprintln!("{}", render_error(message)),
            }
            notify_created(&outcome, controller);
        }
        BrowseCommand::Refresh => controller.external_invalidate(),
        BrowseCommand::Help => println!("{}", HELP),
        BrowseCommand::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> BrowseCommand {
        parse_browse_command(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse("n"), BrowseCommand::Next);
        assert_eq!(parse("  prev "), BrowseCommand::Prev);
        assert_eq!(parse("page 3"), BrowseCommand::Page(2));
        assert_eq!(parse("size 10"), BrowseCommand::Size(10));
        assert_eq!(parse("q"), BrowseCommand::Quit);
    }

    #[test]
    fn test_blank_line_is_nothing() {
        assert_eq!(parse_browse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_page_and_size_need_positive_numbers() {
        assert!(parse_browse_command("page 0").is_err());
        assert!(parse_browse_command("page").is_err());
        assert!(parse_browse_command("size -1").is_err());
        assert!(parse_browse_command("size x").is_err());
    }

    #[test]
    fn test_filter_keeps_raw_types() {
        assert_eq!(
            parse("filter fire, water"),
            BrowseCommand::Filter("fire, water".to_string())
        );
        assert_eq!(parse("clear"), BrowseCommand::Clear);
    }

    #[test]
    fn test_empty_filter_is_rejected() {
        assert_eq!(
            parse_browse_command("filter").unwrap_err(),
            EMPTY_FILTER
        );
        assert!(parse_browse_command("filter , ,").is_err());
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse("add Pikachu | electric | https://x/25.png"),
            BrowseCommand::Add {
                name: "Pikachu".to_string(),
                types: "electric".to_string(),
                sprite: "https://x/25.png".to_string(),
            }
        );
        // Empty fields reach validation instead of failing here
        assert_eq!(
            parse("add  | | "),
            BrowseCommand::Add {
                name: String::new(),
                types: String::new(),
                sprite: String::new(),
            }
        );
        assert!(parse_browse_command("add Pikachu").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_browse_command("jump 4").unwrap_err();
        assert!(err.contains("jump"));
    }
}
