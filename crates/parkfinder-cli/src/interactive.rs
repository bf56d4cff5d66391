//! `parkfinder interactive`: stdin lines drive the widget event loop.
//!
//! Plain text replaces the search input; `:pick <n>`, `:focus <n>` and
//! `:near <lat> <lon>` act on the suggestion box, the facility list and the
//! map. Surfaces are printed whenever something changed.

use anyhow::Context;
use parkfinder_core::{AppConfig, QueryLocation};
use parkfinder_widget::{ItemId, Outcome, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::{build_widget, CliWidget};
use crate::print;

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LineCommand {
    Type(String),
    Pick(usize),
    Focus(usize),
    Near(QueryLocation),
}

pub(crate) fn parse_line(line: &str) -> anyhow::Result<LineCommand> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(LineCommand::Type(line.to_owned()));
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    match (name, args.as_slice()) {
        ("pick", [n]) => Ok(LineCommand::Pick(parse_position(n)?)),
        ("focus", [n]) => Ok(LineCommand::Focus(parse_position(n)?)),
        ("near", [lat, lon]) => {
            let lat: f64 = lat.parse().with_context(|| format!("invalid latitude '{lat}'"))?;
            let lon: f64 = lon.parse().with_context(|| format!("invalid longitude '{lon}'"))?;
            Ok(LineCommand::Near(QueryLocation::new(lat, lon)?))
        }
        _ => anyhow::bail!("unknown command ':{command}' (try :pick n, :focus n, :near lat lon)"),
    }
}

fn parse_position(raw: &str) -> anyhow::Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => anyhow::bail!("expected a position starting at 1, got '{raw}'"),
    }
}

/// Maps a command onto a widget event, resolving positions to list ids.
fn to_event(widget: &CliWidget, command: LineCommand) -> anyhow::Result<UiEvent> {
    let nth = |items: Option<ItemId>, n: usize, what: &str| {
        items.with_context(|| format!("no {what} number {n}"))
    };
    Ok(match command {
        LineCommand::Type(text) => UiEvent::SearchInput(text),
        LineCommand::Pick(n) => UiEvent::SuggestionActivated(nth(
            widget.surfaces().suggestions.id_at(n - 1),
            n,
            "suggestion",
        )?),
        LineCommand::Focus(n) => UiEvent::FacilityActivated(nth(
            widget.surfaces().facilities.id_at(n - 1),
            n,
            "facility",
        )?),
        LineCommand::Near(location) => UiEvent::Locate(location),
    })
}

fn report(widget: &CliWidget, outcome: &Outcome) {
    match outcome {
        Outcome::QueryStarted { .. } => print::print_status(widget),
        Outcome::Suggestions(_) => {
            print::print_suggestions(widget);
            print::print_status(widget);
        }
        Outcome::Session(_) | Outcome::SessionStarted { .. } | Outcome::DestinationSelected { .. } => {
            print::print_facilities(widget);
            print::print_map(widget);
        }
        Outcome::FacilityFocused { .. } => print::print_map(widget),
    }
}

pub(crate) async fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let mut widget = build_widget(config)?;
    widget.start();
    print::print_map(&widget);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("failed to read stdin")? else {
                    stdin_open = false;
                    continue;
                };
                let event = match parse_line(&line).and_then(|c| to_event(&widget, c)) {
                    Ok(event) => event,
                    Err(e) => {
                        eprintln!("{e:#}");
                        continue;
                    }
                };
                match widget.handle(event) {
                    Some(outcome) => report(&widget, &outcome),
                    None => print::print_status(&widget),
                }
            }
            outcome = widget.next_outcome(), if widget.in_flight() > 0 => {
                if let Some(outcome) = outcome {
                    report(&widget, &outcome);
                }
            }
            else => break,
        }
    }
    Ok(())
}
