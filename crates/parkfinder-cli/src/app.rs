//! One-shot command handlers: build a widget on in-memory surfaces, feed it
//! events, wait for everything in flight, print the result.

use std::sync::Arc;

use anyhow::Context;
use parkfinder_client::{FacilityClient, GeocodeClient, GeocodeOptions};
use parkfinder_core::{AppConfig, QueryLocation};
use parkfinder_widget::{
    FacilityListItem, InMemoryInput, InMemoryList, InMemoryMap, Outcome, ParkingWidget,
    SessionOutcome, SuggestionListItem, SuggestionOutcome, Surfaces, UiEvent, WidgetSettings,
};

use crate::print;

pub(crate) type CliWidget = ParkingWidget<
    InMemoryMap,
    InMemoryList<FacilityListItem>,
    InMemoryList<SuggestionListItem>,
    InMemoryInput,
>;

/// Wires the HTTP clients from `config` into a widget.
pub(crate) fn build_widget(config: &AppConfig) -> anyhow::Result<CliWidget> {
    let lookup = FacilityClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build facility client")?;
    let geocoder = GeocodeClient::new(
        &config.geocoder_url,
        config.request_timeout_secs,
        &config.user_agent,
        GeocodeOptions {
            locality: config.locality.clone(),
            accept_language: config.accept_language.clone(),
            ..GeocodeOptions::default()
        },
    )
    .context("failed to build geocoding client")?;

    Ok(ParkingWidget::new(
        Surfaces::default(),
        Arc::new(lookup),
        Arc::new(geocoder),
        WidgetSettings::from_app_config(config),
    ))
}

/// Resolves everything in flight and returns the outcomes in order.
pub(crate) async fn drain(widget: &mut CliWidget) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    while let Some(outcome) = widget.next_outcome().await {
        outcomes.push(outcome);
    }
    outcomes
}

/// Fails if the latest ranking session did not render.
fn ensure_rendered(outcomes: Vec<Outcome>) -> anyhow::Result<()> {
    let last = outcomes.into_iter().rev().find_map(|o| match o {
        Outcome::Session(s @ (SessionOutcome::Rendered { .. } | SessionOutcome::Failed { .. })) => {
            Some(s)
        }
        _ => None,
    });
    match last {
        Some(SessionOutcome::Failed { error, .. }) => Err(error).context("facility lookup failed"),
        Some(_) => Ok(()),
        None => anyhow::bail!("no ranking session completed"),
    }
}

pub(crate) async fn run_nearby(
    config: &AppConfig,
    location: Option<QueryLocation>,
) -> anyhow::Result<()> {
    let mut widget = build_widget(config)?;
    match location {
        Some(location) => {
            widget.handle(UiEvent::Locate(location));
        }
        None => {
            widget.start();
        }
    }

    let outcomes = drain(&mut widget).await;
    ensure_rendered(outcomes)?;
    print::print_facilities(&widget);
    print::print_map(&widget);
    Ok(())
}

pub(crate) async fn run_search(
    config: &AppConfig,
    text: &str,
    pick: Option<usize>,
) -> anyhow::Result<()> {
    let mut widget = build_widget(config)?;
    widget.handle(UiEvent::SearchInput(text.to_owned()));

    for outcome in drain(&mut widget).await {
        match outcome {
            Outcome::Suggestions(SuggestionOutcome::Cleared) => {
                anyhow::bail!("search text is too short: \"{text}\"");
            }
            Outcome::Suggestions(SuggestionOutcome::Failed { error, .. }) => {
                return Err(error).context("destination search failed");
            }
            _ => {}
        }
    }
    print::print_suggestions(&widget);

    let Some(n) = pick else {
        return Ok(());
    };
    let item = n
        .checked_sub(1)
        .and_then(|index| widget.suggestions().entries().get(index))
        .map(|entry| entry.item)
        .with_context(|| format!("no suggestion number {n}"))?;
    widget.handle(UiEvent::SuggestionActivated(item));

    let outcomes = drain(&mut widget).await;
    ensure_rendered(outcomes)?;
    print::print_facilities(&widget);
    print::print_map(&widget);
    Ok(())
}
