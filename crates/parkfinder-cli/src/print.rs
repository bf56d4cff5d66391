//! Terminal rendering of the in-memory surfaces.

use parkfinder_widget::{FacilityListItem, MarkerIcon, Popup, SearchState};

use crate::app::CliWidget;

pub(crate) fn print_facilities(widget: &CliWidget) {
    let items = widget.surfaces().facilities.items();
    if let Some(origin) = widget.renderer().origin() {
        println!("Parking near {origin}:");
    }
    for (index, (_, item)) in items.iter().enumerate() {
        match item {
            FacilityListItem::Entry(summary) => {
                println!("{:>3}. [{}] {item}", index + 1, summary.tier.color());
            }
            FacilityListItem::NoResults => println!("     {item}"),
        }
    }
}

pub(crate) fn print_suggestions(widget: &CliWidget) {
    let items = widget.surfaces().suggestions.items();
    if items.is_empty() {
        return;
    }
    println!("Suggestions:");
    for (index, (_, item)) in items.iter().enumerate() {
        println!("{:>3}. {item}", index + 1);
    }
}

pub(crate) fn print_map(widget: &CliWidget) {
    let map = &widget.surfaces().map;
    if let Some((center, zoom)) = map.view() {
        println!("Map centered on {center} at zoom {zoom}");
    }
    for (id, marker) in map.markers() {
        let icon = match marker.icon {
            MarkerIcon::Tier(tier) => tier.color(),
            MarkerIcon::Origin => "origin",
            MarkerIcon::Destination => "destination",
        };
        println!("  marker {:<4} {:<12} {}", id.0, icon, marker.at);
    }
    if let Some(open) = map.opened_popup().and_then(|id| map.marker(id)) {
        if let Some(popup) = &open.popup {
            println!("Open popup:");
            for line in popup_lines(popup) {
                println!("  {line}");
            }
        }
    }
}

pub(crate) fn print_status(widget: &CliWidget) {
    let state = match widget.search_state() {
        SearchState::Idle => "idle",
        SearchState::Debouncing => "waiting for typing to pause",
        SearchState::Querying => "searching",
        SearchState::Displaying => "showing suggestions",
    };
    println!(
        "search: {state} | input: \"{}\" | in flight: {}",
        widget.surfaces().input.text(),
        widget.in_flight()
    );
}

fn popup_lines(popup: &Popup) -> Vec<String> {
    popup.to_string().lines().map(str::to_owned).collect()
}
