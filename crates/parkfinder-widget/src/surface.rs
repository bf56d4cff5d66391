//! Rendering surfaces the widget draws on.
//!
//! The map and the two list containers are owned by the widget and only
//! mutated from the task that drives it. List containers hand back an
//! [`ItemId`] for every appended entry; activation events name that id
//! instead of carrying a callback.

use std::fmt;

use parkfinder_core::{navigation_links, Facility, NavigationLink, QueryLocation, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    /// Facility marker colored by tier.
    Tier(Tier),
    /// Plain pin for the default search location.
    Origin,
    /// Plain pin for a destination picked from the suggestions.
    Destination,
}

/// Facility details shown in a marker popup.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityPopup {
    pub name: String,
    pub free_spaces: u32,
    pub capacity: u32,
    pub distance_km: f64,
    pub price_per_hour: f64,
    pub links: Vec<NavigationLink>,
}

impl FacilityPopup {
    #[must_use]
    pub fn new(facility: &Facility) -> Self {
        Self {
            name: facility.name.clone(),
            free_spaces: facility.free_spaces,
            capacity: facility.capacity,
            distance_km: facility.distance_km,
            price_per_hour: facility.price_per_hour,
            links: navigation_links(facility.location()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Facility(FacilityPopup),
    Text(String),
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Popup::Text(text) => f.write_str(text),
            Popup::Facility(p) => {
                writeln!(f, "{}", p.name)?;
                writeln!(f, "Available: {}/{}", p.free_spaces, p.capacity)?;
                writeln!(f, "Distance: {} km", p.distance_km)?;
                writeln!(f, "Price: €{} / hour", p.price_per_hour)?;
                let links: Vec<String> = p
                    .links
                    .iter()
                    .map(|l| format!("{} <{}>", l.app.label(), l.url))
                    .collect();
                write!(f, "{}", links.join(" | "))
            }
        }
    }
}

/// Map rendering surface.
pub trait MapSurface {
    fn set_view(&mut self, center: QueryLocation, zoom: u8);
    fn add_marker(&mut self, at: QueryLocation, icon: MarkerIcon) -> MarkerId;
    /// Removing an unknown marker is a no-op.
    fn remove_marker(&mut self, marker: MarkerId);
    fn bind_popup(&mut self, marker: MarkerId, popup: Popup);
    fn open_popup(&mut self, marker: MarkerId);
}

/// An ordered container of entries (the facility list, the suggestion box).
pub trait ListContainer<T> {
    fn clear(&mut self);
    fn append(&mut self, item: T) -> ItemId;
}

/// The destination search field.
pub trait TextInput {
    fn set_text(&mut self, text: &str);
}
