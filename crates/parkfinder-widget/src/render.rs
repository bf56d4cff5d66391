//! Facility list renderer: one marker and one list entry per facility.

use std::fmt;

use parkfinder_core::{display_tier, Facility, QueryLocation, Tier};

use crate::surface::{FacilityPopup, ItemId, ListContainer, MapSurface, MarkerIcon, MarkerId, Popup};

/// Zoom used when a list entry re-centers the map on its facility.
pub const FOCUS_ZOOM: u8 = 16;

pub const NO_FACILITIES_TEXT: &str = "No parking available nearby";

/// Summary line shown in the facility list.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitySummary {
    pub name: String,
    pub free_spaces: u32,
    pub capacity: u32,
    pub distance_km: f64,
    pub price_per_hour: f64,
    pub tier: Tier,
    /// Set on the top-ranked entry only.
    pub suggested: bool,
}

impl FacilitySummary {
    pub const SUGGESTED_LABEL: &'static str = "Suggested parking";
}

#[derive(Debug, Clone, PartialEq)]
pub enum FacilityListItem {
    Entry(FacilitySummary),
    /// Sole entry when the lookup found nothing.
    NoResults,
}

impl fmt::Display for FacilityListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityListItem::NoResults => f.write_str(NO_FACILITIES_TEXT),
            FacilityListItem::Entry(s) => {
                write!(
                    f,
                    "{} | {} free / {} total | {} km away | €{} / hour",
                    s.name, s.free_spaces, s.capacity, s.distance_km, s.price_per_hour
                )?;
                if s.suggested {
                    write!(f, " | {}", FacilitySummary::SUGGESTED_LABEL)?;
                }
                Ok(())
            }
        }
    }
}

/// A facility together with the marker and list entry drawn for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntry {
    pub rank: usize,
    pub tier: Tier,
    pub facility: Facility,
    pub marker: MarkerId,
    pub item: ItemId,
}

/// Owns the live set of rendered entries.
///
/// Each call to [`FacilityRenderer::render`] retires the previous set before
/// drawing the new one, with no suspension point in between.
#[derive(Debug)]
pub struct FacilityRenderer {
    origin: Option<QueryLocation>,
    entries: Vec<RenderedEntry>,
    focus_zoom: u8,
}

impl Default for FacilityRenderer {
    fn default() -> Self {
        Self::new(FOCUS_ZOOM)
    }
}

impl FacilityRenderer {
    #[must_use]
    pub fn new(focus_zoom: u8) -> Self {
        Self {
            origin: None,
            entries: Vec::new(),
            focus_zoom,
        }
    }

    /// Replaces whatever is on screen with `facilities`, in the given order.
    ///
    /// Returns the number of facilities drawn. An empty slice draws a single
    /// placeholder entry and no markers.
    pub fn render<M, L>(
        &mut self,
        map: &mut M,
        list: &mut L,
        origin: QueryLocation,
        facilities: Vec<Facility>,
    ) -> usize
    where
        M: MapSurface + ?Sized,
        L: ListContainer<FacilityListItem> + ?Sized,
    {
        self.retire(map, list);
        self.origin = Some(origin);

        if facilities.is_empty() {
            list.append(FacilityListItem::NoResults);
            return 0;
        }

        self.entries.reserve(facilities.len());
        for (rank, facility) in facilities.into_iter().enumerate() {
            let tier = display_tier(rank, facility.free_spaces, facility.capacity);

            let marker = map.add_marker(facility.location(), MarkerIcon::Tier(tier));
            map.bind_popup(marker, Popup::Facility(FacilityPopup::new(&facility)));

            let item = list.append(FacilityListItem::Entry(FacilitySummary {
                name: facility.name.clone(),
                free_spaces: facility.free_spaces,
                capacity: facility.capacity,
                distance_km: facility.distance_km,
                price_per_hour: facility.price_per_hour,
                tier,
                suggested: rank == 0,
            }));

            self.entries.push(RenderedEntry {
                rank,
                tier,
                facility,
                marker,
                item,
            });
        }
        self.entries.len()
    }

    /// Opens the popup of the entry behind `item` and centers the map on it.
    ///
    /// Ids from a retired render, or of the placeholder, resolve to `None`.
    pub fn activate<M>(&self, map: &mut M, item: ItemId) -> Option<&RenderedEntry>
    where
        M: MapSurface + ?Sized,
    {
        let entry = self.entries.iter().find(|e| e.item == item)?;
        map.open_popup(entry.marker);
        map.set_view(entry.facility.location(), self.focus_zoom);
        Some(entry)
    }

    #[must_use]
    pub fn entries(&self) -> &[RenderedEntry] {
        &self.entries
    }

    /// Location the live entries were looked up for.
    #[must_use]
    pub fn origin(&self) -> Option<QueryLocation> {
        self.origin
    }

    fn retire<M, L>(&mut self, map: &mut M, list: &mut L)
    where
        M: MapSurface + ?Sized,
        L: ListContainer<FacilityListItem> + ?Sized,
    {
        for entry in self.entries.drain(..) {
            map.remove_marker(entry.marker);
        }
        list.clear();
    }
}
