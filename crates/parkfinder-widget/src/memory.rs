//! In-process surfaces: a map and lists that just remember what was drawn.
//!
//! The CLI renders these to the terminal; tests inspect them directly.

use std::collections::BTreeMap;

use parkfinder_core::QueryLocation;

use crate::surface::{ItemId, ListContainer, MapSurface, MarkerIcon, MarkerId, Popup, TextInput};

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub at: QueryLocation,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
}

#[derive(Debug, Default)]
pub struct InMemoryMap {
    next_id: u64,
    markers: BTreeMap<MarkerId, MarkerState>,
    view: Option<(QueryLocation, u8)>,
    open_popup: Option<MarkerId>,
}

impl InMemoryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live markers in insertion order.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &MarkerState)> {
        self.markers.iter().map(|(id, state)| (*id, state))
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerState> {
        self.markers.get(&id)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of live markers drawn with a tier icon.
    #[must_use]
    pub fn facility_marker_count(&self) -> usize {
        self.markers
            .values()
            .filter(|m| matches!(m.icon, MarkerIcon::Tier(_)))
            .count()
    }

    /// Current center and zoom, once a view has been set.
    #[must_use]
    pub fn view(&self) -> Option<(QueryLocation, u8)> {
        self.view
    }

    #[must_use]
    pub fn opened_popup(&self) -> Option<MarkerId> {
        self.open_popup
    }
}

impl MapSurface for InMemoryMap {
    fn set_view(&mut self, center: QueryLocation, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_marker(&mut self, at: QueryLocation, icon: MarkerIcon) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.insert(
            id,
            MarkerState {
                at,
                icon,
                popup: None,
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
        if self.open_popup == Some(marker) {
            self.open_popup = None;
        }
    }

    fn bind_popup(&mut self, marker: MarkerId, popup: Popup) {
        match self.markers.get_mut(&marker) {
            Some(state) => state.popup = Some(popup),
            None => tracing::warn!(?marker, "popup bound to unknown marker"),
        }
    }

    fn open_popup(&mut self, marker: MarkerId) {
        if self.markers.get(&marker).is_some_and(|m| m.popup.is_some()) {
            self.open_popup = Some(marker);
        }
    }
}

#[derive(Debug)]
pub struct InMemoryList<T> {
    next_id: u64,
    items: Vec<(ItemId, T)>,
}

impl<T> Default for InMemoryList<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
        }
    }
}

impl<T> InMemoryList<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[(ItemId, T)] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items
            .iter()
            .find_map(|(item_id, item)| (*item_id == id).then_some(item))
    }

    /// Id of the entry at `index` (0-based, display order).
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).map(|(id, _)| *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> ListContainer<T> for InMemoryList<T> {
    fn clear(&mut self) {
        self.items.clear();
    }

    fn append(&mut self, item: T) -> ItemId {
        // Ids keep increasing across clears so an id from a retired render
        // never names a new entry.
        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.push((id, item));
        id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryInput {
    text: String,
}

impl InMemoryInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextInput for InMemoryInput {
    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }
}
