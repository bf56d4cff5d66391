//! Ranked-facility presentation engine.
//!
//! Keeps map markers and the facility list in step with the latest ranking
//! session, and turns debounced destination searches into new sessions.
//! Rendering targets are the traits in [`surface`]; [`memory`] provides
//! in-process implementations.

pub mod collaborators;
pub mod debounce;
pub mod error;
pub mod memory;
pub mod render;
pub mod session;
pub mod settings;
pub mod suggest;
pub mod surface;
pub mod token;
pub mod widget;

pub use collaborators::{FacilityLookup, Geocoder};
pub use error::WidgetError;
pub use memory::{InMemoryInput, InMemoryList, InMemoryMap, MarkerState};
pub use render::{FacilityListItem, FacilityRenderer, FacilitySummary, RenderedEntry};
pub use session::{SessionController, SessionOutcome};
pub use settings::WidgetSettings;
pub use suggest::{SearchState, Selection, SuggestionController, SuggestionListItem, SuggestionOutcome};
pub use surface::{FacilityPopup, ItemId, ListContainer, MapSurface, MarkerIcon, MarkerId, Popup, TextInput};
pub use token::{QueryToken, SessionToken};
pub use widget::{Outcome, ParkingWidget, Surfaces, UiEvent};
