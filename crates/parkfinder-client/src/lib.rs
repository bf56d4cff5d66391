pub mod error;
pub mod facilities;
pub mod geocode;
pub mod types;

pub use error::ClientError;
pub use facilities::FacilityClient;
pub use geocode::{GeocodeClient, GeocodeOptions, DEFAULT_GEOCODER_URL};
pub use types::Place;
