// Service exports
pub mod cache;
pub mod geolocation;
pub mod source;

pub use cache::{CachedSource, Catalog, DEFAULT_CATALOG_TTL_SECS};
pub use geolocation::{FixedGeolocator, GeolocationError, Geolocator};
pub use source::{HttpRecordSource, RecordSource, SourceError, DEFAULT_SOURCE_URL};
