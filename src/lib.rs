//! Hemocentros - blood-donation center finder
//!
//! This library lists blood-donation centers in Brazil, filters them by state
//! and ranks them by proximity to the user. It implements a filter, sort,
//! radius-gate and paginate pipeline over an in-memory catalog.

pub mod config;
pub mod core;
pub mod handlers;
pub mod models;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{haversine_distance, DistanceStatus, PageLink, PageWindow, ResultPipeline};
pub use handlers::HemocentroFinder;
pub use models::{AnnotatedCenter, Center, ListingView, ReferencePoint, RegionFilter};
pub use services::{GeolocationError, Geolocator, RecordSource, SourceError};
