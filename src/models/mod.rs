// Model exports
pub mod domain;
pub mod view;

pub use domain::{
    AnnotatedCenter, Center, ListingParams, ReferencePoint, RegionFilter, ViewState, ALL_REGIONS,
};
pub use view::{FilterBarView, ListingView, LoadState, Stats};
