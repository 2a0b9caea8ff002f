// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod gate;
pub mod pagination;
pub mod pipeline;

pub use distance::{format_distance, haversine_distance};
pub use filters::{annotate, distinct_regions, filter_by_region};
pub use gate::GateOutcome;
pub use pagination::{paginate, PageLink, PageWindow};
pub use pipeline::{
    recompute, DistanceStatus, Listing, LocationStatus, PipelineOutput, ResultPipeline,
};
