use crate::core::{DistanceStatus, PageWindow};
use crate::models::domain::AnnotatedCenter;
use serde::Serialize;

/// Headline counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    #[serde(rename = "totalCenters")]
    pub total_centers: usize,
    #[serde(rename = "totalRegions")]
    pub total_regions: usize,
    #[serde(rename = "filteredCount")]
    pub filtered_count: usize,
}

/// Filter bar state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBarView {
    pub regions: Vec<String>,
    #[serde(rename = "selectedRegion")]
    pub selected_region: String,
    pub locating: bool,
    #[serde(rename = "locationError")]
    pub location_error: Option<String>,
}

/// Whether the catalog is available
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Everything the presentation layer needs after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub load: LoadState,
    pub filters: FilterBarView,
    pub stats: Stats,
    pub items: Vec<AnnotatedCenter>,
    pub pagination: PageWindow,
    pub distance: DistanceStatus,
}

impl ListingView {
    /// Closest center awaiting the user's beyond-radius decision, if any
    pub fn pending_confirmation(&self) -> Option<&AnnotatedCenter> {
        match &self.distance {
            DistanceStatus::ConfirmationRequired { candidate } => Some(candidate),
            _ => None,
        }
    }
}
