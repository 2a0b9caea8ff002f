use serde::Serialize;

use crate::core::{
    distance::compare_distances,
    filters::{annotate, filter_by_region},
    gate::{evaluate, GateOutcome},
    pagination::{paginate, PageWindow},
};
use crate::models::{
    AnnotatedCenter, Center, ListingParams, ReferencePoint, RegionFilter, ViewState,
};
use crate::services::GeolocationError;

/// Where distance ordering stands after a recomputation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DistanceStatus {
    /// Distance ordering is off
    Inactive,
    /// Ordering requested but no reference point yet (in flight or failed)
    AwaitingLocation,
    /// Ordering active, nothing left after region filtering
    NothingToRank,
    /// Showing centers within the maximum radius
    WithinRadius,
    /// Showing the single closest center beyond the radius, as accepted by the user
    ClosestBeyondRadius,
    /// Nothing within the radius; the user must decide whether to reveal `candidate`
    ConfirmationRequired { candidate: AnnotatedCenter },
}

/// Ordered result of one recomputation, before pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub items: Vec<AnnotatedCenter>,
    pub distance: DistanceStatus,
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<AnnotatedCenter>,
    pub window: PageWindow,
    /// Size of the full post-gate list
    pub filtered_count: usize,
    pub distance: DistanceStatus,
}

/// Progress of the current geolocation request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationStatus {
    pub locating: bool,
    pub error: Option<GeolocationError>,
}

/// Run the listing pipeline over `centers`
///
/// # Pipeline Stages
/// 1. Region filter (order preserving)
/// 2. Distance annotation, only when `origin` is known
/// 3. Stable ascending sort by distance, only when ordering is requested
/// 4. Radius gate with closest-center fallback
///
/// Pure: identical inputs always produce identical output.
pub fn recompute(
    centers: &[Center],
    state: &ViewState,
    origin: Option<&ReferencePoint>,
    max_radius_km: f64,
) -> PipelineOutput {
    // Stage 1: Region filter
    let filtered = filter_by_region(centers, &state.region);

    // Stage 2: Distance annotation
    let mut annotated = annotate(&filtered, origin);

    let ordering_active = state.sort_by_distance && origin.is_some();
    if !ordering_active {
        let distance = if state.sort_by_distance {
            DistanceStatus::AwaitingLocation
        } else {
            DistanceStatus::Inactive
        };
        return PipelineOutput { items: annotated, distance };
    }

    // Stage 3: Stable sort, ties keep filter order
    annotated.sort_by(|a, b| compare_distances(a.distance_km, b.distance_km));

    // Stage 4: Radius gate
    match evaluate(annotated, max_radius_km) {
        GateOutcome::WithinLimit(items) => PipelineOutput {
            items,
            distance: DistanceStatus::WithinRadius,
        },
        GateOutcome::Fallback(closest) if state.show_beyond_limit => PipelineOutput {
            items: vec![closest],
            distance: DistanceStatus::ClosestBeyondRadius,
        },
        GateOutcome::Fallback(candidate) => PipelineOutput {
            items: Vec::new(),
            distance: DistanceStatus::ConfirmationRequired { candidate },
        },
        GateOutcome::Empty => PipelineOutput {
            items: Vec::new(),
            distance: DistanceStatus::NothingToRank,
        },
    }
}

/// Listing state machine: view state, reference point and location progress
///
/// Every mutation is followed by an explicit call to [`ResultPipeline::run`]
/// or [`ResultPipeline::listing`]; nothing is recomputed implicitly.
#[derive(Debug, Clone)]
pub struct ResultPipeline {
    params: ListingParams,
    state: ViewState,
    origin: Option<ReferencePoint>,
    location: LocationStatus,
}

impl ResultPipeline {
    pub fn new(params: ListingParams) -> Self {
        Self {
            params,
            state: ViewState::default(),
            origin: None,
            location: LocationStatus::default(),
        }
    }

    pub fn with_default_params() -> Self {
        Self::new(ListingParams::default())
    }

    pub fn params(&self) -> &ListingParams {
        &self.params
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn origin(&self) -> Option<&ReferencePoint> {
        self.origin.as_ref()
    }

    pub fn location(&self) -> &LocationStatus {
        &self.location
    }

    /// Select a region; leaves distance mode and returns to the first page
    pub fn set_region_filter(&mut self, region: impl Into<RegionFilter>) {
        self.state.region = region.into();
        self.state.sort_by_distance = false;
        self.state.show_beyond_limit = false;
        self.state.page = 1;
        tracing::debug!("Region filter set to {}", self.state.region);
    }

    /// Enter distance mode over every region and mark a geolocation request in flight
    pub fn request_nearby(&mut self) {
        self.state.region = RegionFilter::All;
        self.state.sort_by_distance = true;
        self.state.show_beyond_limit = false;
        self.state.page = 1;
        self.location = LocationStatus {
            locating: true,
            error: None,
        };
        tracing::debug!("Nearby centers requested");
    }

    /// The last resolved position wins; earlier requests are not tracked
    pub fn on_location_resolved(&mut self, point: ReferencePoint) {
        tracing::info!(
            "Reference point resolved: ({:.4}, {:.4})",
            point.latitude,
            point.longitude
        );
        self.origin = Some(point);
        self.location = LocationStatus::default();
    }

    /// Record a failed request; distance mode stays on without an origin
    pub fn on_location_failed(&mut self, error: GeolocationError) {
        tracing::warn!("Geolocation failed: {:?}", error);
        self.location = LocationStatus {
            locating: false,
            error: Some(error),
        };
    }

    pub fn accept_beyond_limit(&mut self) {
        self.state.show_beyond_limit = true;
    }

    /// Decline the closest-center fallback and leave distance mode
    pub fn reject_beyond_limit(&mut self) {
        self.state.sort_by_distance = false;
        self.state.page = 1;
    }

    /// Request a page; clamped against the result size when listing
    pub fn go_to_page(&mut self, page: usize) {
        self.state.page = page.max(1);
    }

    /// Recompute the ordered, gated result list
    pub fn run(&self, centers: &[Center]) -> PipelineOutput {
        recompute(
            centers,
            &self.state,
            self.origin.as_ref(),
            self.params.max_radius_km,
        )
    }

    /// Recompute and cut out the current page
    pub fn listing(&self, centers: &[Center]) -> Listing {
        let PipelineOutput { items, distance } = self.run(centers);
        let window = paginate(items.len(), self.params.page_size, self.state.page);
        let filtered_count = items.len();

        let page_items = items
            .into_iter()
            .skip(window.start)
            .take(window.end - window.start)
            .collect();

        Listing {
            items: page_items,
            window,
            filtered_count,
            distance,
        }
    }
}

impl Default for ResultPipeline {
    fn default() -> Self {
        Self::with_default_params()
    }
}
