use std::sync::Arc;

use crate::config::Settings;
use crate::core::{distinct_regions, ResultPipeline};
use crate::models::{
    Center, FilterBarView, ListingParams, ListingView, LoadState, ReferencePoint, Stats,
};
use crate::services::{
    CachedSource, FixedGeolocator, GeolocationError, Geolocator, HttpRecordSource, RecordSource,
    SourceError,
};

/// Catalog availability as seen by the listing
#[derive(Debug, Clone)]
enum CatalogState {
    Loading,
    Ready {
        centers: Arc<Vec<Center>>,
        regions: Vec<String>,
    },
    Failed(String),
}

/// Listing controller wiring the record source and geolocator into the pipeline
///
/// Every action mutates the pipeline state and answers with a fresh
/// [`ListingView`].
pub struct HemocentroFinder<S, G> {
    source: S,
    geolocator: G,
    pipeline: ResultPipeline,
    catalog: CatalogState,
}

impl HemocentroFinder<CachedSource<HttpRecordSource>, FixedGeolocator> {
    /// Build a finder backed by the configured data API and cached for the configured TTL
    pub fn from_settings(settings: &Settings) -> Result<Self, SourceError> {
        let source =
            HttpRecordSource::new(settings.source.url.clone(), settings.source.timeout())?;
        let geolocator = FixedGeolocator::from_option(settings.location.reference_point());

        Ok(Self::new(
            CachedSource::new(source, settings.cache.ttl()),
            geolocator,
            settings.listing_params(),
        ))
    }
}

impl<S: RecordSource, G: Geolocator> HemocentroFinder<S, G> {
    pub fn new(source: S, geolocator: G, params: ListingParams) -> Self {
        Self {
            source,
            geolocator,
            pipeline: ResultPipeline::new(params),
            catalog: CatalogState::Loading,
        }
    }

    pub fn pipeline(&self) -> &ResultPipeline {
        &self.pipeline
    }

    /// Fetch the catalog; a failure leaves an empty list with an error, no retry
    pub async fn load(&mut self) -> ListingView {
        self.catalog = CatalogState::Loading;

        match self.source.fetch_all().await {
            Ok(centers) => {
                let regions = distinct_regions(&centers);
                tracing::info!(
                    "Catalog ready: {} centers in {} regions",
                    centers.len(),
                    regions.len()
                );
                self.catalog = CatalogState::Ready {
                    centers: Arc::new(centers),
                    regions,
                };
            }
            Err(e) => {
                tracing::error!("Failed to load centers: {}", e);
                self.catalog = CatalogState::Failed(e.to_string());
            }
        }

        self.view()
    }

    /// Filter by region ("all" for every region)
    pub fn select_region(&mut self, region: &str) -> ListingView {
        self.pipeline.set_region_filter(region);
        self.view()
    }

    /// Switch to distance ordering and wait for the position
    pub async fn near_me(&mut self) -> ListingView {
        self.begin_nearby();
        let result = self.geolocator.current_position().await;
        self.complete_nearby(result)
    }

    /// First half of [`Self::near_me`], for callers driving the geolocator themselves
    pub fn begin_nearby(&mut self) -> ListingView {
        self.pipeline.request_nearby();
        self.view()
    }

    /// Second half of [`Self::near_me`]
    pub fn complete_nearby(
        &mut self,
        result: Result<ReferencePoint, GeolocationError>,
    ) -> ListingView {
        match result {
            Ok(point) => self.pipeline.on_location_resolved(point),
            Err(error) => self.pipeline.on_location_failed(error),
        }
        self.view()
    }

    /// Reveal the closest center beyond the radius
    pub fn accept_beyond_limit(&mut self) -> ListingView {
        self.pipeline.accept_beyond_limit();
        self.view()
    }

    /// Decline the closest center and leave distance mode
    pub fn reject_beyond_limit(&mut self) -> ListingView {
        self.pipeline.reject_beyond_limit();
        self.view()
    }

    pub fn go_to_page(&mut self, page: usize) -> ListingView {
        self.pipeline.go_to_page(page);
        self.view()
    }

    pub fn next_page(&mut self) -> ListingView {
        let current = self.view().pagination;
        let next = (current.current_page + 1).min(current.total_pages.max(1));
        self.go_to_page(next)
    }

    pub fn previous_page(&mut self) -> ListingView {
        let current = self.view().pagination.current_page;
        self.go_to_page(current.saturating_sub(1).max(1))
    }

    /// Recompute the current view from state
    pub fn view(&self) -> ListingView {
        let (centers, regions, load): (&[Center], &[String], LoadState) = match &self.catalog {
            CatalogState::Ready { centers, regions } => {
                (centers.as_slice(), regions.as_slice(), LoadState::Ready)
            }
            CatalogState::Loading => (&[], &[], LoadState::Loading),
            CatalogState::Failed(message) => (&[], &[], LoadState::Failed(message.clone())),
        };

        let listing = self.pipeline.listing(centers);
        let location = self.pipeline.location();

        ListingView {
            load,
            filters: FilterBarView {
                regions: regions.to_vec(),
                selected_region: self.pipeline.state().region.to_string(),
                locating: location.locating,
                location_error: location.error.map(|e| e.to_string()),
            },
            stats: Stats {
                total_centers: centers.len(),
                total_regions: regions.len(),
                filtered_count: listing.filtered_count,
            },
            items: listing.items,
            pagination: listing.window,
            distance: listing.distance,
        }
    }
}
