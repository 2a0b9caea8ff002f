use crate::core::distance::distance_from;
use crate::models::{AnnotatedCenter, Center, ReferencePoint, RegionFilter};

/// Keep the centers matching `filter`, preserving their order
///
/// This is Stage 1 of the listing pipeline.
pub fn filter_by_region<'a>(centers: &'a [Center], filter: &RegionFilter) -> Vec<&'a Center> {
    centers.iter().filter(|c| filter.matches(c)).collect()
}

/// Copy centers into annotated records, attaching distances iff `origin` is known
///
/// This is Stage 2 - source records are never mutated.
pub fn annotate(centers: &[&Center], origin: Option<&ReferencePoint>) -> Vec<AnnotatedCenter> {
    centers
        .iter()
        .map(|center| {
            let distance_km =
                origin.map(|o| distance_from(o, center.latitude, center.longitude));
            AnnotatedCenter::new((*center).clone(), distance_km)
        })
        .collect()
}

/// Sorted, de-duplicated region codes present in the collection
pub fn distinct_regions(centers: &[Center]) -> Vec<String> {
    let mut regions: Vec<String> = centers.iter().map(|c| c.region.clone()).collect();
    regions.sort();
    regions.dedup();
    regions
}
