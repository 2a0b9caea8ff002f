use crate::models::AnnotatedCenter;

/// Outcome of applying the maximum search radius to a distance-sorted list
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// At least one center lies within the radius; only those are kept
    WithinLimit(Vec<AnnotatedCenter>),
    /// Nothing within the radius; the closest center is offered instead
    Fallback(AnnotatedCenter),
    /// Nothing to rank
    Empty,
}

/// Partition a distance-sorted list at `max_radius_km`
///
/// Centers with an unknown (missing or NaN) distance never qualify. Input
/// order is preserved for the qualifying centers, so the fallback candidate
/// is the first element of the sorted input.
pub fn evaluate(sorted: Vec<AnnotatedCenter>, max_radius_km: f64) -> GateOutcome {
    if sorted.is_empty() {
        return GateOutcome::Empty;
    }

    let within = |c: &AnnotatedCenter| c.distance_km.is_some_and(|d| d <= max_radius_km);

    if sorted.iter().any(within) {
        let kept: Vec<AnnotatedCenter> = sorted.into_iter().filter(|c| within(c)).collect();
        return GateOutcome::WithinLimit(kept);
    }

    match sorted.into_iter().next() {
        Some(closest) => GateOutcome::Fallback(closest),
        None => GateOutcome::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Center;

    fn at(id: &str, distance_km: f64) -> AnnotatedCenter {
        AnnotatedCenter::new(
            Center {
                id: id.to_string(),
                name: format!("Center {}", id),
                region: "SP".to_string(),
                address: String::new(),
                phone: None,
                latitude: 0.0,
                longitude: 0.0,
            },
            Some(distance_km),
        )
    }

    fn ids(list: &[AnnotatedCenter]) -> Vec<&str> {
        list.iter().map(|c| c.center.id.as_str()).collect()
    }

    #[test]
    fn test_within_limit_keeps_only_qualifying() {
        let outcome = evaluate(vec![at("a", 10.0), at("b", 600.0), at("c", 620.0)], 500.0);

        match outcome {
            GateOutcome::WithinLimit(list) => assert_eq!(ids(&list), vec!["a"]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let outcome = evaluate(vec![at("a", 500.0)], 500.0);
        assert!(matches!(outcome, GateOutcome::WithinLimit(ref l) if l.len() == 1));
    }

    #[test]
    fn test_fallback_is_closest() {
        let outcome = evaluate(vec![at("a", 600.0), at("b", 620.0), at("c", 700.0)], 500.0);
        assert_eq!(outcome, GateOutcome::Fallback(at("a", 600.0)));
    }

    #[test]
    fn test_nan_never_qualifies() {
        let outcome = evaluate(vec![at("a", f64::NAN)], 500.0);
        assert!(matches!(outcome, GateOutcome::Fallback(_)));
    }

    #[test]
    fn test_empty() {
        assert_eq!(evaluate(Vec::new(), 500.0), GateOutcome::Empty);
    }
}
