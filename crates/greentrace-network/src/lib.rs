//! GreenTrace Proximity Network
//!
//! Documented trees and the proximity network drawn between them.
//!
//! # Model
//!
//! A [`TreeRecord`] is one documented tree at a validated [`GeoPoint`].
//! Two records are connected when the planar distance between their
//! (latitude, longitude) pairs is at most a threshold in degrees
//! (default [`DEFAULT_MAX_DISTANCE`], roughly 500 m). Connections are a pure
//! function of the record set: computed on demand, never stored.
//!
//! # Construction
//!
//! - [`compute_connections`]: exhaustive O(n²) pairwise scan
//! - [`compute_connections_indexed`]: grid-bucket index with identical output
//!
//! # Rendering
//!
//! [`classify_connection`] and [`classify_marker`] pick the map styling, and
//! [`NetworkSnapshot`] bundles edges, markers and counters for a frontend.
//! [`NetworkStats`] holds the dashboard counters.

mod error;
mod geo;
mod record;
mod proximity;
mod grid;
mod classify;
mod stats;
mod snapshot;

pub use error::{Error, Result};
pub use geo::{GeoPoint, degrees_to_meters, METERS_PER_DEGREE};
pub use record::{TreeId, TreeRecord, ConservationStatus, COMMUNITY_SUBMITTER};
pub use proximity::{Connection, compute_connections, degree, validate_threshold, DEFAULT_MAX_DISTANCE};
pub use grid::{GridIndex, compute_connections_indexed};
pub use classify::{Ownership, ConnectionKind, MarkerKind, classify_connection, classify_marker};
pub use stats::{NetworkStats, areas_covered, TREES_PER_AREA};
pub use snapshot::{NetworkSnapshot, ConnectionView, MarkerView};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records_from(points: &[(f64, f64)]) -> Vec<TreeRecord> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(lat, lng))| {
                TreeRecord::new(
                    format!("t{i}"),
                    "Mugumo",
                    GeoPoint::new(lat, lng).unwrap(),
                    COMMUNITY_SUBMITTER,
                    ConservationStatus::Stable,
                )
            })
            .collect()
    }

    fn pair_set(connections: &[Connection<'_>]) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = connections
            .iter()
            .map(|c| {
                let (a, b) = (c.from.id().to_string(), c.to.id().to_string());
                if a <= b { (a, b) } else { (b, a) }
            })
            .collect();
        pairs.sort();
        pairs
    }

    // A small window so the default threshold actually produces edges.
    fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((-1.30f64..-1.28, 36.77f64..36.79), 0..40)
    }

    proptest! {
        #[test]
        fn membership_is_symmetric(points in points()) {
            let forward = records_from(&points);
            let mut reversed = forward.clone();
            reversed.reverse();

            let a = compute_connections(&forward, DEFAULT_MAX_DISTANCE).unwrap();
            let b = compute_connections(&reversed, DEFAULT_MAX_DISTANCE).unwrap();
            prop_assert_eq!(pair_set(&a), pair_set(&b));
        }

        #[test]
        fn no_self_connections(points in points(), t in 0.0f64..0.02) {
            let records = records_from(&points);
            for c in compute_connections(&records, t).unwrap() {
                prop_assert_ne!(c.from.id(), c.to.id());
                prop_assert!(c.distance >= 0.0 && c.distance <= t);
            }
        }

        #[test]
        fn monotonic_in_threshold(points in points(), a in 0.0f64..0.02, b in 0.0f64..0.02) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let records = records_from(&points);
            let small = pair_set(&compute_connections(&records, low).unwrap());
            let large = pair_set(&compute_connections(&records, high).unwrap());
            prop_assert!(small.iter().all(|p| large.contains(p)));
        }

        #[test]
        fn indexed_matches_exhaustive(points in points(), t in 0.0f64..0.02) {
            let records = records_from(&points);
            let exhaustive = compute_connections(&records, t).unwrap();
            let indexed = compute_connections_indexed(&records, t).unwrap();
            prop_assert_eq!(exhaustive, indexed);
        }

        #[test]
        fn stats_bounded_by_total(points in points()) {
            let records = records_from(&points);
            let stats = NetworkStats::compute(&records, Some(COMMUNITY_SUBMITTER));
            prop_assert!(stats.species_count <= stats.total_trees);
            prop_assert!(stats.user_contributions <= stats.total_trees);
        }
    }
}
