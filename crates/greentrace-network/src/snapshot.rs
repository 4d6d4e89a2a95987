//! Owned, serializable view of the network for a map frontend.

use std::collections::HashMap;

use crate::error::Result;
use crate::{
    classify_connection, classify_marker, compute_connections_indexed, degrees_to_meters,
    ConnectionKind, ConservationStatus, MarkerKind, Ownership, TreeId, TreeRecord,
};

/// A connection line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionView {
    pub from: TreeId,
    pub to: TreeId,
    /// Degrees
    pub distance: f64,
    /// Approximate, for display
    pub distance_meters: u64,
    pub kind: ConnectionKind,
}

/// A tree marker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerView {
    pub id: TreeId,
    pub species: String,
    pub latitude: f64,
    pub longitude: f64,
    pub conservation_status: ConservationStatus,
    pub kind: MarkerKind,
    /// Nearby trees this one is connected to
    pub degree: usize,
}

/// Everything the map and network card render.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSnapshot {
    pub max_distance: f64,
    pub total_trees: usize,
    pub total_connections: usize,
    pub user_connections: usize,
    pub connections: Vec<ConnectionView>,
    pub markers: Vec<MarkerView>,
}

impl NetworkSnapshot {
    /// Compute connections and classify every edge and marker.
    pub fn build(records: &[TreeRecord], ownership: &Ownership, max_distance: f64) -> Result<Self> {
        let connections = compute_connections_indexed(records, max_distance)?;

        let connection_views: Vec<ConnectionView> = connections
            .iter()
            .map(|c| ConnectionView {
                from: c.from.id().clone(),
                to: c.to.id().clone(),
                distance: c.distance,
                distance_meters: degrees_to_meters(c.distance),
                kind: classify_connection(c, ownership),
            })
            .collect();

        let mut degrees: HashMap<&TreeId, usize> = HashMap::new();
        for c in &connections {
            *degrees.entry(c.from.id()).or_default() += 1;
            *degrees.entry(c.to.id()).or_default() += 1;
        }

        let markers = records
            .iter()
            .map(|r| MarkerView {
                id: r.id().clone(),
                species: r.species().to_string(),
                latitude: r.latitude(),
                longitude: r.longitude(),
                conservation_status: r.conservation_status(),
                kind: classify_marker(r, ownership),
                degree: degrees.get(r.id()).copied().unwrap_or(0),
            })
            .collect();

        let user_connections = connection_views
            .iter()
            .filter(|c| c.kind == ConnectionKind::User)
            .count();

        Ok(Self {
            max_distance,
            total_trees: records.len(),
            total_connections: connection_views.len(),
            user_connections,
            connections: connection_views,
            markers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeoPoint, DEFAULT_MAX_DISTANCE};

    fn tree(id: &str, lat: f64, lng: f64, owner: &str, status: ConservationStatus) -> TreeRecord {
        TreeRecord::new(id, "Mukinduri", GeoPoint::new(lat, lng).unwrap(), owner, status)
    }

    #[test]
    fn snapshot_counts_and_kinds() {
        let records = [
            tree("a", -1.2921, 36.7853, "alice", ConservationStatus::Vulnerable),
            tree("b", -1.2925, 36.7857, "community", ConservationStatus::Stable),
            tree("c", -1.2918, 36.7850, "community", ConservationStatus::Endangered),
            tree("far", -1.40, 36.90, "community", ConservationStatus::Stable),
        ];
        let ownership = Ownership::for_user(&records, "alice");
        let snapshot = NetworkSnapshot::build(&records, &ownership, DEFAULT_MAX_DISTANCE).unwrap();

        assert_eq!(snapshot.total_trees, 4);
        assert_eq!(snapshot.total_connections, 3);
        assert_eq!(snapshot.user_connections, 2);

        let kinds: Vec<_> = snapshot.markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Yours,
                MarkerKind::CommunityStable,
                MarkerKind::AtRisk,
                MarkerKind::CommunityStable,
            ]
        );
        assert_eq!(snapshot.markers[0].degree, 2);
        assert_eq!(snapshot.markers[3].degree, 0);
        assert!(snapshot.connections.iter().all(|c| c.distance_meters < 600));
    }

    #[test]
    fn marker_degrees_match_connection_counts() {
        let records: Vec<_> = (0..12)
            .map(|i| {
                let lng = 36.78 + i as f64 * 0.002;
                tree(&format!("t{i}"), -1.29, lng, "community", ConservationStatus::Stable)
            })
            .collect();
        let snapshot = NetworkSnapshot::build(&records, &Ownership::none(), DEFAULT_MAX_DISTANCE).unwrap();
        let connections = crate::compute_connections(&records, DEFAULT_MAX_DISTANCE).unwrap();

        for (marker, record) in snapshot.markers.iter().zip(&records) {
            assert_eq!(marker.degree, crate::degree(&connections, record));
        }
        let total: usize = snapshot.markers.iter().map(|m| m.degree).sum();
        assert_eq!(total, 2 * snapshot.total_connections);
    }

    #[test]
    fn snapshot_rejects_bad_threshold() {
        assert!(NetworkSnapshot::build(&[], &Ownership::none(), -0.5).is_err());
    }
}
