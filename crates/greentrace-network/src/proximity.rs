//! Proximity network construction.
//!
//! Two trees are connected when their planar degree distance is at most the
//! threshold. Connections are derived on every call and never stored.
//!
//! Pairs are enumerated as (i, j) with i < j in input order, so the output
//! order is stable for a given input order. Membership depends only on the
//! pair, never on which side comes first.

use crate::error::{Error, Result};
use crate::TreeRecord;

/// Default connection threshold in degrees (roughly 500 m).
pub const DEFAULT_MAX_DISTANCE: f64 = 0.005;

/// A proximity edge between two distinct records.
///
/// `from` precedes `to` in the input slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection<'a> {
    pub from: &'a TreeRecord,
    pub to: &'a TreeRecord,
    /// Planar distance in degrees
    pub distance: f64,
}

impl<'a> Connection<'a> {
    /// Whether either endpoint is the given record.
    pub fn touches(&self, record: &TreeRecord) -> bool {
        self.from.id() == record.id() || self.to.id() == record.id()
    }

    /// The endpoint opposite `record`, if `record` is an endpoint.
    pub fn other(&self, record: &TreeRecord) -> Option<&'a TreeRecord> {
        if self.from.id() == record.id() {
            Some(self.to)
        } else if self.to.id() == record.id() {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Reject thresholds that would make the scan meaningless.
pub fn validate_threshold(max_distance: f64) -> Result<()> {
    if max_distance.is_finite() && max_distance >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(max_distance))
    }
}

/// Exhaustive pairwise scan. O(n²).
///
/// # Examples
///
/// ```
/// use greentrace_network::{compute_connections, ConservationStatus, GeoPoint, TreeRecord};
///
/// let at = |id: &str, lng: f64| {
///     TreeRecord::new(id, "Neem", GeoPoint::new(0.0, lng).unwrap(), "community", ConservationStatus::Stable)
/// };
/// let records = [at("a", 0.0), at("b", 0.003), at("c", 0.01)];
///
/// let connections = compute_connections(&records, 0.005).unwrap();
/// assert_eq!(connections.len(), 1);
/// assert_eq!(connections[0].from.id().as_str(), "a");
/// assert_eq!(connections[0].to.id().as_str(), "b");
/// ```
pub fn compute_connections(records: &[TreeRecord], max_distance: f64) -> Result<Vec<Connection<'_>>> {
    validate_threshold(max_distance)?;

    let mut connections = Vec::new();
    for (i, from) in records.iter().enumerate() {
        for to in &records[i + 1..] {
            let distance = from.distance_to(to);
            if distance <= max_distance {
                connections.push(Connection { from, to, distance });
            }
        }
    }
    Ok(connections)
}

/// Number of connections touching `record`.
pub fn degree(connections: &[Connection<'_>], record: &TreeRecord) -> usize {
    connections.iter().filter(|c| c.touches(record)).count()
}
