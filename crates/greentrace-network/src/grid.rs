//! Grid-bucket spatial index.
//!
//! Drop-in replacement for the exhaustive scan when record counts grow.
//! Points are bucketed into square cells with side `2 × max_distance`.
//! Any connected pair then lies in the same or an adjacent cell, even
//! after floating-point rounding of the cell quotient, so only the 3×3
//! block around each cell is searched.
//!
//! The distance test is the same one the exhaustive scan applies, and pairs
//! are sorted back into (i, j) order, so the result is identical.

use std::collections::HashMap;

use crate::error::Result;
use crate::proximity::{validate_threshold, Connection};
use crate::TreeRecord;

/// Cell key. For a zero threshold the key is the exact coordinate bits.
type CellKey = (i64, i64);

/// Bucketed view over a record slice.
#[derive(Debug)]
pub struct GridIndex<'a> {
    records: &'a [TreeRecord],
    max_distance: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl<'a> GridIndex<'a> {
    /// Bucket `records` for the given threshold.
    pub fn build(records: &'a [TreeRecord], max_distance: f64) -> Result<Self> {
        validate_threshold(max_distance)?;

        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            cells
                .entry(cell_key(record, max_distance))
                .or_default()
                .push(i);
        }

        Ok(Self {
            records,
            max_distance,
            cells,
        })
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Every connection in ascending (i, j) order.
    pub fn connections(&self) -> Vec<Connection<'a>> {
        let mut pairs: Vec<(usize, usize, f64)> = Vec::new();

        for (&key, members) in &self.cells {
            for neighbor in neighbor_keys(key, self.max_distance) {
                let Some(others) = self.cells.get(&neighbor) else {
                    continue;
                };
                for &i in members {
                    for &j in others {
                        // Each unordered pair is seen from both cells; keep i < j.
                        if i >= j {
                            continue;
                        }
                        let distance = self.records[i].distance_to(&self.records[j]);
                        if distance <= self.max_distance {
                            pairs.push((i, j, distance));
                        }
                    }
                }
            }
        }

        pairs.sort_unstable_by_key(|&(i, j, _)| (i, j));
        pairs
            .into_iter()
            .map(|(i, j, distance)| Connection {
                from: &self.records[i],
                to: &self.records[j],
                distance,
            })
            .collect()
    }
}

/// Indexed equivalent of [`compute_connections`](crate::compute_connections).
pub fn compute_connections_indexed(
    records: &[TreeRecord],
    max_distance: f64,
) -> Result<Vec<Connection<'_>>> {
    Ok(GridIndex::build(records, max_distance)?.connections())
}

fn cell_key(record: &TreeRecord, max_distance: f64) -> CellKey {
    if max_distance == 0.0 {
        // GeoPoint already folds -0.0 into 0.0
        return (
            record.latitude().to_bits() as i64,
            record.longitude().to_bits() as i64,
        );
    }
    let side = 2.0 * max_distance;
    // `as` saturates, which keeps huge quotients in one shared cell.
    (
        (record.latitude() / side).floor() as i64,
        (record.longitude() / side).floor() as i64,
    )
}

fn neighbor_keys(key: CellKey, max_distance: f64) -> Vec<CellKey> {
    if max_distance == 0.0 {
        return vec![key];
    }
    let mut keys = Vec::with_capacity(9);
    for dlat in -1..=1i64 {
        for dlng in -1..=1i64 {
            keys.push((key.0.saturating_add(dlat), key.1.saturating_add(dlng)));
        }
    }
    // Saturation can fold offsets onto the same key.
    keys.sort_unstable();
    keys.dedup();
    keys
}
