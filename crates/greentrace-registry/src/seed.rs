//! Verified community records around Kilimani, Nairobi.

use greentrace_network::{ConservationStatus, GeoPoint, TreeRecord, COMMUNITY_SUBMITTER};

use crate::error::Result;
use crate::ledger::GENESIS_BLOCK;

const DAY_MS: u64 = 86_400_000;

/// Block of the first seed record. The seed occupies the blocks just below
/// genesis, one each, in order.
pub const SEED_FIRST_BLOCK: u64 = GENESIS_BLOCK - SEED.len() as u64;

struct SeedTree {
    id: &'static str,
    species: &'static str,
    common_name: &'static str,
    scientific_name: &'static str,
    latitude: f64,
    longitude: f64,
    status: ConservationStatus,
}

const SEED: &[SeedTree] = &[
    SeedTree { id: "1", species: "Mango", common_name: "Mango Tree", scientific_name: "Mangifera indica",
        latitude: -1.2921, longitude: 36.7853, status: ConservationStatus::Stable },
    SeedTree { id: "2", species: "Jacaranda", common_name: "Jacaranda Tree", scientific_name: "Jacaranda mimosifolia",
        latitude: -1.2925, longitude: 36.7857, status: ConservationStatus::Stable },
    SeedTree { id: "3", species: "Baobab", common_name: "Baobab Tree", scientific_name: "Adansonia digitata",
        latitude: -1.2918, longitude: 36.7850, status: ConservationStatus::Vulnerable },
    SeedTree { id: "4", species: "Neem", common_name: "Neem Tree", scientific_name: "Azadirachta indica",
        latitude: -1.2923, longitude: 36.7855, status: ConservationStatus::Stable },
    SeedTree { id: "5", species: "Eucalyptus", common_name: "Eucalyptus Tree", scientific_name: "Eucalyptus globulus",
        latitude: -1.2927, longitude: 36.7851, status: ConservationStatus::Stable },
    SeedTree { id: "6", species: "Acacia", common_name: "Acacia Tree", scientific_name: "Acacia tortilis",
        latitude: -1.2919, longitude: 36.7854, status: ConservationStatus::Endangered },
];

/// The seed records, documented one per day before `now_ms`.
pub fn community_seed(now_ms: u64) -> Result<Vec<TreeRecord>> {
    SEED.iter()
        .enumerate()
        .map(|(i, tree)| {
            let position = GeoPoint::new(tree.latitude, tree.longitude)?;
            let mut record = TreeRecord::new(
                tree.id,
                tree.species,
                position,
                COMMUNITY_SUBMITTER,
                tree.status,
            )
            .with_names(
                Some(tree.common_name.to_string()),
                Some(tree.scientific_name.to_string()),
            )
            .with_timestamp(now_ms.saturating_sub(DAY_MS * (i as u64 + 1)))
            .with_image_hash(format!("QmHash{}", tree.id));
            record.mark_verified();
            Ok(record)
        })
        .collect()
}
