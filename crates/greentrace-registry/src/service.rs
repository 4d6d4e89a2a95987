//! Tree documentation service.
//!
//! Ties the repository, classifier and ledger together. One instance per
//! process, constructed explicitly and handed to whoever needs it.

use std::time::{SystemTime, UNIX_EPOCH};

use greentrace_network::{
    compute_connections, Connection, GeoPoint, NetworkSnapshot, NetworkStats, Ownership,
    TreeId, TreeRecord, DEFAULT_MAX_DISTANCE,
};
use serde::Serialize;

use crate::classifier::{Classification, Classifier};
use crate::error::{Error, Result};
use crate::ledger::{Ledger, Receipt, Redemption, Submission, TokenBalance};
use crate::repository::TreeRepository;
use crate::score::ContributorScore;
use crate::seed::{community_seed, SEED_FIRST_BLOCK};

/// Outcome of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct Documented {
    pub record: TreeRecord,
    pub classification: Classification,
    pub receipt: Receipt,
}

/// Documentation service over injected storage, classifier and ledger.
pub struct DocumentationService<R, C, L> {
    repository: R,
    classifier: C,
    ledger: L,
    max_distance: f64,
    /// Submissions accepted so far, mixed into generated ids.
    sequence: u64,
}

impl<R, C, L> DocumentationService<R, C, L>
where
    R: TreeRepository,
    C: Classifier,
    L: Ledger,
{
    /// Create a service with the default connection threshold.
    pub fn new(repository: R, classifier: C, ledger: L) -> Self {
        Self {
            repository,
            classifier,
            ledger,
            max_distance: DEFAULT_MAX_DISTANCE,
            sequence: 0,
        }
    }

    /// Override the default connection threshold.
    pub fn with_max_distance(mut self, max_distance: f64) -> Result<Self> {
        greentrace_network::validate_threshold(max_distance)?;
        self.max_distance = max_distance;
        Ok(self)
    }

    /// Load the verified community seed records with their ledger receipts.
    pub fn with_community_seed(mut self) -> Result<Self> {
        for (block, record) in (SEED_FIRST_BLOCK..).zip(community_seed(now_millis())?) {
            let submission = Submission::for_record(&record);
            self.repository.append(record)?;
            self.ledger.import_verified(&submission, block)?;
        }
        tracing::debug!(records = self.repository.len(), "Community seed loaded");
        Ok(self)
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Document a tree photographed now.
    pub fn submit(
        &mut self,
        image: &[u8],
        latitude: f64,
        longitude: f64,
        submitted_by: &str,
    ) -> Result<Documented> {
        self.submit_at(image, latitude, longitude, submitted_by, now_millis())
    }

    /// Document a tree with an explicit creation time (Unix ms).
    pub fn submit_at(
        &mut self,
        image: &[u8],
        latitude: f64,
        longitude: f64,
        submitted_by: &str,
        timestamp: u64,
    ) -> Result<Documented> {
        let position = GeoPoint::new(latitude, longitude).inspect_err(|e| {
            tracing::warn!(submitted_by, "Rejected submission: {}", e);
        })?;
        if submitted_by.trim().is_empty() {
            return Err(Error::InvalidInput("submitted_by must not be empty".into()));
        }

        let classification = self.classifier.classify(image)?;
        let image_hash = hex::encode(blake3::hash(image).as_bytes());
        let id = generate_id(submitted_by, timestamp, self.sequence);
        if self.repository.get(&id).is_some() {
            return Err(Error::DuplicateRecord(id.to_string()));
        }

        let record = TreeRecord::new(
            id,
            classification.species.clone(),
            position,
            submitted_by,
            classification.conservation_status,
        )
        .with_names(
            classification.common_name.clone(),
            classification.scientific_name.clone(),
        )
        .with_timestamp(timestamp)
        .with_image_hash(image_hash);

        // A record that failed to store must not earn tokens.
        self.repository.append(record.clone())?;
        self.sequence += 1;
        let receipt = self.ledger.submit(&Submission::for_record(&record))?;

        tracing::info!(
            tree = %record.id(),
            species = record.species(),
            submitted_by,
            tokens = receipt.tokens_rewarded,
            "Tree documented"
        );

        Ok(Documented {
            record,
            classification,
            receipt,
        })
    }

    /// All records in submission order.
    pub fn records(&self) -> Vec<TreeRecord> {
        self.repository.list()
    }

    /// Records submitted by `user`.
    pub fn user_records(&self, user: &str) -> Vec<TreeRecord> {
        self.repository.list_by_owner(user)
    }

    pub fn record(&self, id: &TreeId) -> Option<TreeRecord> {
        self.repository.get(id)
    }

    /// Dashboard counters.
    pub fn stats(&self, user: Option<&str>) -> NetworkStats {
        NetworkStats::compute(&self.repository.list(), user)
    }

    /// Number of connections at `max_distance`, or the configured default.
    pub fn connection_count(&self, max_distance: Option<f64>) -> Result<usize> {
        let records = self.repository.list();
        let connections: Vec<Connection<'_>> =
            compute_connections(&records, max_distance.unwrap_or(self.max_distance))?;
        Ok(connections.len())
    }

    /// Classified network for rendering, from `user`'s point of view.
    pub fn network(&self, user: Option<&str>, max_distance: Option<f64>) -> Result<NetworkSnapshot> {
        let records = self.repository.list();
        let ownership = match user {
            Some(user) => Ownership::for_user(&records, user),
            None => Ownership::none(),
        };
        let max_distance = max_distance.unwrap_or(self.max_distance);
        let snapshot = NetworkSnapshot::build(&records, &ownership, max_distance)?;

        tracing::debug!(
            trees = snapshot.total_trees,
            connections = snapshot.total_connections,
            max_distance,
            "Network computed"
        );
        Ok(snapshot)
    }

    /// Score card for `user`.
    pub fn score(&self, user: &str) -> ContributorScore {
        ContributorScore::compute(
            self.repository.list_by_owner(user).len(),
            self.repository.len(),
        )
    }

    pub fn balance(&self, account: &str) -> TokenBalance {
        self.ledger.balance(account)
    }

    pub fn receipt(&self, id: &TreeId) -> Option<Receipt> {
        self.ledger.receipt(id)
    }

    /// Confirm a tree on the ledger and flag the stored record verified.
    pub fn verify(&mut self, id: &TreeId) -> Result<TreeRecord> {
        if self.repository.get(id).is_none() {
            return Err(Error::NotFound(format!("tree {id}")));
        }
        self.ledger.confirm(id)?;
        self.repository.mark_verified(id)?;

        tracing::info!(tree = %id, "Tree verified");
        self.repository
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("tree {id}")))
    }

    pub fn redeem(&mut self, account: &str, reward_id: &str) -> Result<Redemption> {
        self.ledger.redeem(account, reward_id)
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}

/// Record id from submitter, creation time and sequence number.
pub fn generate_id(submitted_by: &str, timestamp: u64, sequence: u64) -> TreeId {
    let content = format!("{submitted_by}:{timestamp}:{sequence}");
    TreeId(hex::encode(blake3::hash(content.as_bytes()).as_bytes()))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
