//! Documented tree observations.

use crate::GeoPoint;

/// Submitter sentinel for seed and community data.
pub const COMMUNITY_SUBMITTER: &str = "community";

/// Opaque record identifier, assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TreeId(pub String);

impl TreeId {
    /// Create from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TreeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TreeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Species endangerment, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConservationStatus {
    #[default]
    Stable,
    Vulnerable,
    Endangered,
    Critical,
}

impl ConservationStatus {
    /// All tiers, least to most severe.
    pub const ALL: [Self; 4] = [
        Self::Stable,
        Self::Vulnerable,
        Self::Endangered,
        Self::Critical,
    ];

    /// Anything beyond Stable renders as at risk.
    pub const fn is_at_risk(&self) -> bool {
        !matches!(self, Self::Stable)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Vulnerable => "Vulnerable",
            Self::Endangered => "Endangered",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single documented tree.
///
/// Everything except `verified` is fixed at creation. Builder methods
/// consume the record, so they can only run before it is handed out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeRecord {
    id: TreeId,
    species: String,
    common_name: Option<String>,
    scientific_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    position: GeoPoint,
    /// Unix milliseconds
    timestamp: u64,
    image_hash: String,
    submitted_by: String,
    verified: bool,
    conservation_status: ConservationStatus,
}

impl TreeRecord {
    /// Create an unverified record.
    pub fn new(
        id: impl Into<TreeId>,
        species: impl Into<String>,
        position: GeoPoint,
        submitted_by: impl Into<String>,
        conservation_status: ConservationStatus,
    ) -> Self {
        Self {
            id: id.into(),
            species: species.into(),
            common_name: None,
            scientific_name: None,
            position,
            timestamp: 0,
            image_hash: String::new(),
            submitted_by: submitted_by.into(),
            verified: false,
            conservation_status,
        }
    }

    /// Attach the common and scientific names from classification.
    pub fn with_names(
        mut self,
        common_name: Option<String>,
        scientific_name: Option<String>,
    ) -> Self {
        self.common_name = common_name;
        self.scientific_name = scientific_name;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_image_hash(mut self, image_hash: impl Into<String>) -> Self {
        self.image_hash = image_hash.into();
        self
    }

    /// Flip the verification flag. Only an external verifier should call this.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    pub fn id(&self) -> &TreeId {
        &self.id
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    pub fn scientific_name(&self) -> Option<&str> {
        self.scientific_name.as_deref()
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude()
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn image_hash(&self) -> &str {
        &self.image_hash
    }

    pub fn submitted_by(&self) -> &str {
        &self.submitted_by
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn conservation_status(&self) -> ConservationStatus {
        self.conservation_status
    }

    /// Distance to another record in degrees.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position.distance(&other.position)
    }
}
