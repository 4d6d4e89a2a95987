//! Species classification port.
//!
//! A real deployment would call an image model. The implementations here
//! draw from the static catalogue so the rest of the pipeline can be
//! exercised deterministically.

use greentrace_network::ConservationStatus;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::species::{self, SpeciesProfile, CATALOGUE};

/// What a classifier says about a photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub species: String,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub confidence: f64,
    pub conservation_status: ConservationStatus,
    pub description: Option<String>,
}

impl From<&SpeciesProfile> for Classification {
    fn from(profile: &SpeciesProfile) -> Self {
        Self {
            species: profile.species.to_string(),
            common_name: Some(profile.common_name.to_string()),
            scientific_name: Some(profile.scientific_name.to_string()),
            confidence: profile.confidence,
            conservation_status: profile.conservation_status,
            description: Some(profile.description.to_string()),
        }
    }
}

/// Names the species in a tree photo.
pub trait Classifier {
    fn classify(&mut self, image: &[u8]) -> Result<Classification>;
}

/// Uniform random pick from the catalogue with a seeded RNG.
#[derive(Debug)]
pub struct CatalogueClassifier {
    rng: StdRng,
}

impl CatalogueClassifier {
    /// Same seed, same sequence of answers.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Classifier for CatalogueClassifier {
    fn classify(&mut self, image: &[u8]) -> Result<Classification> {
        if image.is_empty() {
            return Err(Error::Classification("empty image".into()));
        }
        CATALOGUE
            .choose(&mut self.rng)
            .map(Classification::from)
            .ok_or_else(|| Error::Classification("species catalogue is empty".into()))
    }
}

/// Always reports the same catalogue entry. Test double.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    profile: &'static SpeciesProfile,
}

impl FixedClassifier {
    /// Classifier that always answers with the catalogue entry for `key`.
    pub fn new(key: &str) -> Result<Self> {
        species::lookup(key)
            .map(|profile| Self { profile })
            .ok_or_else(|| Error::NotFound(format!("species {key}")))
    }
}

impl Classifier for FixedClassifier {
    fn classify(&mut self, _image: &[u8]) -> Result<Classification> {
        Ok(Classification::from(self.profile))
    }
}
