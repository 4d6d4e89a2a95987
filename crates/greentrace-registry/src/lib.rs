//! GreenTrace Registry
//!
//! The documentation pipeline behind the map: photo → species
//! classification → record → token reward.
//!
//! # Ports
//!
//! - [`TreeRepository`]: append-only record storage ([`InMemoryRepository`])
//! - [`Classifier`]: species from a photo ([`CatalogueClassifier`], [`FixedClassifier`])
//! - [`Ledger`]: submissions, rewards and redemptions ([`InMemoryLedger`])
//!
//! [`DocumentationService`] is built from one of each. There is no global
//! instance; construct one per process and pass it around.

mod error;
mod repository;
mod species;
mod classifier;
mod ledger;
mod score;
mod seed;
mod service;

pub use error::{Error, Result};
pub use repository::{TreeRepository, InMemoryRepository};
pub use species::{SpeciesProfile, CATALOGUE, lookup as lookup_species};
pub use classifier::{Classifier, Classification, CatalogueClassifier, FixedClassifier};
pub use ledger::{
    Ledger, InMemoryLedger, Submission, Receipt, TokenBalance, Redemption, RewardItem, RewardKind,
    LedgerTotals, REWARD_CATALOGUE, SPECIES_REWARDS, GENESIS_BLOCK, reward_item, to_micro_degrees,
};
pub use score::{Badge, ContributorScore};
pub use seed::{community_seed, SEED_FIRST_BLOCK};
pub use service::{DocumentationService, Documented, generate_id};

/// The in-process service wiring used by the server.
pub type InMemoryService = DocumentationService<InMemoryRepository, CatalogueClassifier, InMemoryLedger>;
