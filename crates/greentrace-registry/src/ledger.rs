//! Token ledger port.
//!
//! Contributors earn TREE tokens per documented tree, scaled by how rare the
//! species is, and spend them on airtime or vouchers. [`InMemoryLedger`]
//! keeps the books in process; a chain-backed implementation would sit
//! behind the same trait.

use std::collections::HashMap;

use greentrace_network::{TreeId, TreeRecord};
use serde::Serialize;

use crate::error::{Error, Result};

/// Block height of the first submission.
pub const GENESIS_BLOCK: u64 = 18_456_795;

/// Reward for species without a specific rate.
pub const DEFAULT_SPECIES_REWARD: u64 = 10;

/// Coordinates are stored on the ledger as integer micro-degrees.
pub const MICRO_DEGREES: f64 = 1_000_000.0;

/// Tokens per species.
pub const SPECIES_REWARDS: &[(&str, u64)] = &[
    ("Mango", 10),
    ("Jacaranda", 25),
    ("Neem", 10),
    ("Baobab", 100),
    ("Acacia", 25),
    ("Eucalyptus", 50),
    ("Cedar", 200),
];

/// What a redemption pays out as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Airtime,
    Voucher,
}

/// An item in the redemption catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardItem {
    pub id: &'static str,
    pub kind: RewardKind,
    pub description: &'static str,
    /// Price in tokens
    pub cost: u64,
}

/// Everything tokens can be redeemed for.
pub const REWARD_CATALOGUE: &[RewardItem] = &[
    RewardItem { id: "airtime-50", kind: RewardKind::Airtime, description: "KES 50 Airtime", cost: 50 },
    RewardItem { id: "airtime-100", kind: RewardKind::Airtime, description: "KES 100 Airtime", cost: 100 },
    RewardItem { id: "airtime-250", kind: RewardKind::Airtime, description: "KES 250 Airtime", cost: 250 },
    RewardItem { id: "voucher-supermarket", kind: RewardKind::Voucher, description: "Supermarket Voucher", cost: 200 },
    RewardItem { id: "voucher-restaurant", kind: RewardKind::Voucher, description: "Restaurant Voucher", cost: 150 },
    RewardItem { id: "voucher-mall", kind: RewardKind::Voucher, description: "Shopping Mall Voucher", cost: 300 },
];

/// A tree submission as recorded on the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub tree_id: TreeId,
    pub submitter: String,
    pub species: String,
    pub image_hash: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Submission {
    pub fn for_record(record: &TreeRecord) -> Self {
        Self {
            tree_id: record.id().clone(),
            submitter: record.submitted_by().to_string(),
            species: record.species().to_string(),
            image_hash: record.image_hash().to_string(),
            latitude: record.latitude(),
            longitude: record.longitude(),
        }
    }
}

/// Proof that a submission was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub tree_id: TreeId,
    /// 0x-prefixed, 64 hex digits
    pub transaction_hash: String,
    pub block_number: u64,
    pub latitude_micro: i64,
    pub longitude_micro: i64,
    pub tokens_rewarded: u64,
    pub verified: bool,
}

/// An account's token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TokenBalance {
    pub balance: u64,
    pub total_earned: u64,
    pub total_submissions: u64,
}

/// Result of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redemption {
    pub account: String,
    pub reward: RewardItem,
    pub remaining_balance: u64,
}

/// Ledger-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LedgerTotals {
    pub total_submitted: u64,
    pub total_verified: u64,
}

/// Records submissions and moves tokens.
pub trait Ledger {
    /// Record a submission and credit the species reward to the submitter.
    fn submit(&mut self, submission: &Submission) -> Result<Receipt>;

    /// Register a submission already confirmed at `block_number`.
    ///
    /// Used for records that predate this ledger. No tokens move.
    fn import_verified(&mut self, submission: &Submission, block_number: u64) -> Result<Receipt>;

    /// Mark a submission as verified.
    fn confirm(&mut self, tree_id: &TreeId) -> Result<()>;

    /// Current balance of `account`. Unknown accounts hold nothing.
    fn balance(&self, account: &str) -> TokenBalance;

    /// Tokens paid for documenting `species`.
    fn species_reward(&self, species: &str) -> u64;

    /// Spend tokens on a catalogue item.
    fn redeem(&mut self, account: &str, reward_id: &str) -> Result<Redemption>;

    /// Receipt for a previously submitted tree.
    fn receipt(&self, tree_id: &TreeId) -> Option<Receipt>;

    fn totals(&self) -> LedgerTotals;
}

/// Look up a catalogue item.
pub fn reward_item(reward_id: &str) -> Option<&'static RewardItem> {
    REWARD_CATALOGUE.iter().find(|r| r.id == reward_id)
}

/// floor(degrees × 1e6)
pub fn to_micro_degrees(degrees: f64) -> i64 {
    (degrees * MICRO_DEGREES).floor() as i64
}

/// Process-local ledger.
#[derive(Debug)]
pub struct InMemoryLedger {
    accounts: HashMap<String, TokenBalance>,
    receipts: HashMap<TreeId, Receipt>,
    next_block: u64,
    totals: LedgerTotals,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            receipts: HashMap::new(),
            next_block: GENESIS_BLOCK,
            totals: LedgerTotals::default(),
        }
    }

    fn transaction_hash(submission: &Submission, block_number: u64) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(submission.tree_id.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(submission.submitter.as_bytes());
        hasher.update(b":");
        hasher.update(submission.species.as_bytes());
        hasher.update(b":");
        hasher.update(submission.image_hash.as_bytes());
        hasher.update(&block_number.to_be_bytes());
        format!("0x{}", hex::encode(hasher.finalize().as_bytes()))
    }
}

impl Ledger for InMemoryLedger {
    fn submit(&mut self, submission: &Submission) -> Result<Receipt> {
        if submission.submitter.is_empty() {
            return Err(Error::InvalidInput("submission has no submitter".into()));
        }
        if self.receipts.contains_key(&submission.tree_id) {
            return Err(Error::DuplicateRecord(submission.tree_id.to_string()));
        }

        let block_number = self.next_block;
        let tokens_rewarded = self.species_reward(&submission.species);
        let receipt = Receipt {
            tree_id: submission.tree_id.clone(),
            transaction_hash: Self::transaction_hash(submission, block_number),
            block_number,
            latitude_micro: to_micro_degrees(submission.latitude),
            longitude_micro: to_micro_degrees(submission.longitude),
            tokens_rewarded,
            verified: false,
        };

        let account = self.accounts.entry(submission.submitter.clone()).or_default();
        account.balance += tokens_rewarded;
        account.total_earned += tokens_rewarded;
        account.total_submissions += 1;

        self.next_block += 1;
        self.totals.total_submitted += 1;
        self.receipts.insert(receipt.tree_id.clone(), receipt.clone());

        tracing::debug!(
            tree = %receipt.tree_id,
            block = block_number,
            tokens = tokens_rewarded,
            "Submission recorded"
        );
        Ok(receipt)
    }

    fn import_verified(&mut self, submission: &Submission, block_number: u64) -> Result<Receipt> {
        if self.receipts.contains_key(&submission.tree_id) {
            return Err(Error::DuplicateRecord(submission.tree_id.to_string()));
        }

        let receipt = Receipt {
            tree_id: submission.tree_id.clone(),
            transaction_hash: Self::transaction_hash(submission, block_number),
            block_number,
            latitude_micro: to_micro_degrees(submission.latitude),
            longitude_micro: to_micro_degrees(submission.longitude),
            tokens_rewarded: 0,
            verified: true,
        };

        self.totals.total_submitted += 1;
        self.totals.total_verified += 1;
        self.receipts.insert(receipt.tree_id.clone(), receipt.clone());
        Ok(receipt)
    }

    fn confirm(&mut self, tree_id: &TreeId) -> Result<()> {
        let receipt = self
            .receipts
            .get_mut(tree_id)
            .ok_or_else(|| Error::NotFound(format!("receipt {tree_id}")))?;
        if !receipt.verified {
            receipt.verified = true;
            self.totals.total_verified += 1;
        }
        Ok(())
    }

    fn balance(&self, account: &str) -> TokenBalance {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    fn species_reward(&self, species: &str) -> u64 {
        SPECIES_REWARDS
            .iter()
            .find(|(name, _)| *name == species)
            .map(|&(_, reward)| reward)
            .unwrap_or(DEFAULT_SPECIES_REWARD)
    }

    fn redeem(&mut self, account: &str, reward_id: &str) -> Result<Redemption> {
        let reward = *reward_item(reward_id)
            .ok_or_else(|| Error::NotFound(format!("reward {reward_id}")))?;

        let available = self.balance(account).balance;
        if available < reward.cost {
            return Err(Error::InsufficientBalance {
                required: reward.cost,
                available,
            });
        }

        // Non-zero balance above means the account exists.
        let entry = self.accounts.entry(account.to_string()).or_default();
        entry.balance -= reward.cost;

        tracing::info!(account, reward = reward.id, cost = reward.cost, "Tokens redeemed");
        Ok(Redemption {
            account: account.to_string(),
            reward,
            remaining_balance: entry.balance,
        })
    }

    fn receipt(&self, tree_id: &TreeId) -> Option<Receipt> {
        self.receipts.get(tree_id).cloned()
    }

    fn totals(&self) -> LedgerTotals {
        self.totals
    }
}
