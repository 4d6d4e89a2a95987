//! Tree record storage.

use std::collections::HashMap;

use greentrace_network::{TreeId, TreeRecord};

use crate::error::{Error, Result};

/// Append-only record storage.
///
/// Records come back in insertion order. There is no delete, and the only
/// update is flipping `verified` on.
pub trait TreeRepository {
    /// Store a new record. Fails if the id is already taken.
    fn append(&mut self, record: TreeRecord) -> Result<()>;

    /// All records in insertion order.
    fn list(&self) -> Vec<TreeRecord>;

    /// Records submitted by `owner`, in insertion order.
    fn list_by_owner(&self, owner: &str) -> Vec<TreeRecord>;

    /// Look up a record by id.
    fn get(&self, id: &TreeId) -> Option<TreeRecord>;

    /// Set the stored record's `verified` flag. Nothing else changes.
    fn mark_verified(&mut self, id: &TreeId) -> Result<()>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local repository with no persistence.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    /// Records in insertion order.
    records: Vec<TreeRecord>,
    /// Position of each id in `records`.
    index: HashMap<TreeId, usize>,
}

impl InMemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Borrow the records without cloning.
    pub fn records(&self) -> &[TreeRecord] {
        &self.records
    }
}

impl TreeRepository for InMemoryRepository {
    fn append(&mut self, record: TreeRecord) -> Result<()> {
        if self.index.contains_key(record.id()) {
            return Err(Error::DuplicateRecord(record.id().to_string()));
        }
        self.index.insert(record.id().clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    fn list(&self) -> Vec<TreeRecord> {
        self.records.clone()
    }

    fn list_by_owner(&self, owner: &str) -> Vec<TreeRecord> {
        self.records
            .iter()
            .filter(|r| r.submitted_by() == owner)
            .cloned()
            .collect()
    }

    fn get(&self, id: &TreeId) -> Option<TreeRecord> {
        self.index.get(id).map(|&i| self.records[i].clone())
    }

    fn mark_verified(&mut self, id: &TreeId) -> Result<()> {
        let &i = self
            .index
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("tree {id}")))?;
        self.records[i].mark_verified();
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greentrace_network::{ConservationStatus, GeoPoint};

    fn tree(id: &str, owner: &str) -> TreeRecord {
        TreeRecord::new(id, "Neem", GeoPoint::ORIGIN, owner, ConservationStatus::Stable)
    }

    #[test]
    fn append_and_get() {
        let mut repo = InMemoryRepository::new();
        assert!(repo.is_empty());

        repo.append(tree("1", "alice")).unwrap();

        let record = repo.get(&TreeId::from("1")).unwrap();
        assert_eq!(record.submitted_by(), "alice");
        assert!(repo.get(&TreeId::from("2")).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut repo = InMemoryRepository::new();
        repo.append(tree("1", "alice")).unwrap();

        let err = repo.append(tree("1", "bob")).unwrap_err();
        assert!(matches!(err, Error::DuplicateRecord(id) if id == "1"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut repo = InMemoryRepository::new();
        for id in ["c", "a", "b"] {
            repo.append(tree(id, "community")).unwrap();
        }
        let ids: Vec<_> = repo.list().iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn list_by_owner_filters() {
        let mut repo = InMemoryRepository::new();
        repo.append(tree("1", "alice")).unwrap();
        repo.append(tree("2", "bob")).unwrap();
        repo.append(tree("3", "alice")).unwrap();

        let mine = repo.list_by_owner("alice");
        assert_eq!(mine.len(), 2);
        assert!(repo.list_by_owner("carol").is_empty());
    }

    #[test]
    fn mark_verified_flips_only_that_record() {
        let mut repo = InMemoryRepository::new();
        repo.append(tree("1", "alice")).unwrap();
        repo.append(tree("2", "alice")).unwrap();

        repo.mark_verified(&TreeId::from("2")).unwrap();

        assert!(!repo.get(&TreeId::from("1")).unwrap().is_verified());
        let verified = repo.get(&TreeId::from("2")).unwrap();
        assert!(verified.is_verified());
        assert_eq!(verified.submitted_by(), "alice");
        assert!(matches!(
            repo.mark_verified(&TreeId::from("9")),
            Err(Error::NotFound(_))
        ));
    }
}
