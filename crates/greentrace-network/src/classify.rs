//! Rendering classification for connections and markers.
//!
//! Classification only picks line weight and marker colour on the map. It
//! carries no other meaning.

use std::collections::HashSet;

use crate::{Connection, TreeId, TreeRecord};

/// Record ids that belong to the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ownership {
    ids: HashSet<TreeId>,
}

impl Ownership {
    /// Nobody is signed in.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ownership from the user's own record list.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TreeRecord>) -> Self {
        Self {
            ids: records.into_iter().map(|r| r.id().clone()).collect(),
        }
    }

    /// Ownership of every record in `records` submitted by `user`.
    pub fn for_user(records: &[TreeRecord], user: &str) -> Self {
        Self::from_records(records.iter().filter(|r| r.submitted_by() == user))
    }

    pub fn owns(&self, record: &TreeRecord) -> bool {
        self.ids.contains(record.id())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Emphasis of a connection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConnectionKind {
    /// At least one endpoint is the user's
    User,
    Community,
}

/// Marker style on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarkerKind {
    Yours,
    CommunityStable,
    AtRisk,
}

/// `User` if either endpoint is owned, else `Community`.
pub fn classify_connection(connection: &Connection<'_>, ownership: &Ownership) -> ConnectionKind {
    if ownership.owns(connection.from) || ownership.owns(connection.to) {
        ConnectionKind::User
    } else {
        ConnectionKind::Community
    }
}

/// Ownership first, then conservation status.
pub fn classify_marker(record: &TreeRecord, ownership: &Ownership) -> MarkerKind {
    if ownership.owns(record) {
        MarkerKind::Yours
    } else if record.conservation_status().is_at_risk() {
        MarkerKind::AtRisk
    } else {
        MarkerKind::CommunityStable
    }
}
