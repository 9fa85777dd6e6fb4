//! Presence snapshot: who is connected to the voice server and whether they
//! can currently hear and speak.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Audio state of a connected user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Normal,
    Deaf,
    Mute,
}

impl UserStatus {
    pub fn is_normal(&self) -> bool {
        matches!(self, UserStatus::Normal)
    }

    /// Deaf and mute users count as away.
    pub fn is_away(&self) -> bool {
        !self.is_normal()
    }
}

/// A user connected to the voice server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "UserStatus::is_normal")]
    pub status: UserStatus,
}

impl User {
    pub fn new(name: impl Into<String>, status: UserStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Presence state of the voice server at one instant.
///
/// Equality is structural; both the server throttle and the client
/// deduplication rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    /// Users keyed by their voice-server session id.
    Users { users: BTreeMap<String, User> },
    /// The control plane could not be reached.
    Error { error: serde_json::Value },
}

/// Online/away counts of a snapshot after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub online: usize,
    pub away: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.online + self.away
    }
}

impl Snapshot {
    pub fn users(users: BTreeMap<String, User>) -> Self {
        Snapshot::Users { users }
    }

    pub fn empty() -> Self {
        Snapshot::Users {
            users: BTreeMap::new(),
        }
    }

    /// The canonical error marker, `{"error": true}`.
    pub fn error() -> Self {
        Snapshot::Error {
            error: serde_json::Value::Bool(true),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Snapshot::Error { .. })
    }

    /// Count online and away users, skipping any whose name is in `filters`.
    ///
    /// Returns `None` for the error marker.
    pub fn tally(&self, filters: &HashSet<String>) -> Option<Tally> {
        let Snapshot::Users { users } = self else {
            return None;
        };

        let mut tally = Tally::default();
        for user in users.values().filter(|u| !filters.contains(&u.name)) {
            if user.status.is_away() {
                tally.away += 1;
            } else {
                tally.online += 1;
            }
        }
        Some(tally)
    }
}
