//! Where presence snapshots come from.
//!
//! A source is synchronous and may be slow. It never fails: when the voice
//! server's control plane cannot be reached it returns the error marker,
//! which is then published like any other state.

use std::collections::{BTreeMap, HashMap};
use std::process::Command;
use std::sync::Arc;

use mumble_online_common::{Snapshot, User, UserStatus};
use serde::Deserialize;

/// Produces the current presence snapshot on demand.
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self) -> Snapshot;
}

impl<F> SnapshotSource for F
where
    F: Fn() -> Snapshot + Send + Sync,
{
    fn fetch(&self) -> Snapshot {
        self()
    }
}

/// Fetch from `source` on the blocking thread pool.
///
/// A panicking source yields the error marker.
pub async fn fetch_blocking(source: Arc<dyn SnapshotSource>) -> Snapshot {
    match tokio::task::spawn_blocking(move || source.fetch()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "Snapshot source panicked");
            Snapshot::error()
        }
    }
}

/// Source used when no control plane is configured.
pub struct OfflineSource;

impl SnapshotSource for OfflineSource {
    fn fetch(&self) -> Snapshot {
        Snapshot::error()
    }
}

/// User state as reported by the Murmur control interface.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MurmurUser {
    pub name: String,
    pub deaf: bool,
    pub self_deaf: bool,
    pub mute: bool,
    pub self_mute: bool,
    pub suppress: bool,
}

impl MurmurUser {
    /// Deafness wins over muting; server-side and self-inflicted count alike.
    pub fn status(&self) -> UserStatus {
        if self.deaf || self.self_deaf {
            UserStatus::Deaf
        } else if self.mute || self.self_mute || self.suppress {
            UserStatus::Mute
        } else {
            UserStatus::Normal
        }
    }
}

impl From<MurmurUser> for User {
    fn from(user: MurmurUser) -> Self {
        let status = user.status();
        User::new(user.name, status)
    }
}

/// Build a snapshot from the control interface's user listing.
pub fn snapshot_from_murmur(users: HashMap<String, MurmurUser>) -> Snapshot {
    let users: BTreeMap<String, User> = users
        .into_iter()
        .map(|(session, user)| (session, User::from(user)))
        .collect();
    Snapshot::users(users)
}

/// Runs an external program that queries the voice server and prints its
/// users as a JSON object keyed by session id.
///
/// No timeout is applied: a hanging program stalls the poll cadence.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    /// Build from an argv list. Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn run(&self) -> Result<Snapshot, String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| format!("failed to run {}: {e}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{} exited with {}: {}", self.program, output.status, stderr.trim()));
        }

        let users: HashMap<String, MurmurUser> = serde_json::from_slice(&output.stdout)
            .map_err(|e| format!("unreadable output from {}: {e}", self.program))?;
        Ok(snapshot_from_murmur(users))
    }
}

impl SnapshotSource for CommandSource {
    fn fetch(&self) -> Snapshot {
        self.run().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Voice server unreachable");
            Snapshot::error()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn murmur(name: &str) -> MurmurUser {
        MurmurUser {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn status_mapping() {
        assert_eq!(murmur("a").status(), UserStatus::Normal);

        for user in [
            MurmurUser { deaf: true, ..murmur("a") },
            MurmurUser { self_deaf: true, ..murmur("a") },
            MurmurUser { self_deaf: true, self_mute: true, ..murmur("a") },
        ] {
            assert_eq!(user.status(), UserStatus::Deaf);
        }

        for user in [
            MurmurUser { mute: true, ..murmur("a") },
            MurmurUser { self_mute: true, ..murmur("a") },
            MurmurUser { suppress: true, ..murmur("a") },
        ] {
            assert_eq!(user.status(), UserStatus::Mute);
        }
    }

    #[test]
    fn murmur_listing_becomes_snapshot() {
        let users: HashMap<String, MurmurUser> = serde_json::from_str(
            r#"{"3": {"name": "a"}, "5": {"name": "b", "self_mute": true}}"#,
        )
        .unwrap();
        let snapshot = snapshot_from_murmur(users);

        let expected: Snapshot = serde_json::from_str(
            r#"{"users": {"3": {"name": "a"}, "5": {"name": "b", "status": "mute"}}}"#,
        )
        .unwrap();
        assert_eq!(snapshot, expected);
    }

    #[test]
    fn closures_are_sources() {
        let source = || Snapshot::empty();
        assert_eq!(source.fetch(), Snapshot::empty());
        assert!(OfflineSource.fetch().is_error());
    }

    #[test]
    fn empty_argv_has_no_command() {
        assert!(CommandSource::from_argv(&[]).is_none());
    }

    #[test]
    fn missing_program_yields_error_marker() {
        let source =
            CommandSource::from_argv(&["/nonexistent/mumble-online-helper".to_string()]).unwrap();
        assert!(source.fetch().is_error());
    }

    #[cfg(unix)]
    #[test]
    fn command_output_is_parsed() {
        let source = CommandSource::from_argv(&[
            "sh".to_string(),
            "-c".to_string(),
            r#"echo '{"1": {"name": "alice", "deaf": true}}'"#.to_string(),
        ])
        .unwrap();
        let Snapshot::Users { users } = source.fetch() else {
            panic!("expected users");
        };
        assert_eq!(users["1"], User::new("alice", UserStatus::Deaf));
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_yields_error_marker() {
        let source = CommandSource::from_argv(&[
            "sh".to_string(),
            "-c".to_string(),
            "echo boom >&2; exit 3".to_string(),
        ])
        .unwrap();
        assert!(source.fetch().is_error());

        let source = CommandSource::from_argv(&[
            "sh".to_string(),
            "-c".to_string(),
            "echo not json".to_string(),
        ])
        .unwrap();
        assert!(source.fetch().is_error());
    }

    #[tokio::test]
    async fn panicking_source_yields_error_marker() {
        let source: Arc<dyn SnapshotSource> = Arc::new(|| -> Snapshot { panic!("boom") });
        assert!(fetch_blocking(source).await.is_error());
    }
}
