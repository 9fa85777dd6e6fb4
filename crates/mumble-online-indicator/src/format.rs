//! Snapshot to one-line status text.

use std::collections::HashSet;

use mumble_online_common::Snapshot;
use mumble_online_config::FormatterKind;

pub const OFFLINE: &str = "Offline";
pub const SERVER_DOWN: &str = "Server down";

/// Renders a snapshot, ignoring users whose name is in `filters`.
#[derive(Debug, Clone, Default)]
pub struct StatusFormatter {
    kind: FormatterKind,
    filters: HashSet<String>,
}

impl StatusFormatter {
    pub fn new(kind: FormatterKind, filters: impl IntoIterator<Item = String>) -> Self {
        Self {
            kind,
            filters: filters.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> FormatterKind {
        self.kind
    }

    /// `None` means the indicator has no connection to the server.
    pub fn render(&self, state: Option<&Snapshot>) -> String {
        let Some(snapshot) = state else {
            return OFFLINE.to_string();
        };
        let Some(tally) = snapshot.tally(&self.filters) else {
            return SERVER_DOWN.to_string();
        };

        match self.kind {
            FormatterKind::Plain => format!("Online: {}/{}", tally.online, tally.total()),
            FormatterKind::Symbol => {
                format!("\u{2714}\u{fe0f} {} | \u{1f558} {}", tally.online, tally.away)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mumble_online_common::decode_snapshot;

    fn example() -> Snapshot {
        decode_snapshot(r#"{"users": {"1": {"name": "a"}, "2": {"name": "b", "status": "mute"}}}"#)
            .unwrap()
    }

    #[test]
    fn plain_counter() {
        let f = StatusFormatter::new(FormatterKind::Plain, []);
        assert_eq!(f.render(Some(&example())), "Online: 1/2");
    }

    #[test]
    fn symbol_counter() {
        let f = StatusFormatter::new(FormatterKind::Symbol, []);
        assert_eq!(f.render(Some(&example())), "✔️ 1 | 🕘 1");
    }

    #[test]
    fn filters_are_excluded_from_totals() {
        let f = StatusFormatter::new(FormatterKind::Plain, ["a".to_string()]);
        assert_eq!(f.render(Some(&example())), "Online: 0/1");

        let f = StatusFormatter::new(FormatterKind::Symbol, ["a".to_string()]);
        assert_eq!(f.render(Some(&example())), "✔️ 0 | 🕘 1");
    }

    #[test]
    fn offline_and_server_down() {
        for kind in [FormatterKind::Plain, FormatterKind::Symbol] {
            let f = StatusFormatter::new(kind, []);
            assert_eq!(f.render(None), "Offline");
            assert_eq!(f.render(Some(&Snapshot::error())), "Server down");
        }
    }

    #[test]
    fn deaf_users_are_away() {
        let snapshot = decode_snapshot(
            r#"{"users": {"1": {"name": "a", "status": "deaf"}, "2": {"name": "b", "status": "mute"}, "3": {"name": "c"}}}"#,
        )
        .unwrap();
        let f = StatusFormatter::new(FormatterKind::Symbol, []);
        assert_eq!(f.render(Some(&snapshot)), "✔️ 1 | 🕘 2");
        let f = StatusFormatter::new(FormatterKind::Plain, []);
        assert_eq!(f.render(Some(&snapshot)), "Online: 1/3");
    }

    #[test]
    fn empty_server() {
        let f = StatusFormatter::new(FormatterKind::Plain, []);
        assert_eq!(f.render(Some(&Snapshot::empty())), "Online: 0/0");
    }
}
