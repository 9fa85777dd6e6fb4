//! Presentation sink: turns the latest observed state into a persisted
//! one-line status.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use mumble_online_common::Snapshot;

use crate::format::StatusFormatter;

/// Written on startup and shutdown so readers never find an empty file.
pub const PLACEHOLDER: &str = "-";

pub const STATUS_FILE_NAME: &str = "mumble-online-users.txt";

/// `$XDG_RUNTIME_DIR/mumble-online-users.txt`, falling back to `/tmp`.
pub fn default_status_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(STATUS_FILE_NAME)
}

/// Receives every state the client observes. `None` means offline.
pub trait PresentationSink {
    fn update(&mut self, state: Option<&Snapshot>) -> io::Result<()>;
}

/// Keeps a status file holding the rendered text of the latest state.
///
/// The file is rewritten only when the rendered text changes.
pub struct FileStatusView {
    file: File,
    path: PathBuf,
    formatter: StatusFormatter,
    /// `None` until the first update.
    last_state: Option<Option<Snapshot>>,
    last_text: String,
    writes: u64,
    closed: bool,
}

impl FileStatusView {
    /// Create (or truncate) the status file and write the placeholder.
    pub fn open(path: impl AsRef<Path>, formatter: StatusFormatter) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut view = Self {
            file,
            path,
            formatter,
            last_state: None,
            last_text: String::new(),
            writes: 0,
            closed: false,
        };
        view.write_line(PLACEHOLDER)?;
        Ok(view)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of times the file has been rewritten, placeholders included.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Write the placeholder and release the file.
    pub fn close(mut self) -> io::Result<()> {
        self.closed = true;
        self.write_line(PLACEHOLDER)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.set_len(0)?;
        self.file.write_all(text.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        self.last_text = text.to_string();
        self.writes += 1;
        Ok(())
    }
}

impl PresentationSink for FileStatusView {
    fn update(&mut self, state: Option<&Snapshot>) -> io::Result<()> {
        if self.last_state.as_ref().map(Option::as_ref) == Some(state) {
            return Ok(());
        }

        let text = self.formatter.render(state);
        if text != self.last_text {
            self.write_line(&text)?;
            tracing::debug!(status = %text, "Status updated");
        }
        self.last_state = Some(state.cloned());
        Ok(())
    }
}

impl Drop for FileStatusView {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.write_line(PLACEHOLDER) {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to reset status file");
            }
        }
    }
}
