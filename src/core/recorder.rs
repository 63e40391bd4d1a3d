use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::Result;

use super::record::LogRecord;

/// Append-only JSONL sink shared by the sampler (measurements) and the input
/// path (marks).
///
/// Each append serializes one record, writes one line and flushes before
/// returning. The handle is mutex-guarded so appends from both threads stay
/// line-atomic; ordering between the two record kinds is by arrival time only.
pub struct JsonlRecorder {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlRecorder {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one record. Failures propagate: silent data loss would
    /// defeat the tool's purpose.
    pub fn append(&self, record: &LogRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;

        let mut file = self.file.lock();
        writeln!(file, "{}", line)?;
        file.flush()?;

        Ok(())
    }
}
