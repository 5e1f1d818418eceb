//! NDJSON journal backing both catalog collections.
//!
//! One line per inserted record: `{"collection": "products", "record": {..}}`.
//! The whole file is replayed on open and every insert appends a single line
//! that is synced to disk before the insert returns. A journal without a path
//! keeps nothing on disk and is used for in-memory stores.

use crate::catalog::identity::CollectionName;
use crate::catalog::model::Record;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

const IN_MEMORY_LABEL: &str = ":memory:";

#[derive(Debug, Clone, Deserialize)]
/// A raw journal line, decoded only as far as its collection tag.
pub struct JournalEntry {
    /// 1-based line number the entry was read from.
    #[serde(skip)]
    pub line: usize,
    pub collection: CollectionName,
    pub record: Value,
}

#[derive(Serialize)]
struct EntryRef<'a, R> {
    collection: &'a CollectionName,
    record: &'a R,
}

#[derive(Debug, Clone)]
/// Handle to the journal file; cheap to clone, each collection holds one.
pub struct Journal {
    path: Option<PathBuf>,
}

impl Journal {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn label(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(IN_MEMORY_LABEL))
    }

    /// Read every entry in file order. A missing file is an empty journal.
    ///
    /// An unterminated final line left by an interrupted append is cut off
    /// the file, so the next append starts on a clean line.
    pub fn load(&self) -> Result<Vec<JournalEntry>, StorageError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(Vec::new());
        };
        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_err(source)),
        };
        let replayed = replay(BufReader::new(file), path)?;
        if let Some(offset) = replayed.torn_at {
            OpenOptions::new()
                .write(true)
                .open(path)
                .and_then(|file| file.set_len(offset))
                .map_err(io_err)?;
        }
        Ok(replayed.entries)
    }

    /// Durably append one record to `collection`.
    ///
    /// The line is written and synced before returning. If either step fails
    /// the file is cut back to its previous length, so a failed append leaves
    /// no partial line behind.
    pub fn append<R: Serialize>(
        &self,
        collection: &CollectionName,
        record: &R,
    ) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(&EntryRef { collection, record })?;
        line.push('\n');

        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        let start = file.metadata().map_err(io_err)?.len();
        if let Err(source) = write_line(&mut file, start, line.as_bytes()) {
            // The write error is returned; a failed rollback is only logged.
            if let Err(err) = file.set_len(start) {
                warn!(path = %path.display(), error = %err, "failed to roll back journal tail");
            }
            return Err(io_err(source));
        }
        Ok(())
    }

    /// Decode a raw entry into a typed record, reporting the source line.
    pub fn decode<R: Record>(&self, entry: JournalEntry) -> Result<R, StorageError> {
        serde_json::from_value(entry.record).map_err(|source| StorageError::Corrupt {
            path: self.label(),
            line: entry.line,
            source,
        })
    }
}

/// Write `line` at the end of a journal currently `len` bytes long and sync.
///
/// A file whose last byte is not a newline gets one first, so `line` never
/// lands on the tail of an earlier entry.
fn write_line(file: &mut File, len: u64, line: &[u8]) -> io::Result<()> {
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }
    file.write_all(line)?;
    file.sync_data()
}

struct Replay {
    entries: Vec<JournalEntry>,
    /// Byte offset of an unterminated, unparseable final line.
    torn_at: Option<u64>,
}

/// Parse journal entries from an NDJSON stream.
///
/// Whitespace-only lines are skipped; parse failures carry the 1-based line
/// number so a damaged journal can be repaired by hand. A final line with no
/// trailing newline that does not parse is the remains of an interrupted
/// append and is dropped with a warning.
pub fn read_entries<R: BufRead>(reader: R, path: &Path) -> Result<Vec<JournalEntry>, StorageError> {
    replay(reader, path).map(|replay| replay.entries)
}

fn replay<R: BufRead>(mut reader: R, path: &Path) -> Result<Replay, StorageError> {
    let mut entries = Vec::new();
    let mut line_buf = Vec::new();
    let mut line_number = 0usize;
    let mut offset = 0u64;

    loop {
        line_buf.clear();
        let bytes = reader
            .read_until(b'\n', &mut line_buf)
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if bytes == 0 {
            break;
        }
        line_number += 1;
        let line_start = offset;
        offset += bytes as u64;

        let trimmed = line_buf.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_slice::<JournalEntry>(trimmed) {
            Ok(mut entry) => {
                entry.line = line_number;
                entries.push(entry);
            }
            Err(source) if !line_buf.ends_with(b"\n") => {
                warn!(
                    path = %path.display(),
                    line = line_number,
                    error = %source,
                    "dropping unterminated journal tail"
                );
                return Ok(Replay {
                    entries,
                    torn_at: Some(line_start),
                });
            }
            Err(source) => {
                return Err(StorageError::Corrupt {
                    path: path.to_path_buf(),
                    line: line_number,
                    source,
                });
            }
        }
    }

    Ok(Replay {
        entries,
        torn_at: None,
    })
}
