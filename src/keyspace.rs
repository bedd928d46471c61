//! Registration plate keyspace generation and prefix cursor persistence
//!
//! Implements the AAA000..ZZZ999 identifier space: a three-letter prefix
//! advanced between runs via a small state file, and a zero-padded
//! three-digit counter enumerated within a run.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Number of plates enumerated per prefix (suffixes 000 through 999).
pub const PLATES_PER_PREFIX: usize = 1000;

/// Default state file holding the current prefix between runs.
pub const DEFAULT_CURSOR_FILE: &str = "current_prefix.txt";

/// Keyspace errors
#[derive(Debug, thiserror::Error)]
pub enum KeyspaceError {
    /// Prefix is not exactly three ASCII uppercase letters
    #[error("invalid prefix {0:?}: expected three ASCII uppercase letters")]
    InvalidPrefix(String),

    /// The keyspace is exhausted; "ZZZ" has no successor
    #[error("prefix keyspace exhausted: ZZZ cannot be advanced")]
    PrefixOverflow,

    /// Cursor file IO error
    #[error("cursor file error: {0}")]
    Io(String),
}

/// Three-letter plate prefix, e.g. "AAA".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix([u8; 3]);

impl Prefix {
    /// Parse a prefix from its string form.
    ///
    /// Surrounding whitespace is tolerated (the cursor file may carry a
    /// trailing newline); the letters themselves must be ASCII uppercase.
    pub fn parse(s: &str) -> Result<Self, KeyspaceError> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(KeyspaceError::InvalidPrefix(trimmed.to_string()));
        }
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }

    /// The successor prefix under the carry rule.
    ///
    /// The last letter is incremented; 'Z' carries into the letter to its
    /// left ("AAZ" → "ABA", "AZZ" → "BAA"). "ZZZ" has no successor and
    /// yields [`KeyspaceError::PrefixOverflow`] rather than wrapping.
    pub fn increment(self) -> Result<Self, KeyspaceError> {
        let mut letters = self.0;
        for position in (0..letters.len()).rev() {
            if letters[position] < b'Z' {
                letters[position] += 1;
                return Ok(Self(letters));
            }
            letters[position] = b'A';
        }
        Err(KeyspaceError::PrefixOverflow)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = std::str::from_utf8(&self.0).map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}

/// A single registration plate: prefix plus zero-padded numeric suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plate(String);

impl Plate {
    fn new(prefix: Prefix, suffix: u16) -> Self {
        debug_assert!((suffix as usize) < PLATES_PER_PREFIX);
        Self(format!("{prefix}{suffix:03}"))
    }

    /// The plate as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Enumerate the full plate sequence for one prefix, in order.
    pub fn sequence(prefix: Prefix) -> impl Iterator<Item = Plate> {
        (0..PLATES_PER_PREFIX as u16).map(move |suffix| Plate::new(prefix, suffix))
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted prefix cursor.
///
/// The cursor file is global mutable state shared with nothing inside this
/// process; it is treated as a single-writer collaborator and carries no
/// cross-process locking.
pub struct PrefixCursor {
    path: PathBuf,
}

impl PrefixCursor {
    /// Create a cursor backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the current prefix, defaulting to "AAA" when the file is absent.
    pub fn load(&self) -> Result<Prefix, KeyspaceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "cursor file missing, starting at AAA");
            return Ok(Prefix([b'A', b'A', b'A']));
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| KeyspaceError::Io(format!("failed to read {}: {e}", self.path.display())))?;
        Prefix::parse(&raw)
    }

    /// Persist `prefix` as the current cursor position.
    pub fn save(&self, prefix: Prefix) -> Result<(), KeyspaceError> {
        std::fs::write(&self.path, prefix.to_string())
            .map_err(|e| KeyspaceError::Io(format!("failed to write {}: {e}", self.path.display())))
    }

    /// Advance the cursor one step and persist the result.
    pub fn advance(&self) -> Result<Prefix, KeyspaceError> {
        let next = self.load()?.increment()?;
        self.save(next)?;
        info!(prefix = %next, "prefix cursor advanced");
        Ok(next)
    }
}
