use std::path::Path;

use crate::board::Board;
use crate::integrity::board_integrity_issues;

pub const BOARD_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SnapshotError {
    UnsupportedVersion { found: u32, expected: u32 },
    RonSerialize(ron::Error),
    RonDeserialize(ron::error::SpannedError),
    Io(std::io::Error),

    /// The snapshot parsed but describes a malformed board.
    Integrity(Vec<String>),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported board snapshot version: {found} (expected {expected})"
                )
            }
            Self::RonSerialize(err) => write!(f, "ron serialize error: {err}"),
            Self::RonDeserialize(err) => write!(f, "ron deserialize error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Integrity(issues) => write!(f, "invalid board: {}", issues.join("; ")),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. } | Self::Integrity(_) => None,
            Self::RonSerialize(err) => Some(err),
            Self::RonDeserialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for SnapshotError {
    fn from(err: ron::Error) -> Self {
        Self::RonSerialize(err)
    }
}

impl From<ron::error::SpannedError> for SnapshotError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonDeserialize(err)
    }
}

/// A versioned, self-contained copy of a [`Board`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct BoardSnapshot {
    pub version: u32,
    pub board: Board,
}

impl BoardSnapshot {
    pub fn new(board: &Board) -> Self {
        Self {
            version: BOARD_SNAPSHOT_VERSION,
            board: board.clone(),
        }
    }

    pub fn to_ron_string(&self) -> Result<String, SnapshotError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Parse a snapshot, rejecting other versions and boards that fail the integrity checks.
    pub fn from_ron_str(s: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = ron::from_str(s)?;
        if snapshot.version != BOARD_SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: BOARD_SNAPSHOT_VERSION,
            });
        }

        let issues = board_integrity_issues(&snapshot.board);
        if !issues.is_empty() {
            return Err(SnapshotError::Integrity(issues));
        }
        Ok(snapshot)
    }

    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_ron_str(&s)
    }
}
