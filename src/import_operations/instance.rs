//! Locate the sqlite databases of a seqrepo instance.

use std::path::{Path, PathBuf};

use crate::errors::StoreError;

/// Paths of a validated seqrepo instance directory.
///
/// ```text
/// <root>/aliases.sqlite3
/// <root>/sequences/db.sqlite3
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeqRepoInstance {
    pub root: PathBuf,
    pub aliases_db: PathBuf,
    pub sequences_db: PathBuf,
}

impl SeqRepoInstance {
    /// Check that `root` has the seqrepo layout.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        let invalid = |reason: String| StoreError::InvalidSeqRepo {
            path: root.clone(),
            reason,
        };

        let aliases_db = root.join("aliases.sqlite3");
        if !aliases_db.is_file() {
            return Err(invalid("missing aliases.sqlite3".to_string()));
        }

        let sequences = root.join("sequences");
        if !sequences.is_dir() {
            return Err(invalid("missing sequences directory".to_string()));
        }

        let sequences_db = sequences.join("db.sqlite3");
        if !sequences_db.is_file() {
            return Err(invalid("missing sequences/db.sqlite3".to_string()));
        }

        Ok(Self {
            root,
            aliases_db,
            sequences_db,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScratchDir;
    use std::fs;

    #[test]
    fn complete_layout_is_accepted() {
        let dir = ScratchDir::new("instance-ok");
        fs::write(dir.path().join("aliases.sqlite3"), b"").unwrap();
        fs::create_dir(dir.path().join("sequences")).unwrap();
        fs::write(dir.path().join("sequences/db.sqlite3"), b"").unwrap();

        let instance = SeqRepoInstance::open(dir.path()).unwrap();

        assert_eq!(instance.aliases_db, dir.path().join("aliases.sqlite3"));
        assert_eq!(instance.sequences_db, dir.path().join("sequences/db.sqlite3"));
    }

    #[test]
    fn missing_aliases_db_is_rejected() {
        let dir = ScratchDir::new("instance-no-aliases");
        fs::create_dir(dir.path().join("sequences")).unwrap();

        let err = SeqRepoInstance::open(dir.path()).unwrap_err();

        assert!(matches!(err, StoreError::InvalidSeqRepo { .. }));
        assert!(err.to_string().ends_with("missing aliases.sqlite3"), "{err}");
    }

    #[test]
    fn missing_sequences_db_is_rejected() {
        let dir = ScratchDir::new("instance-no-seqdb");
        fs::write(dir.path().join("aliases.sqlite3"), b"").unwrap();
        fs::create_dir(dir.path().join("sequences")).unwrap();

        let err = SeqRepoInstance::open(dir.path()).unwrap_err();

        assert!(err.to_string().contains("sequences/db.sqlite3"), "{err}");
    }
}
