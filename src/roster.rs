use crate::constants::{CONFIG_DIR_NAME, ROSTER_FILE_NAME};
use crate::models::{initial_friends, Friend};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the starting roster: `~/.eat-n-split/friends.yaml`
pub fn default_roster_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(ROSTER_FILE_NAME)
}

/// Read a roster file. Duplicate ids after the first occurrence are dropped.
pub fn read_roster(path: &Path) -> Result<Vec<Friend>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading roster {}", path.display()))?;
    let friends: Vec<Friend> = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing roster {}", path.display()))?;

    let mut seen = HashSet::new();
    Ok(friends
        .into_iter()
        .filter(|f| seen.insert(f.id.clone()))
        .collect())
}

/// Starting friend list: the roster file if present and readable,
/// otherwise the built-in three friends.
pub fn load_roster(path: &Path) -> Vec<Friend> {
    if !path.exists() {
        return initial_friends();
    }

    match read_roster(path) {
        Ok(friends) => {
            tracing::info!(path = %path.display(), count = friends.len(), "Loaded roster");
            friends
        }
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to built-in roster");
            initial_friends()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let friends = load_roster(&dir.path().join("friends.yaml"));
        assert_eq!(friends, initial_friends());
    }

    #[test]
    fn test_reads_yaml_and_drops_duplicate_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- id: a\n  name: Ana\n  image: img-a\n  balance: 5\n- id: b\n  name: Ben\n  image: img-b\n- id: a\n  name: Again\n  image: img-c"
        )
        .unwrap();

        let friends = load_roster(file.path());
        assert_eq!(friends.len(), 2);
        assert_eq!(friends[0].name, "Ana");
        assert_eq!(friends[0].balance, 5.0);
        assert_eq!(friends[1].balance, 0.0);
    }

    #[test]
    fn test_malformed_file_uses_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not: [a, list").unwrap();
        assert!(read_roster(file.path()).is_err());
        assert_eq!(load_roster(file.path()), initial_friends());
    }
}
