//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file
    pub database_path: Option<String>,
    /// Directory where captured clips are written
    pub recordings_dir: Option<String>,
}

impl AppConfig {
    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            database_path: other.database_path.or(self.database_path),
            recordings_dir: other.recordings_dir.or(self.recordings_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_other() {
        let base = AppConfig {
            database_path: Some("/a/db.sqlite".into()),
            recordings_dir: Some("/a/recordings".into()),
        };
        let other = AppConfig {
            database_path: Some("/b/db.sqlite".into()),
            recordings_dir: None,
        };

        let merged = base.merge(other);
        assert_eq!(merged.database_path.as_deref(), Some("/b/db.sqlite"));
        assert_eq!(merged.recordings_dir.as_deref(), Some("/a/recordings"));
    }

    #[test]
    fn merge_of_empty_keeps_base() {
        let base = AppConfig {
            database_path: Some("/a/db.sqlite".into()),
            recordings_dir: None,
        };

        let merged = base.clone().merge(AppConfig::empty());
        assert_eq!(merged.database_path, base.database_path);
        assert_eq!(merged.recordings_dir, None);
    }
}
