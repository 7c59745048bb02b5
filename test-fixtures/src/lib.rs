//! Golden fixture loader shared by integration tests across the workspace.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // From inside any member crate, walk up to the workspace root.
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_core::models::{AchievementRecord, FeedbackEvent, SelectionContext};

    #[test]
    fn golden_files_exist() {
        for f in [
            "golden/selection/achievement_pool.json",
            "golden/selection/platform_context.json",
            "golden/feedback/deletions.json",
        ] {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn golden_files_parse_into_domain_types() {
        let pool: Vec<AchievementRecord> = load_fixture("golden/selection/achievement_pool.json");
        assert!(pool.len() >= 5);
        let context: SelectionContext = load_fixture("golden/selection/platform_context.json");
        assert!(context.required_attributes.iter().any(|a| a == "Kubernetes"));
        let events: Vec<FeedbackEvent> = load_fixture("golden/feedback/deletions.json");
        assert!(!events.is_empty());
    }

    #[test]
    fn list_fixtures_finds_json() {
        assert_eq!(list_fixtures("golden/selection").len(), 2);
        assert!(list_fixtures("golden/missing").is_empty());
        assert!(load_fixture_value("golden/feedback/deletions.json").is_array());
    }
}
