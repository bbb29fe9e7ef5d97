//! Persistence of the mission plan as JSON.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MissionPlan;
use crate::config::config_directory;

/// Plan file name inside the config directory.
pub const PLAN_FILE_NAME: &str = "waypoints.json";

#[derive(Debug, Error)]
pub enum PlanStoreError {
    #[error("Failed to read plan file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write plan file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Plan file {path} is not valid: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct PlanFile {
    saved_at: DateTime<Utc>,
    plan: MissionPlan,
}

/// Default plan path (~/.navden/waypoints.json).
pub fn plan_file_path() -> PathBuf {
    config_directory().join(PLAN_FILE_NAME)
}

/// Load a plan. A missing file yields the demo route.
pub fn load_plan(path: &Path) -> Result<MissionPlan, PlanStoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No saved plan, using demo route");
        return Ok(MissionPlan::demo_default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| PlanStoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file: PlanFile =
        serde_json::from_str(&content).map_err(|source| PlanStoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    file.plan.repair_id_counter();

    tracing::debug!(
        path = %path.display(),
        waypoints = file.plan.len(),
        saved_at = %file.saved_at,
        "Loaded mission plan"
    );
    Ok(file.plan)
}

/// Write a plan, creating the parent directory if needed.
pub fn save_plan(path: &Path, plan: &MissionPlan) -> Result<(), PlanStoreError> {
    let write_error = |source| PlanStoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let file = PlanFile {
        saved_at: Utc::now(),
        plan: plan.clone(),
    };
    let content = serde_json::to_string_pretty(&file).map_err(|source| PlanStoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(write_error)?;

    tracing::info!(path = %path.display(), waypoints = plan.len(), "Saved mission plan");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_demo_route() {
        let temp_dir = TempDir::new().unwrap();
        let plan = load_plan(&temp_dir.path().join("none.json")).unwrap();
        assert_eq!(plan, MissionPlan::demo_default());
    }

    #[test]
    fn test_save_then_load_keeps_id_counter() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans").join(PLAN_FILE_NAME);

        let mut plan = MissionPlan::demo_default();
        plan.remove(4).unwrap();
        save_plan(&path, &plan).unwrap();

        let mut loaded = load_plan(&path).unwrap();
        assert_eq!(loaded, plan);
        // Id 4 was used before the save, so the next one is 5.
        assert_eq!(loaded.add(1.0, 1.0), Ok(5));
    }

    #[test]
    fn test_stale_id_counter_is_raised_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PLAN_FILE_NAME);
        std::fs::write(
            &path,
            r#"{
  "saved_at": "2026-01-01T00:00:00Z",
  "plan": {
    "waypoints": [{"id": 7, "x": 10.0, "y": 20.0}],
    "next_id": 3
  }
}"#,
        )
        .unwrap();

        let mut plan = load_plan(&path).unwrap();
        assert_eq!(plan.add(1.0, 1.0), Ok(8));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PLAN_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_plan(&path),
            Err(PlanStoreError::Format { .. })
        ));
    }
}
