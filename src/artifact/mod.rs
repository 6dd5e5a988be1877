//! Generated artifacts
//!
//! The compose file and the `.env` file are derived entirely from the
//! configuration plus the service catalog and are rebuilt on every
//! mutating command; they are never hand-edited.

pub mod compose;
pub mod envfile;

pub use compose::render_compose;
pub use envfile::render_env_file;

use crate::config::{Config, COMPOSE_FILE_NAME, ENV_FILE_NAME};
use crate::error::{DevstackError, Result};
use std::path::Path;

/// Regenerate the compose file and `.env` under `dir`
///
/// The `.env` file is merged with whatever is already on disk so user
/// entries survive regeneration.
pub fn write_artifacts(cfg: &Config, dir: &Path) -> Result<()> {
    let compose_path = dir.join(COMPOSE_FILE_NAME);
    let compose = render_compose(cfg)?;
    std::fs::write(&compose_path, compose).map_err(|e| {
        DevstackError::Artifact(format!("Failed to write {}: {}", compose_path.display(), e))
    })?;
    tracing::debug!("Wrote {}", compose_path.display());

    let env_path = dir.join(ENV_FILE_NAME);
    let existing = std::fs::read_to_string(&env_path).unwrap_or_default();
    let merged = render_env_file(&existing, &cfg.env);
    std::fs::write(&env_path, merged).map_err(|e| {
        DevstackError::Artifact(format!("Failed to write {}: {}", env_path.display(), e))
    })?;
    tracing::debug!("Wrote {}", env_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::add_services;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_write_artifacts_creates_both_files() {
        let temp = tempdir().unwrap();
        let mut cfg = Config::new(PathBuf::from("/data/devstack"));
        add_services(&mut cfg, &["redis".to_string()], &BTreeMap::new()).unwrap();

        write_artifacts(&cfg, temp.path()).unwrap();

        assert!(temp.path().join(COMPOSE_FILE_NAME).exists());
        let env = std::fs::read_to_string(temp.path().join(ENV_FILE_NAME)).unwrap();
        assert!(env.contains("REDIS_HOST=127.0.0.1"));
    }

    #[test]
    fn test_write_artifacts_merges_existing_env() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(ENV_FILE_NAME),
            "# my app\nAPP_KEY=base64:xyz\n",
        )
        .unwrap();

        let mut cfg = Config::new(PathBuf::from("/data/devstack"));
        add_services(&mut cfg, &["redis".to_string()], &BTreeMap::new()).unwrap();
        write_artifacts(&cfg, temp.path()).unwrap();

        let env = std::fs::read_to_string(temp.path().join(ENV_FILE_NAME)).unwrap();
        assert!(env.contains("# my app\n"));
        assert!(env.contains("APP_KEY=base64:xyz\n"));
        assert!(env.contains("REDIS_PORT=6379\n"));
    }
}
