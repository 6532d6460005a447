use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use insurance_domain::{PmcProfile, ProfileRepository};

use crate::utils::{ensure_parent_dir, is_safe_file_stem};

/// Stores one profile per session as `<profiles_dir>/<session>.json`.
pub struct JsonProfileRepository {
    dir: PathBuf,
}

impl JsonProfileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn profile_path(&self, session_id: &str) -> Result<PathBuf> {
        if !is_safe_file_stem(session_id) {
            bail!("invalid session id: {}", session_id);
        }
        Ok(self.dir.join(format!("{}.json", session_id)))
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn load_profile(&self, session_id: &str) -> Result<Option<PmcProfile>> {
        let path = self.profile_path(session_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        let mut profile: PmcProfile = serde_json::from_str(&content)?;
        if profile.session_id.is_empty() {
            profile.session_id = session_id.to_string();
        }
        Ok(Some(profile))
    }

    async fn save_profile(&self, profile: &PmcProfile) -> Result<()> {
        let path = self.profile_path(&profile.session_id)?;
        ensure_parent_dir(&path).await?;
        let content = serde_json::to_string_pretty(profile)?;
        // Replace atomically.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("saved profile {} to {}", profile.session_id, path.display());
        Ok(())
    }
}
