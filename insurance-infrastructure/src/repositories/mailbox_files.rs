use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

use insurance_domain::{InsuranceMail, InsuranceMailer};

use crate::utils::{ensure_parent_dir, is_safe_file_stem};

/// Appends mails to a per-session JSON array at `<mail_dir>/<session>.json`.
pub struct JsonMailbox {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonMailbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn mailbox_path(&self, session_id: &str) -> Result<PathBuf> {
        if !is_safe_file_stem(session_id) {
            bail!("invalid session id: {}", session_id);
        }
        Ok(self.dir.join(format!("{}.json", session_id)))
    }

    pub async fn read_mails(&self, session_id: &str) -> Result<Vec<InsuranceMail>> {
        let path = self.mailbox_path(session_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl InsuranceMailer for JsonMailbox {
    async fn send_mail(&self, session_id: &str, mail: InsuranceMail) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.mailbox_path(session_id)?;
        let mut mails = self.read_mails(session_id).await?;
        info!(
            "mail {} from trader {} to session {} ({} items)",
            mail.kind.as_str(),
            mail.trader_id,
            session_id,
            mail.items.len()
        );
        mails.push(mail);
        ensure_parent_dir(&path).await?;
        fs::write(&path, serde_json::to_string_pretty(&mails)?).await?;
        Ok(())
    }
}
