use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use tokio::fs;

pub fn current_unix_seconds() -> i64 {
    Utc::now().timestamp()
}

pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Session ids end up in file names, keep them to a safe alphabet.
pub fn is_safe_file_stem(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
