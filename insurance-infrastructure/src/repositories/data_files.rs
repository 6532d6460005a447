use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use insurance_domain::{ItemTemplate, TemplateRepository};

/// Reads the static JSON data files: item templates and locale overrides.
#[derive(Default)]
pub struct DataFileRepository;

impl DataFileRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn load_locale(&self, path: &str) -> Result<HashMap<String, String>> {
        if !Path::new(path).exists() {
            warn!("locale file {} not found, using built-in texts", path);
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl TemplateRepository for DataFileRepository {
    async fn load_item_templates(&self, path: &str) -> Result<Vec<ItemTemplate>> {
        if !Path::new(path).exists() {
            warn!("item template file {} not found, catalog is empty", path);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
