use async_trait::async_trait;

use crate::entities::{InsuranceMail, ItemTemplate, PmcProfile};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn load_profile(&self, session_id: &str) -> anyhow::Result<Option<PmcProfile>>;
    async fn save_profile(&self, profile: &PmcProfile) -> anyhow::Result<()>;
}

#[async_trait]
pub trait InsuranceMailer: Send + Sync {
    async fn send_mail(&self, session_id: &str, mail: InsuranceMail) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn load_item_templates(&self, path: &str) -> anyhow::Result<Vec<ItemTemplate>>;
}
