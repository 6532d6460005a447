use std::sync::Arc;

use insurance_domain::ports::{
    DeathLossPolicy, IdGenerator, InsuranceMailer, ItemCatalog, Localisation, ProfileRepository,
    RandomSource, TraderDirectory,
};
use insurance_domain::RuntimeConfig;
use tokio::sync::Mutex;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub profiles: Arc<dyn ProfileRepository>,
    pub mailer: Arc<dyn InsuranceMailer>,
    pub catalog: Arc<dyn ItemCatalog>,
    pub traders: Arc<dyn TraderDirectory>,
    pub death_policy: Arc<dyn DeathLossPolicy>,
    pub locale: Arc<dyn Localisation>,
    pub ids: Arc<dyn IdGenerator>,
    pub rng: Arc<Mutex<Box<dyn RandomSource>>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Display name used in mail text, falls back to the raw id.
    pub fn trader_name(&self, trader_id: &str) -> String {
        self.traders
            .find_trader(trader_id)
            .map(|trader| trader.nickname)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| trader_id.to_string())
    }
}
