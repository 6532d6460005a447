// Runtime settings entities

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-trader chance (0-100) that an insured item comes back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnChanceTable(pub HashMap<String, f64>);

impl ReturnChanceTable {
    pub fn get(&self, trader_id: &str) -> Option<f64> {
        self.0.get(trader_id).copied()
    }

    pub fn with(mut self, trader_id: impl Into<String>, percent: f64) -> Self {
        self.0.insert(trader_id.into(), percent);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderRecord {
    pub id: String,
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsuranceSettings {
    pub simulate_items_being_taken: bool,
    pub return_delay_seconds: u64,
    pub return_chance_percent: ReturnChanceTable,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub profiles_dir: String,
    pub mail_dir: String,
    pub item_templates_path: String,
    pub locale_path: Option<String>,
    pub insurance: InsuranceSettings,
    pub traders: Vec<TraderRecord>,
    pub death_exempt_slots: Vec<String>,
    pub death_exempt_templates: Vec<String>,
    pub rng_seed: Option<u64>,
}
