// Player profile entity
// The slice of a PMC profile the insurance flow reads and writes

use serde::{Deserialize, Serialize};

use crate::entities::{InsurancePackage, InsuredItem, Item};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PmcProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "sessionId", default)]
    pub session_id: String,
    #[serde(rename = "inventoryItems", default)]
    pub inventory_items: Vec<Item>,
    #[serde(rename = "insuredItems", default)]
    pub insured_items: Vec<InsuredItem>,
    #[serde(default)]
    pub insurance: Vec<InsurancePackage>,
}

impl PmcProfile {
    pub fn pending_item_count(&self) -> usize {
        self.insurance.iter().map(|package| package.items.len()).sum()
    }
}
