use std::collections::HashMap;

use insurance_domain::{TraderDirectory, TraderRecord};

pub struct ConfiguredTraderDirectory {
    traders: HashMap<String, TraderRecord>,
}

impl ConfiguredTraderDirectory {
    pub fn new(traders: &[TraderRecord]) -> Self {
        Self {
            traders: traders
                .iter()
                .map(|trader| (trader.id.clone(), trader.clone()))
                .collect(),
        }
    }
}

impl TraderDirectory for ConfiguredTraderDirectory {
    fn find_trader(&self, trader_id: &str) -> Option<TraderRecord> {
        self.traders.get(trader_id).cloned()
    }
}
