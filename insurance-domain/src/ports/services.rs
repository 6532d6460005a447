use rand::Rng;

use crate::entities::{Item, TraderRecord};

/// Template database lookups.
pub trait ItemCatalog: Send + Sync {
    fn template_exists(&self, tpl: &str) -> bool;
    fn item_name(&self, tpl: &str) -> Option<String>;
}

pub trait TraderDirectory: Send + Sync {
    fn find_trader(&self, trader_id: &str) -> Option<TraderRecord>;
}

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform integer draws, inclusive on both ends.
pub trait RandomSource: Send {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32;
}

/// Adapts any `rand` generator into a [`RandomSource`].
pub struct RngSource<R>(pub R);

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}

pub trait DeathLossPolicy: Send + Sync {
    /// True when `item` is kept on death regardless of insurance
    /// (secure container contents, special slots, quest items).
    fn cannot_be_lost_on_death(&self, item: &Item, inventory: &[Item]) -> bool;
}

/// Localized message templates.
pub trait Localisation: Send + Sync {
    fn get_text(&self, key: &str, params: &[(&str, &str)]) -> String;
}
