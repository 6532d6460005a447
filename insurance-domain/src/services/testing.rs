use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entities::{Item, TraderRecord};
use crate::ports::{DeathLossPolicy, IdGenerator, ItemCatalog, Localisation, RandomSource, TraderDirectory};

pub struct KnownTemplates(pub HashSet<String>);

impl KnownTemplates {
    pub fn all_of(tpls: &[&str]) -> Self {
        Self(tpls.iter().map(|tpl| tpl.to_string()).collect())
    }
}

impl ItemCatalog for KnownTemplates {
    fn template_exists(&self, tpl: &str) -> bool {
        self.0.contains(tpl)
    }

    fn item_name(&self, tpl: &str) -> Option<String> {
        self.0.get(tpl).map(|tpl| format!("name of {}", tpl))
    }
}

pub struct Traders(pub Vec<&'static str>);

impl TraderDirectory for Traders {
    fn find_trader(&self, trader_id: &str) -> Option<TraderRecord> {
        self.0.iter().find(|id| **id == trader_id).map(|id| TraderRecord {
            id: id.to_string(),
            nickname: id.to_uppercase(),
        })
    }
}

#[derive(Default)]
pub struct SequentialIds(AtomicUsize);

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("root{}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// Hands out pre-scripted draws, then repeats the last one.
pub struct ScriptedRolls {
    rolls: VecDeque<u32>,
    last: u32,
    pub drawn: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: &[u32]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
            last: rolls.last().copied().unwrap_or(0),
            drawn: 0,
        }
    }
}

impl RandomSource for ScriptedRolls {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.drawn += 1;
        let value = self.rolls.pop_front().unwrap_or(self.last);
        value.clamp(min, max)
    }
}

pub struct KeyLocale;

impl Localisation for KeyLocale {
    fn get_text(&self, key: &str, params: &[(&str, &str)]) -> String {
        let rendered = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({})", key, rendered)
    }
}

pub struct ExemptTemplates(pub Vec<&'static str>);

impl DeathLossPolicy for ExemptTemplates {
    fn cannot_be_lost_on_death(&self, item: &Item, _inventory: &[Item]) -> bool {
        self.0.contains(&item.tpl.as_str())
    }
}
