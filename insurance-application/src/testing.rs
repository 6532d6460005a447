use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use insurance_domain::ports::{
    DeathLossPolicy, IdGenerator, InsuranceMailer, ItemCatalog, Localisation, ProfileRepository,
    RandomSource, TraderDirectory,
};
use insurance_domain::{
    InsuranceMail, InsuranceSettings, Item, PmcProfile, ReturnChanceTable, RuntimeConfig,
    TraderRecord,
};

use crate::{AppState, Metrics};

pub const PRAPOR: &str = "prapor";
pub const THERAPIST: &str = "therapist";

#[derive(Default)]
pub struct MemoryProfiles {
    pub profiles: Mutex<HashMap<String, PmcProfile>>,
    pub saves: AtomicUsize,
    pub fail_saves: AtomicBool,
}

#[async_trait]
impl ProfileRepository for MemoryProfiles {
    async fn load_profile(&self, session_id: &str) -> anyhow::Result<Option<PmcProfile>> {
        Ok(self.profiles.lock().await.get(session_id).cloned())
    }

    async fn save_profile(&self, profile: &PmcProfile) -> anyhow::Result<()> {
        if self.fail_saves.load(Ordering::Relaxed) {
            anyhow::bail!("disk full");
        }
        self.saves.fetch_add(1, Ordering::Relaxed);
        self.profiles
            .lock()
            .await
            .insert(profile.session_id.clone(), profile.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, InsuranceMail)>>,
    pub fail: bool,
}

#[async_trait]
impl InsuranceMailer for RecordingMailer {
    async fn send_mail(&self, session_id: &str, mail: InsuranceMail) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("mailbox unavailable");
        }
        self.sent.lock().await.push((session_id.to_string(), mail));
        Ok(())
    }
}

pub struct AnyTemplate;

impl ItemCatalog for AnyTemplate {
    fn template_exists(&self, _tpl: &str) -> bool {
        true
    }

    fn item_name(&self, tpl: &str) -> Option<String> {
        Some(tpl.to_string())
    }
}

pub struct FixedTraders;

impl TraderDirectory for FixedTraders {
    fn find_trader(&self, trader_id: &str) -> Option<TraderRecord> {
        [PRAPOR, THERAPIST]
            .into_iter()
            .find(|id| *id == trader_id)
            .map(|id| TraderRecord {
                id: id.to_string(),
                nickname: id.to_uppercase(),
            })
    }
}

#[derive(Default)]
pub struct CountingIds(AtomicUsize);

impl IdGenerator for CountingIds {
    fn generate(&self) -> String {
        format!("root{}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}

pub struct PlainLocale;

impl Localisation for PlainLocale {
    fn get_text(&self, key: &str, params: &[(&str, &str)]) -> String {
        let trader = params
            .iter()
            .find(|(name, _)| *name == "traderName")
            .map(|(_, value)| *value)
            .unwrap_or_default();
        format!("{} {}", key, trader)
    }
}

pub struct NeverExempt;

impl DeathLossPolicy for NeverExempt {
    fn cannot_be_lost_on_death(&self, _item: &Item, _inventory: &[Item]) -> bool {
        false
    }
}

pub struct Rolls(pub VecDeque<u32>);

impl RandomSource for Rolls {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.0.pop_front().unwrap_or(max).clamp(min, max)
    }
}

pub struct Harness {
    pub state: AppState,
    pub profiles: Arc<MemoryProfiles>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn runtime_config(simulate: bool, prapor_chance: f64) -> RuntimeConfig {
    RuntimeConfig {
        profiles_dir: "./profiles".to_string(),
        mail_dir: "./mail".to_string(),
        item_templates_path: "./items.json".to_string(),
        locale_path: None,
        insurance: InsuranceSettings {
            simulate_items_being_taken: simulate,
            return_delay_seconds: 3600,
            return_chance_percent: ReturnChanceTable::default()
                .with(PRAPOR, prapor_chance)
                .with(THERAPIST, 100.0),
        },
        traders: Vec::new(),
        death_exempt_slots: Vec::new(),
        death_exempt_templates: Vec::new(),
        rng_seed: None,
    }
}

pub fn harness(config: RuntimeConfig, rolls: &[u32], mailer: RecordingMailer) -> Harness {
    let profiles = Arc::new(MemoryProfiles::default());
    let mailer = Arc::new(mailer);
    let rng: Box<dyn RandomSource> = Box::new(Rolls(rolls.iter().copied().collect()));
    let state = AppState {
        config,
        profiles: profiles.clone(),
        mailer: mailer.clone(),
        catalog: Arc::new(AnyTemplate),
        traders: Arc::new(FixedTraders),
        death_policy: Arc::new(NeverExempt),
        locale: Arc::new(PlainLocale),
        ids: Arc::new(CountingIds::default()),
        rng: Arc::new(Mutex::new(rng)),
        metrics: Arc::new(Metrics::default()),
    };
    Harness {
        state,
        profiles,
        mailer,
    }
}

impl Harness {
    pub async fn insert_profile(&self, profile: PmcProfile) {
        self.profiles
            .profiles
            .lock()
            .await
            .insert(profile.session_id.clone(), profile);
    }

    pub async fn profile(&self, session_id: &str) -> PmcProfile {
        self.profiles
            .profiles
            .lock()
            .await
            .get(session_id)
            .cloned()
            .expect("profile stored")
    }

    pub async fn mails(&self) -> Vec<InsuranceMail> {
        self.mailer
            .sent
            .lock()
            .await
            .iter()
            .map(|(_, mail)| mail.clone())
            .collect()
    }
}
