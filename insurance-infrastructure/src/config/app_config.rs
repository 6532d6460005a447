use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use insurance_domain::{InsuranceSettings, ReturnChanceTable, RuntimeConfig, TraderRecord};

use crate::config::validation::{
    validate_path, validate_return_chances, validate_traders, ConfigError,
};

pub const CONFIG_ENV: &str = "INSURANCE_FRAUD_CONFIG";

const PRAPOR_ID: &str = "54cb50c76803fa8b248b4571";
const THERAPIST_ID: &str = "54cb57776803fa99248b456e";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub profiles_dir: String,
    pub mail_dir: String,
    pub item_templates_path: String,
    pub locale_path: Option<String>,
    pub simulate_items_being_taken: bool,
    pub return_delay_seconds: u64,
    pub return_chance_percent: HashMap<String, f64>,
    pub traders: Vec<TraderRecord>,
    pub death_exempt_slots: Vec<String>,
    pub death_exempt_templates: Vec<String>,
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles_dir: "./profiles".to_string(),
            mail_dir: "./mail".to_string(),
            item_templates_path: "./items.json".to_string(),
            locale_path: None,
            simulate_items_being_taken: true,
            return_delay_seconds: 3600,
            return_chance_percent: HashMap::from([
                (PRAPOR_ID.to_string(), 85.0),
                (THERAPIST_ID.to_string(), 95.0),
            ]),
            traders: default_traders(),
            death_exempt_slots: vec!["SecuredContainer".to_string()],
            death_exempt_templates: Vec::new(),
            rng_seed: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::parse(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn normalize(&mut self) {
        if let Some(locale_path) = &self.locale_path {
            if locale_path.trim().is_empty() {
                self.locale_path = None;
            }
        }
        for trader in &mut self.traders {
            trader.id = trader.id.trim().to_string();
            trader.nickname = trader.nickname.trim().to_string();
        }
        self.death_exempt_slots = normalize_id_list(std::mem::take(&mut self.death_exempt_slots));
        self.death_exempt_templates =
            normalize_id_list(std::mem::take(&mut self.death_exempt_templates));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.profiles_dir = resolve_path(base, &self.profiles_dir);
        self.mail_dir = resolve_path(base, &self.mail_dir);
        self.item_templates_path = resolve_path(base, &self.item_templates_path);
        self.locale_path = self
            .locale_path
            .as_deref()
            .map(|path| resolve_path(base, path));
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path(&self.profiles_dir, "profiles_dir")?;
        validate_path(&self.mail_dir, "mail_dir")?;
        validate_path(&self.item_templates_path, "item_templates_path")?;
        validate_traders(&self.traders)?;
        validate_return_chances(&self.return_chance_table(), &self.traders)
    }

    pub fn return_chance_table(&self) -> ReturnChanceTable {
        ReturnChanceTable(self.return_chance_percent.clone())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            profiles_dir: self.profiles_dir.clone(),
            mail_dir: self.mail_dir.clone(),
            item_templates_path: self.item_templates_path.clone(),
            locale_path: self.locale_path.clone(),
            insurance: InsuranceSettings {
                simulate_items_being_taken: self.simulate_items_being_taken,
                return_delay_seconds: self.return_delay_seconds,
                return_chance_percent: self.return_chance_table(),
            },
            traders: self.traders.clone(),
            death_exempt_slots: self.death_exempt_slots.clone(),
            death_exempt_templates: self.death_exempt_templates.clone(),
            rng_seed: self.rng_seed,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("INSURANCE_FRAUD_PROFILES_DIR") {
            self.profiles_dir = value;
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_MAIL_DIR") {
            self.mail_dir = value;
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_ITEM_TEMPLATES_PATH") {
            self.item_templates_path = value;
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_LOCALE_PATH") {
            self.locale_path = Some(value);
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_SIMULATE_ITEMS_BEING_TAKEN") {
            self.simulate_items_being_taken =
                value.parse().unwrap_or(self.simulate_items_being_taken);
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_RETURN_DELAY_SECONDS") {
            self.return_delay_seconds = value.parse().unwrap_or(self.return_delay_seconds);
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_DEATH_EXEMPT_SLOTS") {
            self.death_exempt_slots = parse_env_id_list(&value);
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_DEATH_EXEMPT_TEMPLATES") {
            self.death_exempt_templates = parse_env_id_list(&value);
        }
        if let Some(value) = lookup("INSURANCE_FRAUD_RNG_SEED") {
            self.rng_seed = value.parse().ok();
        }
    }
}

fn default_traders() -> Vec<TraderRecord> {
    [
        (PRAPOR_ID, "Prapor"),
        (THERAPIST_ID, "Therapist"),
        ("579dc571d53a0658a154fbec", "Fence"),
        ("58330581ace78e27b8b10cee", "Skier"),
        ("5935c25fb3acc3127c3d8cd9", "Peacekeeper"),
        ("5a7c2eca46aef81a7ca2145d", "Mechanic"),
        ("5ac3b934156ae10c4430e83c", "Ragman"),
        ("5c0647fdd443bc2504c2d371", "Jaeger"),
    ]
    .into_iter()
    .map(|(id, nickname)| TraderRecord {
        id: id.to_string(),
        nickname: nickname.to_string(),
    })
    .collect()
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_id_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_id_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().expect("defaults validate");
        let runtime = config.to_runtime_config();
        assert!(runtime.insurance.simulate_items_being_taken);
        assert_eq!(runtime.insurance.return_chance_percent.get(PRAPOR_ID), Some(85.0));
        assert_eq!(runtime.traders.len(), 8);
    }

    #[test]
    fn parses_toml_with_trader_table() {
        let config = AppConfig::parse(
            r#"
            profiles_dir = "data/profiles"
            simulate_items_being_taken = false
            return_delay_seconds = 60
            rng_seed = 7

            [return_chance_percent]
            trader_a = 40

            [[traders]]
            id = "trader_a"
            nickname = "Alpha"
            "#,
        )
        .expect("parsed");
        assert_eq!(config.profiles_dir, "data/profiles");
        assert_eq!(config.mail_dir, "./mail");
        assert!(!config.simulate_items_being_taken);
        assert_eq!(config.return_chance_percent.get("trader_a"), Some(&40.0));
        assert_eq!(config.traders[0].nickname, "Alpha");
        assert_eq!(config.rng_seed, Some(7));
        config.validate().expect("valid");
    }

    #[test]
    fn rejects_percentage_above_hundred() {
        let mut config = AppConfig::default();
        config
            .return_chance_percent
            .insert(PRAPOR_ID.to_string(), 120.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReturnChanceOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_chance_for_unlisted_trader() {
        let mut config = AppConfig::default();
        config.traders.retain(|trader| trader.id != THERAPIST_ID);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownTrader(THERAPIST_ID.to_string()))
        );
    }

    #[test]
    fn resolves_relative_paths_against_config_dir() {
        let mut config = AppConfig {
            locale_path: Some("locale.json".to_string()),
            item_templates_path: "/abs/items.json".to_string(),
            ..AppConfig::default()
        };
        config.resolve_paths(Some(Path::new("/etc/insurance")));
        assert_eq!(config.locale_path.as_deref(), Some("/etc/insurance/locale.json"));
        assert_eq!(config.item_templates_path, "/abs/items.json");
        assert!(config.profiles_dir.starts_with("/etc/insurance"));
    }

    #[test]
    fn applies_overrides_and_normalizes() {
        let overrides = HashMap::from([
            ("INSURANCE_FRAUD_RETURN_DELAY_SECONDS", "5"),
            ("INSURANCE_FRAUD_SIMULATE_ITEMS_BEING_TAKEN", "false"),
            ("INSURANCE_FRAUD_DEATH_EXEMPT_SLOTS", "Pockets, SecuredContainer,,"),
            ("INSURANCE_FRAUD_LOCALE_PATH", " "),
            ("INSURANCE_FRAUD_RNG_SEED", "not-a-number"),
        ]);
        let mut config = AppConfig {
            rng_seed: Some(1),
            ..AppConfig::default()
        };
        config.apply_overrides(|key| overrides.get(key).map(|value| value.to_string()));
        config.normalize();
        assert_eq!(config.return_delay_seconds, 5);
        assert!(!config.simulate_items_being_taken);
        assert_eq!(config.death_exempt_slots, vec!["Pockets", "SecuredContainer"]);
        assert_eq!(config.locale_path, None);
        assert_eq!(config.rng_seed, None);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = env::temp_dir().join(format!("insurance-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let config = AppConfig::load_from(&path.to_string_lossy())
            .await
            .expect("defaults");
        assert!(config.mail_dir.starts_with(&*dir.to_string_lossy()));
    }
}
