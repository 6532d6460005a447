use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::info;

use insurance_application::{AppState, Metrics};
use insurance_domain::TemplateRepository;
use insurance_infrastructure::{
    boxed_random_source, AppConfig, ConfiguredTraderDirectory, DataFileRepository,
    ItemTemplateCatalog, JsonMailbox, JsonProfileRepository, LocaleCatalog, SlotDeathLossPolicy,
    UuidIdGenerator,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(&config).await
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let data_files = DataFileRepository::new();
        let templates = data_files
            .load_item_templates(&runtime_config.item_templates_path)
            .await?;
        let catalog = ItemTemplateCatalog::new(templates);
        info!("loaded {} item templates", catalog.len());

        let locale_overrides = match &runtime_config.locale_path {
            Some(path) => data_files.load_locale(path).await?,
            None => Default::default(),
        };

        let state = AppState {
            profiles: Arc::new(JsonProfileRepository::new(&runtime_config.profiles_dir)),
            mailer: Arc::new(JsonMailbox::new(&runtime_config.mail_dir)),
            catalog: Arc::new(catalog),
            traders: Arc::new(ConfiguredTraderDirectory::new(&runtime_config.traders)),
            death_policy: Arc::new(SlotDeathLossPolicy::new(
                &runtime_config.death_exempt_slots,
                &runtime_config.death_exempt_templates,
            )),
            locale: Arc::new(LocaleCatalog::new(locale_overrides)),
            ids: Arc::new(UuidIdGenerator),
            rng: Arc::new(Mutex::new(boxed_random_source(runtime_config.rng_seed))),
            metrics: Arc::new(Metrics::default()),
            config: runtime_config,
        };

        Ok(Self { state })
    }
}
