use std::collections::HashMap;

use insurance_domain::{ItemCatalog, ItemTemplate};

/// In-memory template database keyed by template id.
#[derive(Debug, Default)]
pub struct ItemTemplateCatalog {
    templates: HashMap<String, Option<String>>,
}

impl ItemTemplateCatalog {
    pub fn new(templates: Vec<ItemTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.tpl, template.name))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ItemCatalog for ItemTemplateCatalog {
    fn template_exists(&self, tpl: &str) -> bool {
        self.templates.contains_key(tpl)
    }

    fn item_name(&self, tpl: &str) -> Option<String> {
        self.templates.get(tpl).cloned().flatten()
    }
}
