use std::collections::HashMap;

use insurance_domain::Localisation;

const BUILT_IN_TEXTS: [(&str, &str); 6] = [
    (
        "insurance-mail_start",
        "{{traderName}} has your insured gear from {{locationName}}. Expect it back once it has been tracked down.",
    ),
    (
        "insurance-mail_returned",
        "{{traderName}} recovered some of your insured gear from {{locationName}}.",
    ),
    (
        "insurance-mail_failed",
        "{{traderName}} could not recover anything of your insured gear from {{locationName}}.",
    ),
    (
        "insurance-unable_to_find_parent_of_item",
        "Unable to find parent {{parentId}} of insured item {{insuredItemId}} ({{insuredItemTpl}})",
    ),
    (
        "insurance-unable_to_find_attachment_in_db",
        "Unable to find template of insured attachment {{insuredItemId}} ({{insuredItemTpl}})",
    ),
    (
        "insurance-unable_to_find_main_parent_for_attachment",
        "Unable to find main parent of insured attachment {{insuredItemId}} ({{insuredItemTpl}}), parent {{parentId}}",
    ),
];

/// Message templates with `{{name}}` placeholders.
///
/// Unknown keys render as the key itself.
pub struct LocaleCatalog {
    texts: HashMap<String, String>,
}

impl LocaleCatalog {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        let mut texts: HashMap<String, String> = BUILT_IN_TEXTS
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();
        texts.extend(overrides);
        Self { texts }
    }
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl Localisation for LocaleCatalog {
    fn get_text(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.texts.get(key) else {
            return key.to_string();
        };
        params
            .iter()
            .fold(template.clone(), |text, (name, value)| {
                text.replace(&format!("{{{{{}}}}}", name), value)
            })
    }
}
