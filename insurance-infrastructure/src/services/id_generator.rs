use uuid::Uuid;

use insurance_domain::IdGenerator;

/// Mongo-style 24 hex character ids drawn from a v4 uuid.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(24);
        id
    }
}
