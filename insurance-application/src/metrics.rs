use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    packages_stored: AtomicU64,
    packages_processed: AtomicU64,
    items_returned: AtomicU64,
    items_deleted: AtomicU64,
    mail_errors: AtomicU64,
}

impl Metrics {
    pub fn record_packages_stored(&self, count: usize) {
        self.packages_stored.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_package_processed(&self, returned: usize, deleted: usize) {
        self.packages_processed.fetch_add(1, Ordering::Relaxed);
        self.items_returned
            .fetch_add(returned as u64, Ordering::Relaxed);
        self.items_deleted
            .fetch_add(deleted as u64, Ordering::Relaxed);
    }

    pub fn record_mail_error(&self) {
        self.mail_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn packages_processed(&self) -> u64 {
        self.packages_processed.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let stored = self.packages_stored.load(Ordering::Relaxed);
        let processed = self.packages_processed.load(Ordering::Relaxed);
        let returned = self.items_returned.load(Ordering::Relaxed);
        let deleted = self.items_deleted.load(Ordering::Relaxed);
        let mail_errors = self.mail_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE insurance_packages_stored_total counter\n\
insurance_packages_stored_total {}\n\
# TYPE insurance_packages_processed_total counter\n\
insurance_packages_processed_total {}\n\
# TYPE insurance_items_returned_total counter\n\
insurance_items_returned_total {}\n\
# TYPE insurance_items_deleted_total counter\n\
insurance_items_deleted_total {}\n\
# TYPE insurance_mail_errors_total counter\n\
insurance_mail_errors_total {}\n",
            stored, processed, returned, deleted, mail_errors
        )
    }
}
