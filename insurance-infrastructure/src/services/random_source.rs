use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use insurance_domain::{RandomSource, RngSource};

pub type StdRandomSource = RngSource<StdRng>;

/// Seeded from `seed` when set, from OS entropy otherwise.
pub fn std_random_source(seed: Option<u64>) -> StdRandomSource {
    match seed {
        Some(seed) => {
            info!("using seeded random source ({})", seed);
            RngSource(StdRng::seed_from_u64(seed))
        }
        None => RngSource(StdRng::from_entropy()),
    }
}

pub fn boxed_random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    Box::new(std_random_source(seed))
}
