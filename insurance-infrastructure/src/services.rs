pub mod death_policy;
pub mod id_generator;
pub mod item_catalog;
pub mod locale_catalog;
pub mod random_source;
pub mod trader_directory;

pub use death_policy::*;
pub use id_generator::*;
pub use item_catalog::*;
pub use locale_catalog::*;
pub use random_source::*;
pub use trader_directory::*;
