// Domain entities
pub mod insurance;
pub mod item;
pub mod profile;
pub mod raid;
pub mod settings;

pub use insurance::*;
pub use item::*;
pub use profile::*;
pub use raid::*;
pub use settings::*;
