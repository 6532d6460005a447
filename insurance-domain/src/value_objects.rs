// Domain value objects
pub mod exit_status;
pub mod roll_outcome;

pub use exit_status::*;
pub use roll_outcome::*;
