// Repository and Service Port Traits (Interfaces)
// Define what the domain needs from the host and infrastructure

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
