pub mod data_files;
pub mod mailbox_files;
pub mod profile_files;

pub use data_files::*;
pub use mailbox_files::*;
pub use profile_files::*;
