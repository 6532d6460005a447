pub mod item_tree;
pub mod loss_set;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use item_tree::*;
pub use loss_set::*;
pub use resolver::*;
