//! Exact inner-product vector index and its persistence

mod flat;
mod store;

pub use flat::FlatIpIndex;
pub use store::{IndexSnapshot, IndexStore};
