//! Deterministic question routing onto the curated FAQ catalog

mod catalog;
mod normalize;
mod router;
mod scope;
mod similarity;

pub use catalog::FaqCatalog;
pub use normalize::normalize_question;
pub use router::{match_core_faq, RouteMatch};
pub use scope::is_out_of_scope;
pub use similarity::{closest_match, sequence_ratio};
