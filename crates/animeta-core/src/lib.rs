//! Aggregation core: the fallback chain, the catalog facade over it, and
//! the bundled placeholder dataset that terminates every query.

pub mod catalog;
pub mod chain;
pub mod dataset;
pub mod mock;

pub use catalog::Catalog;
pub use chain::{run_chain, Attempt, AttemptLog, AttemptState, ChainOutcome, ChainValue};
pub use mock::MockProvider;
