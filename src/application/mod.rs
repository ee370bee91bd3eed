//! Application layer containing the allocation pipeline.
//!
//! The three stages (`normalizer`, `allocator`, `ledger`) are pure functions over
//! in-memory data. `FeeEngine` chains them and persists the resulting snapshot
//! through a `LedgerStore`.

pub mod allocator;
pub mod engine;
pub mod ledger;
pub mod normalizer;
