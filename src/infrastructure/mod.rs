//! Infrastructure adapters implementing the domain ports.

pub mod calendar;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
