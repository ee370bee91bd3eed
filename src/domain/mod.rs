//! Domain layer: value objects, the entities an allocation run works on, and
//! the ports implemented by infrastructure adapters.

pub mod distribution;
pub mod fee_account;
pub mod installment;
pub mod money;
pub mod policy;
pub mod ports;
pub mod release;
