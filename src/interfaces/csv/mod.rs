//! CSV readers and writers for the command-line interface.

pub mod calendar_reader;
pub mod installment_reader;
pub mod ledger_writer;
